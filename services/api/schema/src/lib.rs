pub mod otps;
pub mod records;
