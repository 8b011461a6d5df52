pub mod authenticate;
pub mod record;
