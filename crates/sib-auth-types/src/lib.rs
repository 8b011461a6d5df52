//! Token issuing/validation and the bearer-token gate shared by sib services.

pub mod bearer;
pub mod token;
