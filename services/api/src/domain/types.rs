use chrono::{DateTime, Utc};

use crate::error::ApiError;

/// Client message when `Text` is empty on create.
pub const TEXT_REQUIRED_ON_CREATE: &str = "'text' field is required!";

/// Client message when `Text` is empty on update.
pub const TEXT_REQUIRED_ON_UPDATE: &str = "'text' field is required";

/// Client message when `otp` is empty on authenticate.
pub const OTP_REQUIRED: &str = "'otp' field is required";

/// A stored text record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A one-time password row, as provisioned out of band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimePassword {
    pub code: String,
    pub used: bool,
    pub expires_at: DateTime<Utc>,
}

impl OneTimePassword {
    /// Whether the code could still be redeemed at `now`.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }

    /// Reason this code cannot be redeemed at `now`, if any. Used takes precedence over expired.
    pub fn rejection(&self, now: DateTime<Utc>) -> Option<ApiError> {
        if self.used {
            Some(ApiError::OtpUsed)
        } else if self.expires_at <= now {
            Some(ApiError::OtpExpired)
        } else {
            None
        }
    }
}
