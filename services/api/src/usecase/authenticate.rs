use chrono::Utc;

use sib_auth_types::bearer::JwtSecret;
use sib_auth_types::token::issue_token;

use crate::domain::repository::OtpRepository;
use crate::domain::types::OTP_REQUIRED;
use crate::error::ApiError;

pub struct AuthenticateInput {
    pub otp: String,
}

#[derive(Debug)]
pub struct AuthenticateOutput {
    pub token: String,
    pub token_exp: u64,
}

/// Exchange a one-time password for a long-lived bearer token.
///
/// The token is signed before the code is consumed, so a signing failure never
/// burns a code. Redemption is a single conditional update; the code row is only
/// read afterwards, to explain a refusal.
pub struct AuthenticateUseCase<O: OtpRepository> {
    pub otps: O,
    pub jwt_secret: JwtSecret,
}

impl<O: OtpRepository> AuthenticateUseCase<O> {
    pub async fn execute(&self, input: AuthenticateInput) -> Result<AuthenticateOutput, ApiError> {
        if input.otp.is_empty() {
            return Err(ApiError::MissingField(OTP_REQUIRED));
        }

        let (token, token_exp) =
            issue_token(self.jwt_secret.as_str()).map_err(|e| ApiError::Internal(e.into()))?;

        let now = Utc::now();
        if self.otps.redeem(&input.otp, now).await? {
            tracing::info!("one-time password redeemed");
            return Ok(AuthenticateOutput { token, token_exp });
        }

        let otp = self
            .otps
            .find_by_code(&input.otp)
            .await?
            .ok_or(ApiError::OtpInvalid)?;

        // Still redeemable means the row was provisioned after the update ran.
        Err(otp.rejection(now).unwrap_or(ApiError::OtpInvalid))
    }
}
