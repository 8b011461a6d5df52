use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants. Every variant renders as `{"message": "<display text>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Body was not valid JSON for the route; carries the decoder's message.
    #[error("{0}")]
    InvalidBody(String),
    /// A required field was empty or absent; carries the full client message.
    #[error("{0}")]
    MissingField(&'static str),
    #[error("'id' must be of type int")]
    InvalidId,
    #[error("record with id {0} does not exist!")]
    RecordNotFound(i64),
    #[error("Invalid")]
    OtpInvalid,
    #[error("Used")]
    OtpUsed,
    #[error("Expired")]
    OtpExpired,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidBody(_) => "INVALID_BODY",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidId => "INVALID_ID",
            Self::RecordNotFound(_) => "RECORD_NOT_FOUND",
            Self::OtpInvalid => "OTP_INVALID",
            Self::OtpUsed => "OTP_USED",
            Self::OtpExpired => "OTP_EXPIRED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // Missing records are reported as 400, not 404, for client compatibility.
            Self::InvalidBody(_)
            | Self::MissingField(_)
            | Self::InvalidId
            | Self::RecordNotFound(_) => StatusCode::BAD_REQUEST,
            Self::OtpInvalid | Self::OtpUsed | Self::OtpExpired => StatusCode::UNAUTHORIZED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // TraceLayer already records method/uri/status; only 500s need the error chain.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %format!("{e:#}"), kind = self.kind(), "internal error");
        }
        let body = serde_json::json!({ "message": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
