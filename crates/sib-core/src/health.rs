use axum::http::StatusCode;

/// Handler for `GET /healthz`. The process is up if it can answer.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a dependency probe (database ping etc.) to a readiness status.
///
/// Failures are logged at `warn` and reported as `503 Service Unavailable`.
pub fn probe_status<E: std::fmt::Display>(probe: Result<(), E>) -> StatusCode {
    match probe {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "readiness probe failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
