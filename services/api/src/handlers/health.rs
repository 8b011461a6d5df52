use axum::{extract::State, http::StatusCode};

use sib_core::health::probe_status;

use crate::state::AppState;

/// `GET /readyz`: ready once the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    probe_status(state.db.ping().await)
}
