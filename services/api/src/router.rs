use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use sib_core::health::healthz;
use sib_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    auth::{authenticate, is_authenticated},
    health::readyz,
    records::{create_record, delete_record, get_record, list_records, update_record},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/authenticate", post(authenticate))
        .route("/is-authenticated", get(is_authenticated))
        // Records
        .route("/records", get(list_records))
        .route("/records", post(create_record))
        .route("/records/{id}", get(get_record))
        .route("/records/{id}", put(update_record))
        .route("/records/{id}", delete(delete_record))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http())
                .layer(propagate_request_id_layer())
                .layer(cors),
        )
        .with_state(state)
}
