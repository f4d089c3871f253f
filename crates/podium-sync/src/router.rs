//! Axum router construction for the sync endpoint.
//!
//! A single read-only route plus a JSON 404 fallback, with CORS
//! middleware allowing any origin -- the endpoint is unauthenticated by
//! design and intended for trusted local-network use.

use axum::Router;
use axum::routing::get;
use podium_core::SharedStateStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Build the complete Axum router for the sync server.
///
/// The router includes:
/// - `GET /timer_state` -- current timer snapshot as JSON
/// - everything else -- `404`
///
/// CORS allows any origin so phone browsers can poll from pages served
/// elsewhere on the venue network.
pub fn build_router(store: SharedStateStore) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/timer_state", get(handlers::get_timer_state))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
