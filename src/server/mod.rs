//! HTTP server wiring

pub mod handlers;
pub mod state;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the application router with all routes and middleware
///
/// CORS is wide open: the gateway serves browser clients on arbitrary
/// origins, matching the service contract it replaces.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/status", get(handlers::status))
        .route("/extract", post(handlers::extract))
        .route("/download", post(handlers::download))
        .route("/stream", get(handlers::stream))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
