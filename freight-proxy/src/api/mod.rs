//! HTTP API

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod health;
pub mod print;

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new().merge(health::router()).merge(print::router())
}

/// Fully configured application, used by the server and by tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // Browsers post here directly from the SPA origin
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
