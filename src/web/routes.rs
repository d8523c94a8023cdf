//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        // API routes
        .route(
            "/api/search",
            post(handlers::search).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health));

    // Static UI
    if state.settings.ui.enabled {
        router = router.fallback_service(ServeDir::new(&state.settings.ui.static_dir));
    }

    router
        // Dropping the handler future on timeout cancels dispatch and refinement
        .layer(TimeoutLayer::new(state.settings.server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
