use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::error::handle_panic;
use super::handlers::{self, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    // Wrong methods on known paths are treated as unmatched routes.
    let router = Router::new()
        .route("/", get(handlers::get_info).fallback(handlers::not_found))
        .route("/health", get(handlers::get_health).fallback(handlers::not_found))
        .fallback(handlers::not_found)
        .with_state(state);

    with_service_layers(router)
}

/// Request logging, tracing spans, and panic-to-500 mapping (outermost).
fn with_service_layers(router: Router) -> Router {
    router
        .layer(middleware::from_fn(handlers::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}
