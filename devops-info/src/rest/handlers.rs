use axum::{
    Json,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::info;

use super::error::ApiError;
use crate::info::{HealthResponse, InfoResponse, RequestContext, build_health, build_info};
use crate::system::HostSource;
use crate::uptime::StartInstant;

/// Shared application state
pub struct AppState {
    pub started: StartInstant,
    pub host: Arc<dyn HostSource>,
}

impl AppState {
    /// Capture the start instant now.
    pub fn new(host: Arc<dyn HostSource>) -> Self {
        Self {
            started: StartInstant::now(),
            host,
        }
    }
}

/// Log every incoming request before it is routed.
pub async fn log_request(request: Request, next: Next) -> Response {
    info!("Request: {} {}", request.method(), request.uri().path());
    next.run(request).await
}

/// Service, host, uptime and caller information
pub async fn get_info(
    State(state): State<Arc<AppState>>,
    request: RequestContext,
) -> Result<Json<InfoResponse>, ApiError> {
    let info = build_info(&state.started, state.host.as_ref(), request)?;
    Ok(Json(info))
}

/// Liveness check
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(build_health(&state.started))
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
