use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;
use thiserror::Error;
use tracing::error;

use crate::system::HostError;

/// Handler error. Every variant maps to one of two fixed response bodies; the
/// detail is logged, never returned to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("endpoint does not exist")]
    NotFound,

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("internal: {0}")]
    Internal(String),
}

/// Fixed JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: &'static str,
}

pub const NOT_FOUND: ErrorBody = ErrorBody {
    error: "Not Found",
    message: "Endpoint does not exist",
};

pub const INTERNAL_SERVER_ERROR: ErrorBody = ErrorBody {
    error: "Internal Server Error",
    message: "An unexpected error occurred",
};

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Host(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self {
            ApiError::NotFound => NOT_FOUND,
            _ => {
                error!(error = %self, "Request failed");
                INTERNAL_SERVER_ERROR
            }
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Response for a panic caught by `CatchPanicLayer`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}
