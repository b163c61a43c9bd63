use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Stable external error report. Never carries internal state.
#[derive(Debug, Serialize, PartialEq)]
pub struct ErrorReport {
    pub code: &'static str,
    pub reason: String,
}

impl AppError {
    /// Total mapping to the external report. Client-facing failures keep
    /// their reason; internal detail is logged and withheld.
    pub fn report(&self) -> ErrorReport {
        match self {
            AppError::NotFound(msg) => ErrorReport {
                code: "NOT_FOUND",
                reason: msg.clone(),
            },
            AppError::BadRequest(msg) => ErrorReport {
                code: "BAD_REQUEST",
                reason: msg.clone(),
            },
            AppError::Internal(msg) => {
                tracing::error!(detail = %msg, "internal error");
                ErrorReport {
                    code: "INTERNAL_SERVER_ERROR",
                    reason: String::new(),
                }
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.report())).into_response()
    }
}
