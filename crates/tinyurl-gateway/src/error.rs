use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinyurl_shortener::ShortenerError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// An error rendered as `{"error": "..."}` with a matching status code.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<E: std::error::Error> From<ShortenerError<E>> for AppError {
    fn from(value: ShortenerError<E>) -> Self {
        match &value {
            ShortenerError::InvalidInput(_) => Self::bad_request(value.to_string()),
            ShortenerError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, value.to_string()),
            ShortenerError::AlreadyExists { source, .. } => {
                error!(error = %source, "could not find a free short code");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, value.to_string())
            }
            ShortenerError::InvalidGeneratedCode(reason) => {
                error!(reason = %reason, "short code generator is misconfigured");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, value.to_string())
            }
            ShortenerError::Store(source) => {
                error!(error = %source, "store request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal storage error")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
