// Error types for the semey-api server
// Author: kelexine (https://github.com/kelexine)

use crate::models::ApiResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Too many requests, please try again later.")]
    TooManyRequests,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders the error as an envelope response.
    ///
    /// Server-side failures never leak their detail to the client unless
    /// `expose_internal` is set (development mode); client errors always
    /// carry their message.
    pub fn render(&self, expose_internal: bool) -> Response {
        let status = self.status();
        let body = if status.is_server_error() {
            error!("Request failed: {}", self);
            let message = expose_internal.then(|| self.to_string());
            ApiResponse::<()>::failure("Internal server error").with_message(message)
        } else {
            ApiResponse::<()>::failure(self.to_string())
        };

        (status, axum::Json(body)).into_response()
    }
}

// Convert ApiError to HTTP responses for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.render(false)
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
