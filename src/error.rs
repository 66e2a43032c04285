//! Error handling and custom error types
//!
//! Provides unified error handling across the service using thiserror, and
//! maps every error onto the JSON error envelope returned by the web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{0}")]
    Upstream(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI client error: {0}")]
    Sdk(#[from] async_openai::error::OpenAIError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Error::Validation(err.to_string())
    }
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short, client-facing category for server-side failures.
    fn category(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::Configuration(_) => "configuration_error",
            Error::Upstream(_) | Error::Http(_) | Error::Sdk(_) => "upstream_error",
            Error::Storage(_) | Error::Io(_) => "storage_error",
            Error::Image(_) | Error::Serialization(_) | Error::Invariant(_) => "internal_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status.is_client_error() {
            tracing::info!("Rejected request: {}", self);
            ErrorResponse {
                error: self.to_string(),
                details: None,
            }
        } else {
            tracing::error!(category = self.category(), "Request failed: {}", self);
            ErrorResponse {
                error: self.to_string(),
                details: Some(self.category().to_string()),
            }
        };

        (status, Json(body)).into_response()
    }
}
