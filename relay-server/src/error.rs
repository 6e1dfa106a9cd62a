//! Error types and their HTTP mapping.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use relay_common::{ConfigError, ErrorResponse, InsertError};

/// Failures talking to Google Cloud
#[derive(Debug, Error)]
pub enum GcpError {
    #[error("authentication failed: {0}")]
    Auth(#[from] gcp_auth::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("publish task failed: {0}")]
    Task(String),
}

/// Errors surfaced by the HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No data provided")]
    NoData,

    #[error("request body could not be read: {0}")]
    Body(BytesRejection),

    #[error("Error inserting into BigQuery")]
    InsertRejected(Vec<InsertError>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gcp(#[from] GcpError),

    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NoData => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(self.to_string()))).into_response()
            }
            ApiError::Body(rejection) => rejection.into_response(),
            ApiError::InsertRejected(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_details("Error inserting into BigQuery", details)),
            )
                .into_response(),
            other => {
                // Cause goes to the log only
                error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
