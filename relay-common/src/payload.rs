//! Request payload and HTTP response bodies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bigquery::InsertError;

/// Caller-supplied JSON, forwarded without inspection
pub type Payload = Value;

/// Returns true for payloads that count as "no data": `null`, `false`, zero,
/// the empty string, `{}` and `[]`.
pub fn is_empty_payload(payload: &Payload) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Success body: `{"message": ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// Failure body: `{"error": ...}`, with row errors under `details` when the
/// table store rejected the insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<InsertError>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: Vec<InsertError>) -> Self {
        Self {
            error: error.into(),
            details: Some(details),
        }
    }
}
