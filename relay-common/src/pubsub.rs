//! Pub/Sub REST v1 publish wire format.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// A single message; `data` is base64 on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubsubMessage {
    pub data: String,
}

impl PubsubMessage {
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: STANDARD.encode(data),
        }
    }

    /// Decode the message data back to raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }
}

/// Body of `POST /v1/{topic}:publish`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    pub messages: Vec<PubsubMessage>,
}

/// Response of `POST /v1/{topic}:publish`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    #[serde(default)]
    pub message_ids: Vec<String>,
}
