//! Shared types for the analytics relay.
//!
//! This crate contains:
//! - the opaque request payload and the HTTP response bodies
//! - resource names for Pub/Sub topics and BigQuery tables
//! - the Pub/Sub and BigQuery REST wire formats used by relay-server
//!
//! Any change to what goes over the wire should be made here.

pub mod bigquery;
pub mod payload;
pub mod pubsub;
pub mod resource;

pub use bigquery::{ErrorProto, InsertAllRequest, InsertAllResponse, InsertError, InsertRow, Table, TableReference};
pub use payload::{is_empty_payload, ErrorResponse, MessageResponse, Payload};
pub use pubsub::{PublishRequest, PublishResponse, PubsubMessage};
pub use resource::{ConfigError, TableRef, TopicPath};

/// Error envelope returned by Google REST APIs on non-2xx responses
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GoogleErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
