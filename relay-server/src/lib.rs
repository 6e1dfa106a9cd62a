//! Analytics relay - forwards JSON requests to Pub/Sub and BigQuery.
//!
//! Routes:
//! - `GET /` returns a static welcome string
//! - `POST /publish` publishes the body to the configured Pub/Sub topic
//! - `POST /process` inserts the body as one row into the configured BigQuery table
//!
//! Both Google clients sit behind traits ([`MessagePublisher`], [`TableStore`])
//! and are shared across requests through [`AppState`].

pub mod bigquery;
pub mod config;
pub mod error;
pub mod gcp;
pub mod pubsub;
pub mod routes;

pub use bigquery::{BigQueryClient, TableStore};
pub use config::Config;
pub use error::{ApiError, GcpError};
pub use pubsub::{MessagePublisher, PendingPublish, PubSubPublisher};
pub use routes::{build_router, AppState};
