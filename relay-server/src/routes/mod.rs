//! HTTP route handlers.

pub mod index;
pub mod payload;
pub mod process;
pub mod publish;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio_util::task::TaskTracker;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use relay_common::{ConfigError, TableRef, TopicPath};

use crate::bigquery::TableStore;
use crate::pubsub::MessagePublisher;

pub use index::{index, WELCOME_MESSAGE};
pub use payload::JsonPayload;
pub use process::{process, PROCESSED_MESSAGE};
pub use publish::{publish, PUBLISHED_MESSAGE};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub publisher: Arc<dyn MessagePublisher>,
    pub tables: Arc<dyn TableStore>,
    pub project_id: Option<String>,
    pub pubsub_topic: Option<String>,
    pub bigquery_table: Option<String>,

    /// Work outliving its request, such as publishes still awaiting their
    /// acknowledgement
    pub background: TaskTracker,
}

impl AppState {
    /// Close the background tracker and wait for what is in flight, up to
    /// `limit`. Returns false if work was still pending at the deadline.
    pub async fn drain_background(&self, limit: Duration) -> bool {
        self.background.close();
        info!("Waiting for {} background tasks", self.background.len());

        match tokio::time::timeout(limit, self.background.wait()).await {
            Ok(()) => true,
            Err(_) => {
                warn!(
                    "{} background tasks still running after {:?}",
                    self.background.len(),
                    limit
                );
                false
            }
        }
    }

    /// Topic path for the configured project and topic
    pub fn topic_path(&self) -> Result<TopicPath, ConfigError> {
        let project = self
            .project_id
            .as_deref()
            .ok_or(ConfigError::Missing("GOOGLE_CLOUD_PROJECT"))?;
        let topic = self
            .pubsub_topic
            .as_deref()
            .ok_or(ConfigError::Missing("PUBSUB_TOPIC"))?;

        TopicPath::new(project, topic)
    }

    /// Table reference for the configured table identifier
    pub fn table_ref(&self) -> Result<TableRef, ConfigError> {
        let table = self
            .bigquery_table
            .as_deref()
            .ok_or(ConfigError::Missing("BIGQUERY_TABLE"))?;

        TableRef::parse(table, self.project_id.as_deref())
    }
}

/// Largest request body accepted, matching the Pub/Sub publish and BigQuery
/// `insertAll` request caps
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Build the router: `/`, `/publish` and `/process`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/publish", post(publish))
        .route("/process", post(process))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
