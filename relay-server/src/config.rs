//! Configuration for the relay server.
//!
//! All configuration is read from environment variables.

use std::env;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server host
    pub host: String,

    /// HTTP server port
    pub port: u16,

    /// Google Cloud project id
    pub project_id: Option<String>,

    /// Pub/Sub topic name or full topic path
    pub pubsub_topic: Option<String>,

    /// BigQuery table identifier
    pub bigquery_table: Option<String>,

    /// Log level
    pub log_level: String,

    /// Enable JSON logging
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: non_empty("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            project_id: non_empty("GOOGLE_CLOUD_PROJECT"),
            pubsub_topic: non_empty("PUBSUB_TOPIC"),
            bigquery_table: non_empty("BIGQUERY_TABLE"),
            log_level: non_empty("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_json: non_empty("LOG_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Get the full server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
