//! Plumbing shared by the Pub/Sub and BigQuery clients: credentials, the
//! outbound HTTP client and Google error decoding.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gcp_auth::TokenProvider;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use relay_common::GoogleErrorEnvelope;

use crate::error::GcpError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of OAuth2 bearer tokens for Google APIs
#[async_trait]
pub trait AccessTokens: Send + Sync {
    async fn access_token(&self, scope: &str) -> Result<String, GcpError>;
}

/// Application Default Credentials
#[derive(Clone)]
pub struct GoogleCredentials {
    provider: Arc<dyn TokenProvider>,
}

impl GoogleCredentials {
    /// Discover credentials from the environment (service account key,
    /// gcloud user credentials or the metadata server)
    pub async fn discover() -> Result<Self, GcpError> {
        info!("Discovering Google application default credentials");
        let provider = gcp_auth::provider().await?;
        Ok(Self { provider })
    }

    /// Project id from `configured`, falling back to the one the
    /// credentials belong to
    pub async fn resolve_project(&self, configured: Option<String>) -> Option<String> {
        if configured.is_some() {
            return configured;
        }

        match self.provider.project_id().await {
            Ok(project) => {
                info!("Using project {} from credentials", project);
                Some(project.to_string())
            }
            Err(e) => {
                warn!("No project configured and none available from credentials: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl AccessTokens for GoogleCredentials {
    async fn access_token(&self, scope: &str) -> Result<String, GcpError> {
        let token = self.provider.token(&[scope]).await?;
        Ok(token.as_str().to_string())
    }
}

/// Build the HTTP client shared by both API clients
pub fn http_client() -> Result<reqwest::Client, GcpError> {
    Ok(reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

/// Decode a successful response body, or turn a non-2xx response into
/// [`GcpError::Api`]
pub(crate) async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GcpError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &str) -> GcpError {
    let message = match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.to_string(),
    };

    GcpError::Api { status, message }
}
