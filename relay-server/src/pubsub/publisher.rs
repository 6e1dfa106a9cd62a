//! Pub/Sub REST publisher.

use std::sync::Arc;

use tracing::{debug, info};

use relay_common::{PublishRequest, PublishResponse, PubsubMessage, TopicPath};

use super::{MessagePublisher, PendingPublish};
use crate::error::GcpError;
use crate::gcp::{self, AccessTokens};

const PUBSUB_ENDPOINT: &str = "https://pubsub.googleapis.com";
const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

/// Pub/Sub publisher for relayed payloads
#[derive(Clone)]
pub struct PubSubPublisher {
    http: reqwest::Client,
    tokens: Arc<dyn AccessTokens>,
    endpoint: String,
}

impl PubSubPublisher {
    /// Create a publisher against the public Pub/Sub endpoint
    pub fn new(http: reqwest::Client, tokens: Arc<dyn AccessTokens>) -> Self {
        info!("Pub/Sub publisher targeting {}", PUBSUB_ENDPOINT);
        Self {
            http,
            tokens,
            endpoint: PUBSUB_ENDPOINT.to_string(),
        }
    }

    /// Point the publisher at a different base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn send(&self, topic: &TopicPath, data: &[u8]) -> Result<String, GcpError> {
        let token = self.tokens.access_token(PUBSUB_SCOPE).await?;
        let url = format!("{}/v1/{}:publish", self.endpoint, topic);
        let request = PublishRequest {
            messages: vec![PubsubMessage::from_bytes(data)],
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;
        let response: PublishResponse = gcp::read_json(response).await?;

        let message_id = response.message_ids.into_iter().next().ok_or_else(|| GcpError::Api {
            status: 200,
            message: "publish response carried no message id".to_string(),
        })?;

        debug!("Published message {} to {}", message_id, topic);
        Ok(message_id)
    }
}

impl MessagePublisher for PubSubPublisher {
    fn publish(&self, topic: &TopicPath, data: Vec<u8>) -> PendingPublish {
        let publisher = self.clone();
        let topic = topic.clone();

        // Runs to completion even if the handle is dropped
        let handle = tokio::spawn(async move { publisher.send(&topic, &data).await });

        PendingPublish::new(async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => Err(GcpError::Task(e.to_string())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::{
        body::Bytes,
        extract::State,
        http::{HeaderMap, StatusCode, Uri},
        response::IntoResponse,
        Json, Router,
    };
    use serde_json::{json, Value};

    struct StaticToken;

    #[async_trait]
    impl AccessTokens for StaticToken {
        async fn access_token(&self, scope: &str) -> Result<String, GcpError> {
            assert_eq!(scope, PUBSUB_SCOPE);
            Ok("test-token".to_string())
        }
    }

    #[derive(Clone, Default)]
    struct Captured {
        requests: Arc<Mutex<Vec<(String, String, Value)>>>,
        reject: bool,
    }

    async fn fake_pubsub(
        State(captured): State<Captured>,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> axum::response::Response {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        captured.requests.lock().unwrap().push((uri.path().to_string(), auth, body));

        if captured.reject {
            let error = json!({"error": {"code": 404, "message": "Resource not found", "status": "NOT_FOUND"}});
            return (StatusCode::NOT_FOUND, Json(error)).into_response();
        }
        Json(json!({"messageIds": ["4711"]})).into_response()
    }

    async fn serve(captured: Captured) -> String {
        let app = Router::new().fallback(fake_pubsub).with_state(captured);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn publisher(endpoint: String) -> PubSubPublisher {
        PubSubPublisher::new(gcp::http_client().unwrap(), Arc::new(StaticToken)).with_endpoint(endpoint)
    }

    #[tokio::test]
    async fn test_publish_sends_base64_message() {
        let captured = Captured::default();
        let endpoint = serve(captured.clone()).await;
        let topic = TopicPath::new("my-project", "events").unwrap();

        let message_id = publisher(endpoint)
            .publish(&topic, br#"{"k":"v"}"#.to_vec())
            .await
            .unwrap();
        assert_eq!(message_id, "4711");

        let requests = captured.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);

        let (path, auth, body) = &requests[0];
        assert_eq!(path, "/v1/projects/my-project/topics/events:publish");
        assert_eq!(auth, "Bearer test-token");

        let message: PubsubMessage = serde_json::from_value(body["messages"][0].clone()).unwrap();
        assert_eq!(message.decode().unwrap(), br#"{"k":"v"}"#);
    }

    #[tokio::test]
    async fn test_publish_surfaces_api_error() {
        let captured = Captured {
            reject: true,
            ..Default::default()
        };
        let endpoint = serve(captured).await;
        let topic = TopicPath::new("my-project", "missing").unwrap();

        let err = publisher(endpoint).publish(&topic, b"{}".to_vec()).await.unwrap_err();
        match err {
            GcpError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Resource not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dropped_handle_still_publishes() {
        let captured = Captured::default();
        let endpoint = serve(captured.clone()).await;
        let topic = TopicPath::new("my-project", "events").unwrap();

        drop(publisher(endpoint).publish(&topic, b"{\"a\":1}".to_vec()));

        for _ in 0..100 {
            if !captured.requests.lock().unwrap().is_empty() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("publish never reached the server");
    }
}
