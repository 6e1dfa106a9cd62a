//! Publish endpoint.

use axum::{extract::State, Json};
use tracing::{debug, error, info};

use relay_common::MessageResponse;

use super::{AppState, JsonPayload};
use crate::error::ApiError;

pub const PUBLISHED_MESSAGE: &str = "Data published to Pub/Sub";

/// POST /publish - Forward the payload to the configured topic
///
/// The payload goes out as compact JSON text. Responds as soon as the message
/// is handed off. The acknowledgement is only logged, so a publish that fails
/// afterwards still answers 200. The wait for it is tracked in
/// `state.background` so shutdown can let it finish.
pub async fn publish(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<MessageResponse>, ApiError> {
    let topic = state.topic_path()?;
    let data = serde_json::to_vec(&payload)?;
    debug!("Publishing {} bytes to {}", data.len(), topic);

    let pending = state.publisher.publish(&topic, data);

    let target = topic.clone();
    state.background.spawn(async move {
        match pending.await {
            Ok(message_id) => debug!("Message {} acknowledged by {}", message_id, target),
            Err(e) => error!("Failed to publish to {}: {}", target, e),
        }
    });

    info!("Handed off payload to {}", topic);
    Ok(Json(MessageResponse::new(PUBLISHED_MESSAGE)))
}
