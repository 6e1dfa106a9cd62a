//! Process endpoint.

use axum::{extract::State, Json};
use tracing::{info, warn};

use relay_common::MessageResponse;

use super::{AppState, JsonPayload};
use crate::error::ApiError;

pub const PROCESSED_MESSAGE: &str = "Data processed and stored in BigQuery";

/// POST /process - Store the payload as one row in the configured table
pub async fn process(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<Json<MessageResponse>, ApiError> {
    let table_ref = state.table_ref()?;
    let table = state.tables.get_table(&table_ref).await?;

    let errors = state.tables.insert_rows_json(&table, vec![payload]).await?;
    if !errors.is_empty() {
        warn!("Insert into {} rejected: {:?}", table_ref, errors);
        return Err(ApiError::InsertRejected(errors));
    }

    info!("Stored payload in {}", table_ref);
    Ok(Json(MessageResponse::new(PROCESSED_MESSAGE)))
}
