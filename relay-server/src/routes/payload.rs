//! JSON body extraction shared by `/publish` and `/process`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use tracing::debug;

use relay_common::{is_empty_payload, Payload};

use crate::error::ApiError;

/// A non-empty JSON request body.
///
/// A missing body, a non-JSON content type, unparseable JSON and empty values
/// (`null`, `{}`, `[]`, ...) are all rejected with [`ApiError::NoData`].
/// A body that cannot be read at all (e.g. over the size limit) keeps the
/// status axum gives it.
pub struct JsonPayload(pub Payload);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<Payload>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::BytesRejection(rejection) => ApiError::Body(rejection),
                rejection => {
                    debug!("Rejected request body: {}", rejection.body_text());
                    ApiError::NoData
                }
            })?;

        if is_empty_payload(&payload) {
            debug!("Rejected empty payload");
            return Err(ApiError::NoData);
        }

        Ok(Self(payload))
    }
}
