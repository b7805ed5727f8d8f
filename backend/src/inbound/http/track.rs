//! Public ingestion handler.
//!
//! ```text
//! POST /api/track {"apiKey":"dp_...","formId":"contact","data":{...}}
//! ```

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, NewSubmission};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Ingestion request body. Everything except `apiKey` is optional.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    pub api_key: Option<String>,
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub submission: NewSubmission,
}

/// Ingestion acknowledgement.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TrackResponse {
    pub success: bool,
    #[schema(value_type = String, format = Uuid)]
    pub id: uuid::Uuid,
}

/// Capture a form submission.
///
/// Possession of a valid API key is the only authorization; there is no
/// session. The `data` payload is stored without inspection.
#[utoipa::path(
    post,
    path = "/api/track",
    request_body = TrackRequest,
    responses(
        (status = 201, description = "Submission captured", body = TrackResponse),
        (status = 401, description = "Invalid API key", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["track"],
    operation_id = "track",
    security([])
)]
#[post("/track")]
pub async fn track(
    state: web::Data<HttpState>,
    payload: web::Json<TrackRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let api_key = body
        .api_key
        .ok_or_else(|| Error::invalid_api_key("API key required"))?;
    let id = state.ingestion.track(&api_key, body.submission).await?;
    Ok(HttpResponse::Created().json(TrackResponse {
        success: true,
        id: *id.as_uuid(),
    }))
}
