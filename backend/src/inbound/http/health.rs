//! Health check handler.

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::inbound::http::ApiResult;

/// Health payload: process liveness plus the server's clock.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

/// Liveness probe. Deliberately does not touch the store.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tags = ["health"],
    operation_id = "health",
    security([])
)]
#[get("/health")]
pub async fn health() -> ApiResult<web::Json<HealthResponse>> {
    Ok(web::Json(HealthResponse {
        status: "ok".to_owned(),
        timestamp: Utc::now(),
    }))
}
