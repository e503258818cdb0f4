//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub formulary_drugs: usize,
    pub version: &'static str,
}

/// `GET /api/health` — liveness and formulary size.
pub async fn check(State(ctx): State<ApiContext>) -> Result<Json<HealthResponse>, ApiError> {
    Ok(Json(HealthResponse {
        status: "ok",
        formulary_drugs: ctx.analyzer.formulary().len(),
        version: crate::config::APP_VERSION,
    }))
}
