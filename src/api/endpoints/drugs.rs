//! Drug list and ad-hoc panel analysis endpoints.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analysis::PanelCard;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Cap on drugs analyzed in one request; each miss is a live AI call.
const MAX_PANEL_DRUGS: usize = 24;

#[derive(Serialize)]
pub struct DrugListResponse {
    pub drugs: Vec<String>,
    pub total: usize,
}

/// `GET /api/drugs` — formulary drug names for the selection UI.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DrugListResponse>, ApiError> {
    let drugs = ctx.analyzer.formulary().drug_names();
    let total = drugs.len();
    Ok(Json(DrugListResponse { drugs, total }))
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub drugs: Vec<String>,
}

#[derive(Serialize)]
pub struct PanelResponse {
    pub cards: Vec<PanelCard>,
    pub generated_at: String,
}

/// `POST /api/drugs/analyze` — one card per requested drug.
///
/// Per-drug external failures degrade to `unavailable` cards; the request
/// itself still succeeds.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<PanelResponse>, ApiError> {
    if request.drugs.is_empty() {
        return Err(ApiError::BadRequest("No drugs selected".into()));
    }
    if request.drugs.len() > MAX_PANEL_DRUGS {
        return Err(ApiError::BadRequest(format!(
            "At most {MAX_PANEL_DRUGS} drugs per request"
        )));
    }

    let cards = run_panel(&ctx, request.drugs).await?;
    Ok(Json(PanelResponse {
        cards,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Run a panel analysis off the async runtime — the analyzer's HTTP
/// client is blocking.
pub(crate) async fn run_panel(
    ctx: &ApiContext,
    drugs: Vec<String>,
) -> Result<Vec<PanelCard>, ApiError> {
    let analyzer = ctx.analyzer.clone();
    tokio::task::spawn_blocking(move || analyzer.analyze_panel(&drugs))
        .await
        .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))
}
