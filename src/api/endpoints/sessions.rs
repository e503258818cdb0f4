//! Selection-session endpoints: the dashboard interaction cycle as a
//! service. The clinician's chosen drugs live in an explicit session,
//! never in process-global state.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::drugs::{run_panel, PanelResponse};
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::report;

#[derive(Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

/// `POST /api/sessions` — open a new selection session.
pub async fn create(State(ctx): State<ApiContext>) -> Result<Json<SessionCreatedResponse>, ApiError> {
    let session_id = ctx.sessions()?.create();
    Ok(Json(SessionCreatedResponse { session_id }))
}

#[derive(Deserialize)]
pub struct SelectionRequest {
    pub drugs: Vec<String>,
}

#[derive(Serialize)]
pub struct SelectionResponse {
    pub session_id: Uuid,
    pub selected: Vec<String>,
}

/// `PUT /api/sessions/:id/selection` — replace the session's drugs.
pub async fn set_selection(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let mut store = ctx.sessions()?;
    store.set_selection(&session_id, request.drugs)?;
    let selected = store
        .get(&session_id)
        .map(|s| s.selected().to_vec())
        .unwrap_or_default();
    Ok(Json(SelectionResponse {
        session_id,
        selected,
    }))
}

/// `GET /api/sessions/:id/panel` — analyze the session's selection.
pub async fn panel(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PanelResponse>, ApiError> {
    let cards = run_panel(&ctx, session_selection(&ctx, &session_id)?).await?;
    Ok(Json(PanelResponse {
        cards,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

/// `GET /api/sessions/:id/report` — PDF export of the panel.
pub async fn pdf_report(
    State(ctx): State<ApiContext>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let cards = run_panel(&ctx, session_selection(&ctx, &session_id)?).await?;
    let bytes = report::generate_panel_pdf(&cards)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"latimed-panel.pdf\"",
        )
        .body(Body::from(bytes))
        .map_err(|e| ApiError::Internal(format!("response build error: {e}")))
}

/// Snapshot the session's selection under the store lock.
fn session_selection(ctx: &ApiContext, session_id: &Uuid) -> Result<Vec<String>, ApiError> {
    let store = ctx.sessions()?;
    let session = store
        .get(session_id)
        .ok_or_else(|| ApiError::NotFound(format!("Session {session_id} not found")))?;
    Ok(session.selected().to_vec())
}
