//! Drug-box photo identification endpoint.

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;

/// Upload cap for box photos.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Serialize)]
pub struct IdentifyResponse {
    pub transcript: String,
    pub candidates: Vec<String>,
}

/// `POST /api/drugs/identify` — multipart `image` field in, formulary
/// candidates out. An OCR failure degrades to 503, never a fault.
pub async fn identify(
    State(ctx): State<ApiContext>,
    mut multipart: Multipart,
) -> Result<Json<IdentifyResponse>, ApiError> {
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let mime_type = field
                .content_type()
                .unwrap_or("image/jpeg")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Cannot read image field: {e}")))?;
            image = Some((data.to_vec(), mime_type));
            break;
        }
    }

    let (bytes, mime_type) = image.ok_or_else(|| {
        ApiError::BadRequest("Missing multipart field \"image\"".into())
    })?;
    if bytes.is_empty() {
        return Err(ApiError::BadRequest("Image field is empty".into()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ApiError::BadRequest(format!(
            "Image too large (max {MAX_IMAGE_BYTES} bytes)"
        )));
    }

    let identifier = ctx.identifier.clone();
    let analyzer = ctx.analyzer.clone();
    let result = tokio::task::spawn_blocking(move || {
        identifier.identify(&bytes, &mime_type, analyzer.formulary())
    })
    .await
    .map_err(|e| ApiError::Internal(format!("identification task failed: {e}")))?;

    match result {
        Ok(identification) => Ok(Json(IdentifyResponse {
            transcript: identification.transcript,
            candidates: identification.candidates,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "Box identification unavailable");
            Err(ApiError::Unavailable(
                "Drug box could not be read right now".into(),
            ))
        }
    }
}
