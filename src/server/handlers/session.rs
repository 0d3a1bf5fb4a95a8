//! Session API handlers: input sync, artifact preview and download.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::compose;
use crate::model::{Fingerprint, OutputFormat, QrPayload, QrRequest};

use super::super::state::AppState;
use super::PayloadForm;

/// Request body for the input-sync endpoint.
#[derive(Debug, Deserialize)]
pub struct SyncRequest {
    #[serde(flatten)]
    pub payload: PayloadForm,
    #[serde(default)]
    pub has_logo: bool,
}

/// Response from the input-sync endpoint.
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    /// True when the stored artifact still matches the posted inputs.
    pub available: bool,
}

/// POST /api/session/:id/sync - reconcile the stored artifact with the
/// current inputs.
///
/// This is the explicit form of the UI's rerun-on-widget-change: the
/// frontend posts the current payload fields after every edit and the
/// server drops the artifact if they no longer match what produced it.
pub async fn sync(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<SyncResponse>, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;
    let payload = req.payload.to_payload()?;
    let fingerprint = fingerprint_for(payload, req.has_logo);

    let mut sessions = state.sessions.write().await;
    let Some(session) = sessions.get_mut(&session_id) else {
        // Nothing stored for this session; there is nothing to serve.
        return Ok(Json(SyncResponse { available: false }));
    };
    session.touch();
    let available = session.store.sync(fingerprint);
    Ok(Json(SyncResponse { available }))
}

/// GET /api/session/:id/preview - PNG preview of the stored artifact.
pub async fn preview(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;

    let preview = {
        let mut sessions = state.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or((StatusCode::NOT_FOUND, "Session not found or expired".to_string()))?;
        session.touch();
        session
            .store
            .artifact()
            .and_then(|a| a.preview.clone())
            .ok_or((StatusCode::NOT_FOUND, "No preview available".to_string()))?
    };

    let png_bytes = tokio::task::spawn_blocking(move || {
        compose::encode_bytes(&preview, OutputFormat::Png)
    })
    .await
    .map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Task error: {e}"),
        )
    })?
    .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png_bytes))
}

/// GET /api/session/:id/download - the artifact bytes as an attachment.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = parse_session_id(&id)?;

    let mut sessions = state.sessions.write().await;
    let session = sessions
        .get_mut(&session_id)
        .ok_or((StatusCode::NOT_FOUND, "Session not found or expired".to_string()))?;
    session.touch();
    let artifact = session
        .store
        .artifact()
        .ok_or((StatusCode::NOT_FOUND, "No QR code generated yet".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, artifact.mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.download_name()),
            ),
        ],
        artifact.bytes.clone(),
    ))
}

fn parse_session_id(id: &str) -> Result<Uuid, (StatusCode, String)> {
    Uuid::parse_str(id).map_err(|_| (StatusCode::BAD_REQUEST, "Invalid session ID".to_string()))
}

/// Fingerprint from synced inputs. The logo never travels with a sync
/// request, so a placeholder image stands in for its presence bit.
fn fingerprint_for(payload: QrPayload, has_logo: bool) -> Fingerprint {
    let mut request = QrRequest::new(payload);
    if has_logo {
        request.logo = Some(image::DynamicImage::new_rgba8(1, 1));
    }
    Fingerprint::of(&request)
}
