//! Generate-tab API handlers: multipart generate endpoint.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::error::QrsmithError;
use crate::generate as pipeline;
use crate::model::{Color, ErrorLevel, Fingerprint, OutputFormat, QrRequest};

use super::super::state::{AppState, Session, SESSION_EXPIRATION_SECS};
use super::PayloadForm;

/// Response from the generate endpoint.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Session id to use for preview/download/sync calls.
    pub session: String,
    pub mime: &'static str,
    pub extension: &'static str,
    pub size: usize,
    /// True when a raster preview is available.
    pub preview: bool,
}

/// POST /api/generate - run the full generate pipeline.
///
/// Multipart form: payload fields (`type`, `text`, `name`, `phone`,
/// `email`), styling (`fg`, `bg`, `scale`, `error`, `format`), an
/// optional `logo` file part, and an optional `session` id to reuse.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, (StatusCode, String)> {
    cleanup_expired_sessions(&state).await;

    let mut form = PayloadForm::default();
    let mut fg = String::from("#000000");
    let mut bg = String::from("#FFFFFF");
    let mut scale = 5u32;
    let mut error_level = ErrorLevel::M;
    let mut format = OutputFormat::Png;
    let mut logo_bytes: Option<Vec<u8>> = None;
    let mut session_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "logo" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read logo: {e}")))?;
            if !bytes.is_empty() {
                logo_bytes = Some(bytes.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read field: {e}")))?;
        match name.as_str() {
            "type" => form.kind = value,
            "text" => form.text = value,
            "name" => form.name = value,
            "phone" => form.phone = value,
            "email" => form.email = value,
            "fg" => fg = value,
            "bg" => bg = value,
            "scale" => {
                scale = value
                    .parse::<u32>()
                    .map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid scale: {value}")))?
                    .clamp(1, 10);
            }
            "error" => {
                error_level = ErrorLevel::parse(&value).ok_or((
                    StatusCode::BAD_REQUEST,
                    format!("Invalid error correction level: {value}"),
                ))?;
            }
            "format" => {
                format = OutputFormat::parse(&value).ok_or((
                    StatusCode::BAD_REQUEST,
                    format!("Invalid output format: {value}"),
                ))?;
            }
            "session" => {
                session_id = Some(Uuid::parse_str(&value).map_err(|_| {
                    (StatusCode::BAD_REQUEST, "Invalid session ID".to_string())
                })?);
            }
            _ => {}
        }
    }

    let payload = form.to_payload()?;
    let logo = match logo_bytes {
        Some(bytes) => Some(image::load_from_memory(&bytes).map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                format!("Failed to decode logo: {e}"),
            )
        })?),
        None => None,
    };

    let request = QrRequest {
        payload,
        foreground: parse_color(&fg)?,
        background: parse_color(&bg)?,
        scale,
        error_level,
        logo,
        format,
    };
    let fingerprint = Fingerprint::of(&request);

    // Move CPU-intensive work to blocking thread pool
    let artifact = tokio::task::spawn_blocking(move || pipeline::generate(&request))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task error: {e}"),
            )
        })?
        .map_err(error_status)?;

    let session_id = session_id.unwrap_or_else(Uuid::new_v4);
    let response = GenerateResponse {
        session: session_id.to_string(),
        mime: artifact.mime,
        extension: artifact.extension,
        size: artifact.bytes.len(),
        preview: artifact.preview.is_some(),
    };

    {
        let mut sessions = state.sessions.write().await;
        let session = sessions.entry(session_id).or_insert_with(Session::new);
        session.touch();
        session.store.sync(fingerprint.clone());
        session.store.store(artifact, fingerprint);
    }

    println!(
        "[generate] session={} format={} {} bytes",
        response.session, response.extension, response.size
    );
    Ok(Json(response))
}

fn parse_color(hex: &str) -> Result<Color, (StatusCode, String)> {
    Color::from_hex(hex).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

/// Map pipeline failures to HTTP statuses. Validation messages travel to
/// the client verbatim.
fn error_status(err: QrsmithError) -> (StatusCode, String) {
    match err {
        QrsmithError::Validation(message) => (StatusCode::BAD_REQUEST, message),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// Clean up expired sessions.
pub(super) async fn cleanup_expired_sessions(state: &AppState) {
    let now = Instant::now();
    let mut sessions = state.sessions.write().await;
    sessions.retain(|_, session| {
        now.duration_since(session.last_accessed).as_secs() < SESSION_EXPIRATION_SECS
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let (status, message) =
            error_status(QrsmithError::Validation("Please enter Text or URL.".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Please enter Text or URL.");
    }

    #[test]
    fn test_other_errors_map_to_server_error() {
        let (status, _) = error_status(QrsmithError::Encode("too long".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_generate_response_wire_shape() {
        let response = GenerateResponse {
            session: "abc".into(),
            mime: "image/png",
            extension: "png",
            size: 1234,
            preview: true,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "session": "abc",
                "mime": "image/png",
                "extension": "png",
                "size": 1234,
                "preview": true,
            })
        );
    }
}
