//! Scan-tab API handler: upload an image, decode the first QR symbol.

use axum::{extract::Multipart, http::StatusCode, Json};
use serde::Serialize;

use crate::error::QrsmithError;
use crate::scan;

/// Response from the scan endpoint. The frontend re-displays the
/// uploaded image itself; width/height echo what the server decoded.
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub width: u32,
    pub height: u32,
}

/// POST /api/scan - decode the first QR symbol in an uploaded image.
///
/// A missing symbol is a normal outcome (`found: false` with the
/// user-facing message); an undecodable image is a client error.
pub async fn scan(mut multipart: Multipart) -> Result<Json<ScanResponse>, (StatusCode, String)> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
    {
        if field.name().unwrap_or("") == "image" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read image: {e}")))?;
            image_data = Some(bytes.to_vec());
            break;
        }
    }

    let image_bytes =
        image_data.ok_or((StatusCode::BAD_REQUEST, "No image field found".to_string()))?;

    let img = image::load_from_memory(&image_bytes)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to decode image: {e}")))?;
    let (width, height) = (img.width(), img.height());

    // Move CPU-intensive work to blocking thread pool
    let result = tokio::task::spawn_blocking(move || scan::decode_first(&img))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Task error: {e}"),
            )
        })?;

    let response = match result {
        Ok(data) => {
            println!("[scan] decoded {} bytes from {}x{} image", data.len(), width, height);
            ScanResponse {
                found: true,
                data: Some(data),
                error: None,
                width,
                height,
            }
        }
        Err(err @ QrsmithError::NoQrFound) => ScanResponse {
            found: false,
            data: None,
            error: Some(err.to_string()),
            width,
            height,
        },
        Err(other) => {
            return Err((StatusCode::INTERNAL_SERVER_ERROR, other.to_string()));
        }
    };

    Ok(Json(response))
}
