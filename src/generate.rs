//! # Generation Flow
//!
//! The single orchestration pipeline: validate the payload, build the
//! content string, render the symbol, post-process raster output, and
//! package the result as a downloadable artifact.

use crate::compose;
use crate::content;
use crate::error::QrsmithError;
use crate::model::{Artifact, QrRequest};
use crate::render;
use crate::validate;

/// Run the full generate pipeline for one request.
///
/// Raster formats (PNG/JPG/JPEG) go through logo overlay and auto-crop
/// and carry a preview image; SVG is serialized directly by the encoder
/// with no post-processing and no preview.
pub fn generate(request: &QrRequest) -> Result<Artifact, QrsmithError> {
    validate::validate(&request.payload)?;

    let payload = content::payload_string(&request.payload);
    let code = render::encode(&payload, request.error_level)?;

    if !request.format.is_raster() {
        let bytes = render::to_svg(&code, request.scale, request.foreground, request.background);
        return Ok(Artifact {
            bytes,
            mime: request.format.mime(),
            extension: request.format.extension(),
            preview: None,
        });
    }

    let mut img = render::to_raster(&code, request.scale, request.foreground, request.background);
    if let Some(logo) = &request.logo {
        compose::overlay_logo(&mut img, logo);
    }
    let img = compose::autocrop(&img, request.background);
    let bytes = compose::encode_bytes(&img, request.format)?;

    Ok(Artifact {
        bytes,
        mime: request.format.mime(),
        extension: request.format.extension(),
        preview: Some(img),
    })
}
