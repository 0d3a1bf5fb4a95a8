//! # QR Rendering
//!
//! Encodes a payload string into a QR symbol (delegated to the `qrcode`
//! crate) and serializes it to a colored raster image or an SVG document.
//!
//! Raster output paints each module as a `scale`x`scale` pixel block and
//! surrounds the grid with a quiet zone in the background color.

use image::RgbaImage;
use qrcode::QrCode;

use crate::error::QrsmithError;
use crate::model::{Color, ErrorLevel};

/// Quiet zone width in modules, per the QR spec.
const QUIET_ZONE_MODULES: u32 = 4;

/// Encode a payload at the requested error correction level.
pub fn encode(payload: &str, level: ErrorLevel) -> Result<QrCode, QrsmithError> {
    QrCode::with_error_correction_level(payload, level.into())
        .map_err(|e| QrsmithError::Encode(e.to_string()))
}

/// Serialize a QR symbol to an RGBA raster image.
///
/// `scale` is the module pixel size (clamped to at least 1). Dark modules
/// use `foreground`, light modules and the quiet zone use `background`.
pub fn to_raster(code: &QrCode, scale: u32, foreground: Color, background: Color) -> RgbaImage {
    let scale = scale.max(1);
    let modules = code.width() as u32;
    let size = (modules + 2 * QUIET_ZONE_MODULES) * scale;

    let fg = foreground.to_rgba();
    let bg = background.to_rgba();
    let mut img = RgbaImage::from_pixel(size, size, bg);

    let offset = QUIET_ZONE_MODULES * scale;
    for qy in 0..modules {
        for qx in 0..modules {
            if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(offset + qx * scale + dx, offset + qy * scale + dy, fg);
                }
            }
        }
    }

    img
}

/// Serialize a QR symbol to an SVG document with the given colors.
pub fn to_svg(code: &QrCode, scale: u32, foreground: Color, background: Color) -> Vec<u8> {
    use qrcode::render::svg;

    let scale = scale.max(1);
    let fg_hex = foreground.to_hex();
    let bg_hex = background.to_hex();
    let svg = code
        .render::<svg::Color>()
        .quiet_zone(true)
        .module_dimensions(scale, scale)
        .dark_color(svg::Color(&fg_hex))
        .light_color(svg::Color(&bg_hex))
        .build();
    svg.into_bytes()
}
