//! # Image Post-Processing
//!
//! The raster pipeline after QR rendering: center an optional logo over
//! the symbol, crop away the uniform background border, and encode the
//! result to PNG or JPEG bytes.

use image::{imageops, imageops::FilterType, DynamicImage, RgbImage, RgbaImage};

use crate::error::QrsmithError;
use crate::model::{Color, OutputFormat};

/// Logo edge length as a fraction of the QR image width. Kept small so
/// the symbol stays scannable; callers should pair a logo with error
/// correction level Q or H.
const LOGO_FRACTION: u32 = 6;

/// JPEG encoding quality.
const JPEG_QUALITY: u8 = 95;

/// Alpha-composite a logo centered over the QR raster.
///
/// The logo is resized to a square of one-sixth of the QR width with
/// Lanczos3 and blended using its own alpha channel, so transparent logo
/// regions leave the modules underneath visible.
pub fn overlay_logo(qr: &mut RgbaImage, logo: &DynamicImage) {
    let size = (qr.width() / LOGO_FRACTION).max(1);
    let logo = logo.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
    let pos = ((qr.width() - size) / 2) as i64;
    imageops::overlay(qr, &logo, pos, pos);
}

/// Crop the image to the bounding box of all pixels whose RGB value
/// differs from `background`.
///
/// An image with no such pixels is returned unchanged; this must not
/// fail or produce a zero-size crop on an all-background image.
pub fn autocrop(img: &RgbaImage, background: Color) -> RgbaImage {
    let bg = [background.r, background.g, background.b];

    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for (x, y, pixel) in img.enumerate_pixels() {
        if pixel.0[..3] != bg {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            any = true;
        }
    }

    if !any {
        return img.clone();
    }

    imageops::crop_imm(img, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image()
}

/// Encode a raster image to bytes in the requested format.
///
/// PNG keeps the alpha channel; JPEG flattens to RGB and encodes at
/// quality 95. SVG is not a raster format and is rejected here.
pub fn encode_bytes(img: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>, QrsmithError> {
    let mut buffer = Vec::new();
    match format {
        OutputFormat::Png => {
            let encoder = image::codecs::png::PngEncoder::new(&mut buffer);
            img.write_with_encoder(encoder)
                .map_err(|e| QrsmithError::Image(format!("PNG encoding failed: {e}")))?;
        }
        OutputFormat::Jpg | OutputFormat::Jpeg => {
            let rgb: RgbImage = DynamicImage::ImageRgba8(img.clone()).to_rgb8();
            let encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, JPEG_QUALITY);
            rgb.write_with_encoder(encoder)
                .map_err(|e| QrsmithError::Image(format!("JPEG encoding failed: {e}")))?;
        }
        OutputFormat::Svg => {
            return Err(QrsmithError::Image(
                "SVG is not a raster format".to_string(),
            ));
        }
    }
    Ok(buffer)
}
