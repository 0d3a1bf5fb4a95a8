//! # QR Decoding
//!
//! Wraps the `rqrr` detector: find QR grids in an uploaded raster image
//! and return the first decoded payload.

use image::DynamicImage;

use crate::error::QrsmithError;

/// Decode the first QR symbol found in the image.
///
/// Returns `QrsmithError::NoQrFound` when the detector reports no grids
/// or none of them decodes cleanly.
pub fn decode_first(img: &DynamicImage) -> Result<String, QrsmithError> {
    let luma = img.to_luma8();
    let (width, height) = luma.dimensions();
    let mut prepared =
        rqrr::PreparedImage::prepare_from_greyscale(width as usize, height as usize, |x, y| {
            luma.get_pixel(x as u32, y as u32).0[0]
        });

    for grid in prepared.detect_grids() {
        if let Ok((_meta, content)) = grid.decode() {
            return Ok(content);
        }
    }

    Err(QrsmithError::NoQrFound)
}
