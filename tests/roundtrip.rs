//! # Round-Trip Tests
//!
//! End-to-end checks over the public pipeline: a payload encoded into a
//! rendered image must decode back to exactly the same payload, and the
//! session store must never serve an artifact built from stale inputs.

use image::DynamicImage;
use pretty_assertions::assert_eq;

use qrsmith::generate::generate;
use qrsmith::model::{Color, ErrorLevel, Fingerprint, OutputFormat, QrPayload, QrRequest};
use qrsmith::scan::decode_first;
use qrsmith::session::SessionStore;

fn text_request(text: &str) -> QrRequest {
    QrRequest::new(QrPayload::TextUrl { text: text.into() })
}

/// Pad a cropped QR with a background margin, like a scanner seeing the
/// code against a backdrop. Auto-crop strips the quiet zone, and the
/// detector needs one to lock onto the finder patterns.
fn with_margin(img: &image::RgbaImage, background: Color) -> DynamicImage {
    const MARGIN: u32 = 24;
    let mut padded = image::RgbaImage::from_pixel(
        img.width() + 2 * MARGIN,
        img.height() + 2 * MARGIN,
        background.to_rgba(),
    );
    image::imageops::overlay(&mut padded, img, MARGIN as i64, MARGIN as i64);
    DynamicImage::ImageRgba8(padded)
}

/// Decode the artifact's preview image back to its payload string.
fn decode_preview(request: &QrRequest) -> String {
    let artifact = generate(request).expect("generation should succeed");
    let preview = artifact.preview.expect("raster artifact carries a preview");
    decode_first(&with_margin(&preview, request.background)).expect("rendered QR should decode")
}

#[test]
fn text_url_round_trips_through_png() {
    let mut request = text_request("https://example.com");
    request.error_level = ErrorLevel::M;
    request.scale = 5;

    let artifact = generate(&request).unwrap();
    assert_eq!(artifact.mime, "image/png");

    // Decode the actual PNG bytes, not just the in-memory preview.
    let reloaded = image::load_from_memory(&artifact.bytes).unwrap().to_rgba8();
    let decoded = decode_first(&with_margin(&reloaded, request.background)).unwrap();
    assert_eq!(decoded, "https://example.com");
}

#[test]
fn email_round_trips_with_mailto_prefix() {
    let request = QrRequest::new(QrPayload::Email {
        address: "contact@example.com".into(),
    });
    assert_eq!(decode_preview(&request), "mailto:contact@example.com");
}

#[test]
fn vcard_round_trips_whole_block() {
    let request = QrRequest::new(QrPayload::Vcard {
        name: "John Doe".into(),
        phone: "+1234567890".into(),
        email: String::new(),
    });
    let decoded = decode_preview(&request);
    let lines: Vec<&str> = decoded.lines().collect();
    assert_eq!(
        lines,
        [
            "BEGIN:VCARD",
            "VERSION:3.0",
            "N:John Doe",
            "FN:John Doe",
            "TEL;TYPE=CELL:+1234567890",
            "END:VCARD",
        ]
    );
    assert!(!decoded.contains("EMAIL;"));
}

#[test]
fn round_trip_survives_custom_colors_and_logo() {
    // A logo at level H occludes some modules; error correction absorbs it.
    let mut request = text_request("https://example.com/with-logo");
    request.error_level = ErrorLevel::H;
    request.scale = 6;
    request.foreground = Color::from_hex("#101040").unwrap();
    request.logo = Some(DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
        24,
        24,
        image::Rgba([255, 120, 0, 255]),
    )));

    assert_eq!(decode_preview(&request), "https://example.com/with-logo");
}

#[test]
fn invalid_phone_fails_before_rendering() {
    let request = QrRequest::new(QrPayload::Vcard {
        name: "John Doe".into(),
        phone: "12345".into(),
        email: String::new(),
    });
    let err = generate(&request).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid phone number (use + followed by 10-15 digits)."
    );
}

#[test]
fn session_store_drops_artifact_when_payload_changes() {
    let mut store = SessionStore::new();
    let request = text_request("first");
    let artifact = generate(&request).unwrap();
    store.store(artifact, Fingerprint::of(&request));
    assert!(store.artifact().is_some());

    // Same inputs: artifact survives.
    assert!(store.sync(Fingerprint::of(&request)));

    // Format-only change: artifact survives (format is not fingerprinted).
    let mut format_change = request.clone();
    format_change.format = OutputFormat::Jpeg;
    assert!(store.sync(Fingerprint::of(&format_change)));

    // Payload change: artifact dropped before the next render.
    assert!(!store.sync(Fingerprint::of(&text_request("second"))));
    assert!(store.artifact().is_none());
}

#[test]
fn autocrop_is_a_noop_without_foreground_pixels() {
    use qrsmith::compose::autocrop;

    let blank = image::RgbaImage::from_pixel(32, 32, Color::WHITE.to_rgba());
    let cropped = autocrop(&blank, Color::WHITE);
    assert_eq!(cropped, blank);
}
