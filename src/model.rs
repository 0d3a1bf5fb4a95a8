//! # Request Model
//!
//! Typed model for a single QR generation request: the payload variants,
//! styling options, output format, and the input fingerprint used to
//! invalidate stale artifacts.

use image::DynamicImage;

use crate::error::QrsmithError;

/// What the QR code should encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayload {
    /// Plain text or a URL, encoded as-is.
    TextUrl { text: String },
    /// A contact card. Name and phone are required, email is optional.
    Vcard {
        name: String,
        phone: String,
        email: String,
    },
    /// An email address, encoded as a `mailto:` URI.
    Email { address: String },
}

/// QR error correction level.
///
/// Use [`ErrorLevel::Q`] or [`ErrorLevel::H`] when embedding a logo so the
/// symbol stays scannable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorLevel {
    /// ~7% recovery
    L,
    /// ~15% recovery - default
    #[default]
    M,
    /// ~25% recovery
    Q,
    /// ~30% recovery
    H,
}

impl ErrorLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Some(ErrorLevel::L),
            "M" => Some(ErrorLevel::M),
            "Q" => Some(ErrorLevel::Q),
            "H" => Some(ErrorLevel::H),
            _ => None,
        }
    }
}

impl From<ErrorLevel> for qrcode::EcLevel {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::L => qrcode::EcLevel::L,
            ErrorLevel::M => qrcode::EcLevel::M,
            ErrorLevel::Q => qrcode::EcLevel::Q,
            ErrorLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// Download format for the rendered QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpg,
    Jpeg,
    Svg,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PNG" => Some(OutputFormat::Png),
            "JPG" => Some(OutputFormat::Jpg),
            "JPEG" => Some(OutputFormat::Jpeg),
            "SVG" => Some(OutputFormat::Svg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpg | OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Svg => "image/svg+xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Svg => "svg",
        }
    }

    /// Raster formats go through the image post-processing pipeline;
    /// SVG is serialized directly by the encoder.
    pub fn is_raster(&self) -> bool {
        !matches!(self, OutputFormat::Svg)
    }
}

/// An RGB color, parsed from `#RRGGBB` hex notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex color.
    pub fn from_hex(hex: &str) -> Result<Self, QrsmithError> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(QrsmithError::Image(format!("Invalid hex color: {hex}")));
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap();
        Ok(Color {
            r: byte(0),
            g: byte(2),
            b: byte(4),
        })
    }

    /// Format back to `#rrggbb` for SVG output.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_rgba(&self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

/// A full QR generation request, built fresh from the current inputs on
/// every interaction. Never persisted.
#[derive(Debug, Clone)]
pub struct QrRequest {
    pub payload: QrPayload,
    pub foreground: Color,
    pub background: Color,
    /// Module pixel size, 1-10.
    pub scale: u32,
    pub error_level: ErrorLevel,
    pub logo: Option<DynamicImage>,
    pub format: OutputFormat,
}

impl QrRequest {
    pub fn new(payload: QrPayload) -> Self {
        Self {
            payload,
            foreground: Color::BLACK,
            background: Color::WHITE,
            scale: 5,
            error_level: ErrorLevel::M,
            logo: None,
            format: OutputFormat::Png,
        }
    }
}

/// Value-compared key over the inputs that invalidate a stored artifact:
/// the payload fields and whether a logo is attached.
///
/// Colors, scale, error level and output format are deliberately not part
/// of the fingerprint; changing only those keeps the previous artifact
/// until the next generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    payload: QrPayload,
    has_logo: bool,
}

impl Fingerprint {
    pub fn of(request: &QrRequest) -> Self {
        Self {
            payload: request.payload.clone(),
            has_logo: request.logo.is_some(),
        }
    }
}

/// A rendered QR artifact ready for download.
#[derive(Debug)]
pub struct Artifact {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub extension: &'static str,
    /// Decoded raster image for on-screen preview. None for SVG output.
    pub preview: Option<image::RgbaImage>,
}

impl Artifact {
    pub fn download_name(&self) -> String {
        format!("qr_code.{}", self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#1a2B3c").unwrap();
        assert_eq!(c, Color { r: 0x1a, g: 0x2b, b: 0x3c });
        assert_eq!(c.to_hex(), "#1a2b3c");
    }

    #[test]
    fn test_color_without_hash() {
        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::WHITE);
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_format_mime_and_extension() {
        assert_eq!(OutputFormat::Png.mime(), "image/png");
        assert_eq!(OutputFormat::Jpg.mime(), "image/jpeg");
        assert_eq!(OutputFormat::Jpeg.mime(), "image/jpeg");
        assert_eq!(OutputFormat::Svg.mime(), "image/svg+xml");
        assert_eq!(OutputFormat::Jpg.extension(), "jpg");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
        assert!(!OutputFormat::Svg.is_raster());
        assert!(OutputFormat::Png.is_raster());
    }

    #[test]
    fn test_error_level_parse() {
        assert_eq!(ErrorLevel::parse("q"), Some(ErrorLevel::Q));
        assert_eq!(ErrorLevel::parse(" H "), Some(ErrorLevel::H));
        assert_eq!(ErrorLevel::parse("X"), None);
    }

    #[test]
    fn test_fingerprint_ignores_styling() {
        let mut req = QrRequest::new(QrPayload::TextUrl {
            text: "https://example.com".into(),
        });
        let before = Fingerprint::of(&req);

        req.scale = 9;
        req.error_level = ErrorLevel::H;
        req.format = OutputFormat::Svg;
        req.foreground = Color::from_hex("#ff0000").unwrap();
        assert_eq!(before, Fingerprint::of(&req));
    }

    #[test]
    fn test_fingerprint_tracks_payload_and_logo() {
        let req = QrRequest::new(QrPayload::TextUrl {
            text: "one".into(),
        });
        let other = QrRequest::new(QrPayload::TextUrl {
            text: "two".into(),
        });
        assert_ne!(Fingerprint::of(&req), Fingerprint::of(&other));

        let mut with_logo = req.clone();
        with_logo.logo = Some(image::DynamicImage::new_rgba8(4, 4));
        assert_ne!(Fingerprint::of(&req), Fingerprint::of(&with_logo));
    }

    #[test]
    fn test_fingerprint_distinguishes_vcard_field_boundaries() {
        // A concatenation-based fingerprint would collide on these.
        let a = QrRequest::new(QrPayload::Vcard {
            name: "ab".into(),
            phone: "c".into(),
            email: String::new(),
        });
        let b = QrRequest::new(QrPayload::Vcard {
            name: "a".into(),
            phone: "bc".into(),
            email: String::new(),
        });
        assert_ne!(Fingerprint::of(&a), Fingerprint::of(&b));
    }
}
