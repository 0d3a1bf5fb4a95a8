//! # Qrsmith - QR Code Generator and Scanner
//!
//! Qrsmith creates QR codes from text, URLs, vCards and email addresses,
//! styled with custom colors and an optional embedded logo, and decodes
//! QR codes from uploaded images. It provides:
//!
//! - **Generation pipeline**: validate → payload string → QR symbol →
//!   raster/SVG bytes
//! - **Post-processing**: centered logo overlay and background-aware
//!   auto-crop
//! - **Scanning**: first-symbol decoding of raster images
//! - **Web UI**: an axum HTTP server with a two-tab frontend
//!
//! ## Quick Start
//!
//! ```
//! use qrsmith::{
//!     generate::generate,
//!     model::{OutputFormat, QrPayload, QrRequest},
//! };
//!
//! let mut request = QrRequest::new(QrPayload::TextUrl {
//!     text: "https://example.com".to_string(),
//! });
//! request.format = OutputFormat::Png;
//!
//! let artifact = generate(&request)?;
//! assert_eq!(artifact.mime, "image/png");
//! assert_eq!(artifact.download_name(), "qr_code.png");
//! # Ok::<(), qrsmith::error::QrsmithError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`model`] | Typed request, colors, formats, fingerprint |
//! | [`validate`] | Per-type input validation |
//! | [`content`] | Payload string builder (text, mailto, vCard) |
//! | [`render`] | QR encoding and raster/SVG serialization |
//! | [`compose`] | Logo overlay, auto-crop, PNG/JPEG encoding |
//! | [`scan`] | QR decoding of uploaded images |
//! | [`session`] | Artifact store with input-change invalidation |
//! | [`generate`] | The full generation pipeline |
//! | [`server`] | HTTP server and web UI |
//! | [`error`] | Error types |

pub mod compose;
pub mod content;
pub mod error;
pub mod generate;
pub mod model;
pub mod render;
pub mod scan;
pub mod server;
pub mod session;
pub mod validate;

// Re-exports for convenience
pub use error::QrsmithError;
pub use model::{Artifact, QrPayload, QrRequest};
pub use session::SessionStore;
