//! # Error Types
//!
//! This module defines error types used throughout the qrsmith library.

use thiserror::Error;

/// Main error type for qrsmith operations
#[derive(Debug, Error)]
pub enum QrsmithError {
    /// Input validation failure. The message is shown to the user verbatim.
    #[error("{0}")]
    Validation(String),

    /// The uploaded image contained no decodable QR symbol.
    #[error("No QR code found! Please upload a valid QR image.")]
    NoQrFound,

    /// QR symbol encoding error (payload too large, invalid data)
    #[error("QR encoding error: {0}")]
    Encode(String),

    /// Image processing error (decode, resize, byte encoding)
    #[error("Image error: {0}")]
    Image(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
