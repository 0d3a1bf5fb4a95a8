//! HTTP API handlers.

pub mod generate;
pub mod scan;
pub mod session;

use axum::http::StatusCode;
use serde::Deserialize;

use crate::model::QrPayload;

/// Payload fields as submitted by the frontend, shared between the
/// generate form and the input-sync endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct PayloadForm {
    /// "Text/URL", "vCard" or "Email"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl PayloadForm {
    /// Build the typed payload. Unknown type labels are a client error.
    pub fn to_payload(&self) -> Result<QrPayload, (StatusCode, String)> {
        match self.kind.as_str() {
            "Text/URL" => Ok(QrPayload::TextUrl {
                text: self.text.clone(),
            }),
            "vCard" => Ok(QrPayload::Vcard {
                name: self.name.clone(),
                phone: self.phone.clone(),
                email: self.email.clone(),
            }),
            "Email" => Ok(QrPayload::Email {
                address: self.email.clone(),
            }),
            other => Err((
                StatusCode::BAD_REQUEST,
                format!("Unknown QR type: {other}"),
            )),
        }
    }
}
