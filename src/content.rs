//! # Payload String Builder
//!
//! Turns a validated payload into the exact string handed to the QR
//! encoder: raw text, a `mailto:` URI, or a vCard 3.0 block.

use crate::model::QrPayload;

/// Build the string that will be encoded into the QR symbol.
pub fn payload_string(payload: &QrPayload) -> String {
    match payload {
        QrPayload::TextUrl { text } => text.clone(),
        QrPayload::Email { address } => format!("mailto:{address}"),
        QrPayload::Vcard { name, phone, email } => vcard_string(name, phone, email),
    }
}

/// vCard 3.0 text block. TEL and EMAIL lines appear only when the
/// corresponding field is non-empty; line order is fixed.
pub fn vcard_string(name: &str, phone: &str, email: &str) -> String {
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{name}"),
        format!("FN:{name}"),
    ];
    if !phone.is_empty() {
        lines.push(format!("TEL;TYPE=CELL:{phone}"));
    }
    if !email.is_empty() {
        lines.push(format!("EMAIL;TYPE=INTERNET:{email}"));
    }
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_passes_through() {
        let payload = QrPayload::TextUrl {
            text: "https://example.com".into(),
        };
        assert_eq!(payload_string(&payload), "https://example.com");
    }

    #[test]
    fn test_email_gets_mailto_prefix() {
        let payload = QrPayload::Email {
            address: "contact@example.com".into(),
        };
        assert_eq!(payload_string(&payload), "mailto:contact@example.com");
    }

    #[test]
    fn test_vcard_full() {
        let s = vcard_string("John Doe", "+1234567890", "john@example.com");
        assert_eq!(
            s,
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             N:John Doe\n\
             FN:John Doe\n\
             TEL;TYPE=CELL:+1234567890\n\
             EMAIL;TYPE=INTERNET:john@example.com\n\
             END:VCARD"
        );
    }

    #[test]
    fn test_vcard_without_email_has_five_lines() {
        let s = vcard_string("John Doe", "+1234567890", "");
        let lines: Vec<&str> = s.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.first(), Some(&"BEGIN:VCARD"));
        assert_eq!(lines.last(), Some(&"END:VCARD"));
        assert!(!s.contains("EMAIL;"));
        assert!(s.contains("TEL;TYPE=CELL:+1234567890"));
    }

    #[test]
    fn test_vcard_framing() {
        let s = vcard_string("A", "1234567890", "a@b.co");
        assert!(s.starts_with("BEGIN:VCARD"));
        assert!(s.ends_with("END:VCARD"));
    }
}
