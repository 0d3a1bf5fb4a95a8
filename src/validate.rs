//! # Input Validation
//!
//! Per-type checks run before any rendering happens. Failure messages are
//! surfaced to the user unmodified, so they are written as user-facing
//! sentences here.

use crate::error::QrsmithError;
use crate::model::QrPayload;

/// Validate a payload before rendering.
///
/// Returns `QrsmithError::Validation` with a user-facing message on
/// failure; callers must not proceed to rendering.
pub fn validate(payload: &QrPayload) -> Result<(), QrsmithError> {
    match payload {
        QrPayload::TextUrl { text } => {
            if text.is_empty() {
                return fail("Please enter Text or URL.");
            }
        }
        QrPayload::Vcard { name, phone, email } => {
            if name.is_empty() || phone.is_empty() {
                return fail("Name and phone number are required.");
            }
            if !phone_is_valid(phone) {
                return fail("Invalid phone number (use + followed by 10-15 digits).");
            }
            if !email.is_empty() && !email_is_valid(email) {
                return fail("Invalid email address.");
            }
        }
        QrPayload::Email { address } => {
            if address.is_empty() {
                return fail("Please enter an email address.");
            }
        }
    }
    Ok(())
}

fn fail(message: &str) -> Result<(), QrsmithError> {
    Err(QrsmithError::Validation(message.to_string()))
}

/// Optional leading `+`, then 10-15 digits, nothing else.
fn phone_is_valid(phone: &str) -> bool {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}

/// `local@domain.tld` shape: non-empty local part, a non-empty host
/// label, then a dot and a non-empty tail. The tail allows any mix of
/// alphanumerics, hyphens and further dots.
fn email_is_valid(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_.+-".contains(c))
    {
        return false;
    }
    let Some((host, tail)) = domain.split_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty() && host.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
    let tail_ok = !tail.is_empty()
        && tail
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    host_ok && tail_ok
}
