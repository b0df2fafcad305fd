//! Input validation helpers
//!
//! Text length limits and checks shared by the store mutators.

use crate::core::error::{DeskError, DeskResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: client, product, device model, settings entries
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, issue text
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, SKU, passcode
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> DeskResult<()> {
    if value.trim().is_empty() {
        return Err(DeskError::InvalidInput(format!("{field} must not be empty")));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that a string, possibly empty, is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> DeskResult<()> {
    if value.len() > max_len {
        return Err(DeskError::InvalidInput(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> DeskResult<()> {
    if let Some(v) = value {
        validate_text_len(v, field, max_len)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Apple", "brand", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "brand", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "brand", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "note", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "note", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "note", MAX_NOTE_LEN).is_err());
    }
}
