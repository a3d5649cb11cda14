//! # Core Validation Errors
//!
//! Errors produced when constructing core types from untrusted input.
//! These are boundary errors — once a value exists as a typed newtype,
//! it is valid by construction.

use thiserror::Error;

/// Validation failure when constructing a core type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A ledger principal failed the account identifier rules.
    #[error("invalid account id: {reason}")]
    InvalidAccountId {
        /// Why the identifier was rejected.
        reason: String,
    },

    /// A bounded text field exceeded its maximum length.
    #[error("{field} exceeds {max} characters (got {len})")]
    TextTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum permitted length in characters.
        max: usize,
        /// Actual length of the rejected value.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_account_id_display() {
        let err = ValidationError::InvalidAccountId {
            reason: "empty".to_string(),
        };
        assert_eq!(err.to_string(), "invalid account id: empty");
    }

    #[test]
    fn test_text_too_long_display() {
        let err = ValidationError::TextTooLong {
            field: "skill_name",
            max: 100,
            len: 140,
        };
        assert_eq!(err.to_string(), "skill_name exceeds 100 characters (got 140)");
    }
}
