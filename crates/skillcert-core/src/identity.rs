//! # Domain Identity Newtypes
//!
//! Newtype wrappers for the two identifier namespaces in the registry:
//! ledger principals (`AccountId`) and credential ids (`CredentialId`).
//! These prevent accidental identifier confusion — you cannot pass a
//! holder account where a credential id is expected, and a credential id
//! can never be mistaken for an issuer.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum length of a ledger principal in characters.
const MAX_ACCOUNT_ID_LEN: usize = 128;

/// An opaque ledger principal: the identity of an issuer, holder, or the
/// administrator.
///
/// The registry never interprets the principal beyond equality; the host
/// ledger's authentication layer is what binds a call to a principal. The
/// constructor enforces shape only: non-empty, at most 128 characters, and
/// printable ASCII with no whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Construct a validated account identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAccountId`] if the input is empty,
    /// longer than 128 characters, or contains non-printable or whitespace
    /// characters.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::InvalidAccountId {
                reason: "must not be empty".to_string(),
            });
        }
        if raw.len() > MAX_ACCOUNT_ID_LEN {
            return Err(ValidationError::InvalidAccountId {
                reason: format!("must not exceed {MAX_ACCOUNT_ID_LEN} characters"),
            });
        }
        if !raw.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ValidationError::InvalidAccountId {
                reason: "must be printable ASCII without whitespace".to_string(),
            });
        }
        Ok(Self(raw))
    }

    /// Access the principal as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier for a credential record.
///
/// Assigned sequentially by the registry starting at 1; ids are dense —
/// the highest id always equals the total number of credentials ever minted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CredentialId(pub u64);

impl CredentialId {
    /// Access the inner numeric id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "credential:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- AccountId ----

    #[test]
    fn test_account_id_accepts_ledger_principal() {
        let id = AccountId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap();
        assert_eq!(id.as_str(), "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
    }

    #[test]
    fn test_account_id_accepts_contract_principal() {
        assert!(AccountId::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM.skill-cert").is_ok());
    }

    #[test]
    fn test_account_id_rejects_empty() {
        assert!(AccountId::new("").is_err());
    }

    #[test]
    fn test_account_id_rejects_whitespace() {
        assert!(AccountId::new("ST1 PQHQ").is_err());
        assert!(AccountId::new("ST1\tPQHQ").is_err());
    }

    #[test]
    fn test_account_id_rejects_control_chars() {
        assert!(AccountId::new("ST1\u{0}PQHQ").is_err());
    }

    #[test]
    fn test_account_id_rejects_overlong() {
        let long = "A".repeat(129);
        assert!(AccountId::new(long).is_err());
        let max = "A".repeat(128);
        assert!(AccountId::new(max).is_ok());
    }

    #[test]
    fn test_account_id_display_is_plain() {
        let id = AccountId::new("ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG").unwrap();
        assert_eq!(format!("{id}"), "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG");
    }

    #[test]
    fn test_account_id_serializes_as_string() {
        let id = AccountId::new("ST1ISSUER").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"ST1ISSUER\"");
    }

    // ---- CredentialId ----

    #[test]
    fn test_credential_id_display_has_prefix() {
        assert_eq!(format!("{}", CredentialId(7)), "credential:7");
    }

    #[test]
    fn test_credential_id_ordering() {
        assert!(CredentialId(1) < CredentialId(2));
    }

    #[test]
    fn test_credential_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&CredentialId(42)).unwrap(), "42");
    }
}
