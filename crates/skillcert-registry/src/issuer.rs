//! Issuer records: registration state and reputation counters.

use serde::{Deserialize, Serialize};
use skillcert_core::IssuerType;

use crate::error::RegistryError;

/// A registered credential issuer.
///
/// Created unverified by registration; the administrator flips `verified`
/// exactly once. Both counters only increase, one step per minted
/// credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerRecord {
    /// Display name, bounded at registration time.
    pub name: String,
    /// Organization class, fixed at registration.
    pub issuer_type: IssuerType,
    /// Whether the administrator has verified this issuer.
    pub verified: bool,
    /// Number of credentials this issuer has minted.
    pub credentials_issued: u64,
    /// Reputation counter, currently one point per minted credential.
    pub reputation_score: u64,
}

impl IssuerRecord {
    pub fn new(name: impl Into<String>, issuer_type: IssuerType) -> Self {
        IssuerRecord {
            name: name.into(),
            issuer_type,
            verified: false,
            credentials_issued: 0,
            reputation_score: 0,
        }
    }

    /// Marks the issuer verified. Verification happens at most once.
    pub fn verify(&mut self) -> Result<(), RegistryError> {
        if self.verified {
            return Err(RegistryError::AlreadyVerified);
        }
        self.verified = true;
        Ok(())
    }

    /// Records one minted credential against this issuer's counters.
    pub fn record_mint(&mut self) {
        self.credentials_issued += 1;
        self.reputation_score += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_issuer_starts_unverified_with_zero_counters() {
        let record = IssuerRecord::new("Tech University", IssuerType::Educational);
        assert_eq!(record.name, "Tech University");
        assert_eq!(record.issuer_type, IssuerType::Educational);
        assert!(!record.verified);
        assert_eq!(record.credentials_issued, 0);
        assert_eq!(record.reputation_score, 0);
    }

    #[test]
    fn verify_flips_flag_once() {
        let mut record = IssuerRecord::new("Acme Corp", IssuerType::Corporate);
        assert!(record.verify().is_ok());
        assert!(record.verified);
        assert_eq!(record.verify(), Err(RegistryError::AlreadyVerified));
    }

    #[test]
    fn record_mint_advances_both_counters() {
        let mut record = IssuerRecord::new("Guild", IssuerType::Professional);
        record.record_mint();
        record.record_mint();
        assert_eq!(record.credentials_issued, 2);
        assert_eq!(record.reputation_score, 2);
    }
}
