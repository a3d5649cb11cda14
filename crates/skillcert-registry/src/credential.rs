//! Credential records and their derived lifecycle state.

use std::fmt;

use serde::{Deserialize, Serialize};
use skillcert_core::{AccountId, CertificationLevel, Tick};

/// Lifecycle state of a credential, derived from its record and the clock.
///
/// Only revocation is stored on the record. `Expired` is computed on read
/// by comparing the expiry tick against the current clock, so credentials
/// need no background job to expire and a renewal moves an expired
/// credential straight back to `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialState {
    Active,
    Expired,
    Revoked,
}

impl CredentialState {
    /// All lifecycle states, in severity order.
    pub const fn all() -> [CredentialState; 3] {
        [
            CredentialState::Active,
            CredentialState::Expired,
            CredentialState::Revoked,
        ]
    }

    /// Terminal states cannot transition away. Only `Revoked` is terminal;
    /// `Expired` is recoverable through renewal.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, CredentialState::Revoked)
    }
}

impl fmt::Display for CredentialState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CredentialState::Active => "ACTIVE",
            CredentialState::Expired => "EXPIRED",
            CredentialState::Revoked => "REVOKED",
        };
        write!(f, "{s}")
    }
}

/// A single issued credential.
///
/// `skill_category` named an active category at mint time but is not
/// re-validated afterwards: deactivating a category leaves its credentials
/// intact. `holder` changes on transfer; every other field is written at
/// mint and only `expiry_date` (renewal) and `revoked` (emergency
/// revocation) change after that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    /// Identity the credential is currently held by.
    pub holder: AccountId,
    /// Identity that minted the credential.
    pub issuer: AccountId,
    pub skill_name: String,
    pub skill_category: String,
    pub certification_level: CertificationLevel,
    /// Clock value at mint. Renewal does not touch it.
    pub issue_date: Tick,
    /// First tick at which the credential counts as expired.
    pub expiry_date: Tick,
    /// Issuer-verification status, set at mint. Distinct from the
    /// administrator's authenticity check, which records nothing.
    pub verified: bool,
    pub metadata_uri: String,
    /// Terminal once set.
    pub revoked: bool,
}

impl CredentialRecord {
    /// Derived lifecycle state at `now`. Revocation wins over expiry.
    pub fn state(&self, now: Tick) -> CredentialState {
        if self.revoked {
            CredentialState::Revoked
        } else if now >= self.expiry_date {
            CredentialState::Expired
        } else {
            CredentialState::Active
        }
    }

    /// True iff the credential is neither revoked nor expired at `now`.
    pub fn is_valid(&self, now: Tick) -> bool {
        !self.revoked && now < self.expiry_date
    }

    /// Skill-point weight this credential contributes to its holder.
    pub fn skill_points(&self) -> u64 {
        self.certification_level.skill_points()
    }
}
