//! Holder profiles: per-identity aggregates maintained by credential
//! mutations.

use serde::{Deserialize, Serialize};

/// Aggregate statistics for one credential holder.
///
/// Strictly derived bookkeeping: minting and transfer-in credit the
/// profile, transfer-out debits it. Revocation and expiry do NOT debit —
/// those are status changes on the credential, and the profile counts
/// credentials ever held. Per-credential validity is what the validity
/// probe answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderProfile {
    /// Credentials currently attributed to the holder.
    pub total_credentials: u64,
    /// Credentials minted by a verified issuer. Every mint in the current
    /// contract is issuer-verified, so this tracks `total_credentials`.
    pub verified_credentials: u64,
    /// Weighted sum of certification-level points.
    pub skill_points: u64,
    /// Always true once the profile exists.
    pub profile_active: bool,
}

impl HolderProfile {
    pub fn new() -> Self {
        HolderProfile {
            total_credentials: 0,
            verified_credentials: 0,
            skill_points: 0,
            profile_active: true,
        }
    }

    /// Credits one credential worth `points` to the profile.
    pub fn credit(&mut self, points: u64) {
        self.total_credentials += 1;
        self.verified_credentials += 1;
        self.skill_points += points;
    }

    /// Debits one credential worth `points` from the profile. Saturating,
    /// so a stray debit can never underflow the counters.
    pub fn debit(&mut self, points: u64) {
        self.total_credentials = self.total_credentials.saturating_sub(1);
        self.verified_credentials = self.verified_credentials.saturating_sub(1);
        self.skill_points = self.skill_points.saturating_sub(points);
    }
}

impl Default for HolderProfile {
    fn default() -> Self {
        HolderProfile::new()
    }
}
