//! # Temporal Types — Ledger Ticks
//!
//! Defines `Tick`, the registry's only notion of time: a monotonically
//! increasing counter supplied by the host ledger (block height in the
//! original deployment).
//!
//! The registry never reads an ambient clock. Every operation that needs
//! time takes an explicit `Tick`, which keeps expiry behavior fully
//! deterministic under test — advancing time is advancing an integer.

use serde::{Deserialize, Serialize};

/// A point in ledger time.
///
/// Ticks are opaque and unitless: durations (validity windows) are plain
/// `u64` tick counts, and a credential at tick `t` with duration `d`
/// expires exactly when the ledger reaches `t + d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    /// Genesis tick, before any operation has executed.
    pub const ZERO: Tick = Tick(0);

    /// Access the inner counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The tick `ticks` further into the future, saturating at `u64::MAX`.
    pub fn saturating_add(&self, ticks: u64) -> Tick {
        Tick(self.0.saturating_add(ticks))
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Tick(1) < Tick(2));
        assert!(Tick::ZERO < Tick(1));
    }

    #[test]
    fn test_saturating_add() {
        assert_eq!(Tick(10).saturating_add(8640), Tick(8650));
        assert_eq!(Tick(u64::MAX).saturating_add(1), Tick(u64::MAX));
    }

    #[test]
    fn test_display_is_plain_number() {
        assert_eq!(format!("{}", Tick(8640)), "8640");
    }

    #[test]
    fn test_serde_roundtrip() {
        let tick = Tick(12345);
        let json = serde_json::to_string(&tick).unwrap();
        assert_eq!(json, "12345");
        let parsed: Tick = serde_json::from_str(&json).unwrap();
        assert_eq!(tick, parsed);
    }
}
