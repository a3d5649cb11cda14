//! # Certification Domain Vocabulary — Single Source of Truth
//!
//! Defines the `CertificationLevel` and `IssuerType` enums with their
//! ledger-visible numeric codes, the skill-point weight table, and the
//! text-field length bounds. These are the ONE definition used across the
//! stack; every `match` on them must be exhaustive, so adding a level or
//! issuer class forces every consumer to handle it at compile time.
//!
//! ## Wire Codes
//!
//! The host ledger surfaces both enums as unsigned integers. `from_code`
//! is the single conversion point from untrusted numbers; everything past
//! that boundary works with the typed value.

use serde::{Deserialize, Serialize};

/// Maximum length of an issuer display name in characters.
pub const MAX_ISSUER_NAME_LEN: usize = 100;
/// Maximum length of a credential's skill name in characters.
pub const MAX_SKILL_NAME_LEN: usize = 100;
/// Maximum length of a skill category name in characters.
pub const MAX_CATEGORY_NAME_LEN: usize = 50;
/// Maximum length of a skill category description in characters.
pub const MAX_CATEGORY_DESCRIPTION_LEN: usize = 200;
/// Maximum length of a credential metadata URI in characters.
pub const MAX_METADATA_URI_LEN: usize = 200;

/// Certification level of a credential.
///
/// Each level carries a fixed skill-point weight that is credited to the
/// holder's profile at mint and moved between profiles on transfer:
///
/// | Code | Level | Skill points |
/// |------|--------------|-----|
/// | 1 | Basic | 10 |
/// | 2 | Intermediate | 25 |
/// | 3 | Advanced | 50 |
/// | 4 | Expert | 100 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CertificationLevel {
    /// Entry-level certification.
    Basic,
    /// Intermediate proficiency.
    Intermediate,
    /// Advanced proficiency.
    Advanced,
    /// Expert-level mastery.
    Expert,
}

impl CertificationLevel {
    /// All levels in ascending order of weight.
    pub fn all() -> &'static [CertificationLevel] {
        &[Self::Basic, Self::Intermediate, Self::Advanced, Self::Expert]
    }

    /// Convert a ledger wire code into a level. Returns `None` for any
    /// code outside `1..=4`.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Basic),
            2 => Some(Self::Intermediate),
            3 => Some(Self::Advanced),
            4 => Some(Self::Expert),
            _ => None,
        }
    }

    /// The ledger wire code for this level.
    pub fn code(&self) -> u64 {
        match self {
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::Expert => 4,
        }
    }

    /// Skill points credited to a holder per credential at this level.
    pub fn skill_points(&self) -> u64 {
        match self {
            Self::Basic => 10,
            Self::Intermediate => 25,
            Self::Advanced => 50,
            Self::Expert => 100,
        }
    }
}

impl std::fmt::Display for CertificationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Basic => "BASIC",
            Self::Intermediate => "INTERMEDIATE",
            Self::Advanced => "ADVANCED",
            Self::Expert => "EXPERT",
        };
        f.write_str(s)
    }
}

/// Classification of a credential issuer.
///
/// | Code | Type |
/// |------|--------------|
/// | 1 | Educational |
/// | 2 | Corporate |
/// | 3 | Professional |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuerType {
    /// Universities, schools, training institutes.
    Educational,
    /// Employers certifying their own workforce.
    Corporate,
    /// Professional bodies and industry associations.
    Professional,
}

impl IssuerType {
    /// All issuer types in code order.
    pub fn all() -> &'static [IssuerType] {
        &[Self::Educational, Self::Corporate, Self::Professional]
    }

    /// Convert a ledger wire code into an issuer type. Returns `None` for
    /// any code outside `1..=3`.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Educational),
            2 => Some(Self::Corporate),
            3 => Some(Self::Professional),
            _ => None,
        }
    }

    /// The ledger wire code for this issuer type.
    pub fn code(&self) -> u64 {
        match self {
            Self::Educational => 1,
            Self::Corporate => 2,
            Self::Professional => 3,
        }
    }
}

impl std::fmt::Display for IssuerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Educational => "EDUCATIONAL",
            Self::Corporate => "CORPORATE",
            Self::Professional => "PROFESSIONAL",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- CertificationLevel ----

    #[test]
    fn test_level_codes_roundtrip() {
        for level in CertificationLevel::all() {
            assert_eq!(CertificationLevel::from_code(level.code()), Some(*level));
        }
    }

    #[test]
    fn test_level_rejects_out_of_range_codes() {
        assert_eq!(CertificationLevel::from_code(0), None);
        assert_eq!(CertificationLevel::from_code(5), None);
        assert_eq!(CertificationLevel::from_code(u64::MAX), None);
    }

    #[test]
    fn test_skill_point_weights() {
        assert_eq!(CertificationLevel::Basic.skill_points(), 10);
        assert_eq!(CertificationLevel::Intermediate.skill_points(), 25);
        assert_eq!(CertificationLevel::Advanced.skill_points(), 50);
        assert_eq!(CertificationLevel::Expert.skill_points(), 100);
    }

    #[test]
    fn test_level_weights_strictly_increase() {
        let weights: Vec<u64> = CertificationLevel::all()
            .iter()
            .map(|l| l.skill_points())
            .collect();
        assert!(weights.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_level_serde_snake_case() {
        let json = serde_json::to_string(&CertificationLevel::Intermediate).unwrap();
        assert_eq!(json, "\"intermediate\"");
    }

    #[test]
    fn test_level_display_screaming() {
        assert_eq!(CertificationLevel::Expert.to_string(), "EXPERT");
    }

    // ---- IssuerType ----

    #[test]
    fn test_issuer_type_codes_roundtrip() {
        for ty in IssuerType::all() {
            assert_eq!(IssuerType::from_code(ty.code()), Some(*ty));
        }
    }

    #[test]
    fn test_issuer_type_rejects_out_of_range_codes() {
        assert_eq!(IssuerType::from_code(0), None);
        assert_eq!(IssuerType::from_code(4), None);
        assert_eq!(IssuerType::from_code(99), None);
    }

    #[test]
    fn test_issuer_type_serde_snake_case() {
        let json = serde_json::to_string(&IssuerType::Educational).unwrap();
        assert_eq!(json, "\"educational\"");
    }

    #[test]
    fn test_issuer_type_display_screaming() {
        assert_eq!(IssuerType::Professional.to_string(), "PROFESSIONAL");
    }
}
