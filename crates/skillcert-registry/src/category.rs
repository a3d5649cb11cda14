//! Skill category records: the admin-curated taxonomy credentials are
//! minted under.

use serde::{Deserialize, Serialize};

/// An administrator-defined skill category.
///
/// Category names are unique registry-wide and serve as the map key, so the
/// record carries only the mutable payload. Deactivation stops new mints
/// under the category but leaves existing credentials untouched, and is
/// one-way in the current contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategoryRecord {
    /// Whether new credentials may reference this category.
    pub active: bool,
    /// Number of credentials ever minted under this category. Never
    /// decremented, not even by revocation.
    pub total_credentials: u64,
    /// Free-form description, bounded at creation time.
    pub category_description: String,
}

impl SkillCategoryRecord {
    pub fn new(description: impl Into<String>) -> Self {
        SkillCategoryRecord {
            active: true,
            total_credentials: 0,
            category_description: description.into(),
        }
    }

    /// Retires the category.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Records one credential minted under this category.
    pub fn record_mint(&mut self) {
        self.total_credentials += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_is_active_with_zero_mints() {
        let record = SkillCategoryRecord::new("Software development skills");
        assert!(record.active);
        assert_eq!(record.total_credentials, 0);
        assert_eq!(record.category_description, "Software development skills");
    }

    #[test]
    fn deactivate_clears_active_flag_only() {
        let mut record = SkillCategoryRecord::new("Cloud operations");
        record.record_mint();
        record.deactivate();
        assert!(!record.active);
        assert_eq!(record.total_credentials, 1);
    }
}
