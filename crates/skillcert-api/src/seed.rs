//! # Category Seed Files
//!
//! A fresh registry has no categories, and only the administrator can
//! create them. Deployments describe their initial taxonomy in a YAML
//! file applied once at startup:
//!
//! ```yaml
//! categories:
//!   - name: programming
//!     description: Software development skills
//!   - name: cloud-operations
//!     description: Deployment and operations skills
//! ```
//!
//! Seeding is idempotent: a category that already exists is skipped, so
//! restarting against the same seed file is safe.

use std::path::Path;

use serde::Deserialize;
use skillcert_registry::RegistryError;

use crate::state::AppState;

/// One category entry in a seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySeed {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A parsed seed file.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedFile {
    pub categories: Vec<CategorySeed>,
}

/// Failures while loading or applying a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("seed rejected by the registry: {0}")]
    Registry(#[from] RegistryError),
}

/// Load a seed file from disk.
pub fn load_seed(path: &Path) -> Result<SeedFile, SeedError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&raw)?)
}

/// Apply a seed as the configured administrator. Returns the number of
/// categories created; existing names are skipped.
pub fn apply_seed(state: &AppState, seed: &SeedFile) -> Result<usize, SeedError> {
    let admin = state.config.admin_account.clone();
    let mut registry = state.registry.write();
    let mut created = 0usize;
    for category in &seed.categories {
        if registry.skill_category(&category.name).is_some() {
            tracing::debug!(name = %category.name, "seed category already exists, skipping");
            continue;
        }
        state.clock.next_block();
        registry.add_skill_category(&admin, &category.name, &category.description)?;
        created += 1;
    }
    tracing::info!(created, total = seed.categories.len(), "category seed applied");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillcert_core::AccountId;
    use std::io::Write;

    fn state() -> AppState {
        AppState::new(AccountId::new("admin").unwrap())
    }

    fn write_seed(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn seed_file_round_trips_from_disk() {
        let file = write_seed(
            "categories:\n  - name: programming\n    description: Software development skills\n  - name: design\n",
        );
        let seed = load_seed(file.path()).unwrap();
        assert_eq!(seed.categories.len(), 2);
        assert_eq!(seed.categories[0].name, "programming");
        assert_eq!(seed.categories[1].description, "");
    }

    #[test]
    fn apply_creates_active_categories() {
        let state = state();
        let seed = SeedFile {
            categories: vec![CategorySeed {
                name: "programming".into(),
                description: "Software development skills".into(),
            }],
        };
        assert_eq!(apply_seed(&state, &seed).unwrap(), 1);
        let registry = state.registry.read();
        let record = registry.skill_category("programming").unwrap();
        assert!(record.active);
        assert_eq!(record.total_credentials, 0);
    }

    #[test]
    fn apply_is_idempotent() {
        let state = state();
        let seed = SeedFile {
            categories: vec![CategorySeed {
                name: "programming".into(),
                description: "Software development skills".into(),
            }],
        };
        assert_eq!(apply_seed(&state, &seed).unwrap(), 1);
        assert_eq!(apply_seed(&state, &seed).unwrap(), 0);
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let file = write_seed("categories: {not a list");
        assert!(matches!(load_seed(file.path()), Err(SeedError::Parse(_))));
    }
}
