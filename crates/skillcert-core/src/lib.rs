//! # skillcert-core — Foundational Types for the Skillcert Registry
//!
//! This crate is the bedrock of the Skillcert stack. It defines the core
//! type-system primitives the registry and API layers are built on. Every
//! other crate in the workspace depends on `skillcert-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `AccountId`, `CredentialId`,
//!    `Tick` — all newtypes with explicit constructors. No bare strings for
//!    ledger principals, no bare integers for credential ids or ledger time.
//!
//! 2. **Numeric wire codes stay at the edge.** `CertificationLevel` and
//!    `IssuerType` carry their ledger-visible numeric codes (`1..=4` and
//!    `1..=3`); `from_code` is the single place an untrusted number becomes
//!    a typed value, so out-of-range codes are rejected exactly once.
//!
//! 3. **Ledger time is opaque.** The `Tick` type is a monotonic counter with
//!    no relation to wall-clock time. Expiry comparison is integer comparison;
//!    nothing in the stack reads an ambient clock.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `skillcert-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement `Serialize`/`Deserialize`.

pub mod domain;
pub mod error;
pub mod identity;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use domain::{
    CertificationLevel, IssuerType, MAX_CATEGORY_DESCRIPTION_LEN, MAX_CATEGORY_NAME_LEN,
    MAX_ISSUER_NAME_LEN, MAX_METADATA_URI_LEN, MAX_SKILL_NAME_LEN,
};
pub use error::ValidationError;
pub use identity::{AccountId, CredentialId};
pub use temporal::Tick;
