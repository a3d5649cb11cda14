//! # API Route Modules
//!
//! Route modules for the SkillCert API surface:
//!
//! - `issuers` — issuer registration, admin verification, issuer info.
//! - `categories` — admin-curated skill-category taxonomy.
//! - `credentials` — the credential lifecycle: mint, validity probe,
//!   authenticity check, renewal, revocation paths, transfer.
//! - `holders` — derived holder profiles (read-only; profiles mutate only
//!   as a side effect of mint and transfer).
//! - `admin` — pause toggle, fee treasury, ledger clock control, the
//!   registry dashboard, and the public stats endpoint.

pub mod admin;
pub mod categories;
pub mod credentials;
pub mod holders;
pub mod issuers;
