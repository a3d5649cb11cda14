//! # skillcert-registry — Credential Lifecycle & Bookkeeping
//!
//! The in-memory core of the SkillCert registry: issuer records, the
//! admin-curated skill-category taxonomy, credential records with their
//! derived lifecycle state, per-holder aggregate profiles, and the
//! platform fee treasury, all owned by a single
//! [`CertificationRegistry`].
//!
//! ## Lifecycle
//!
//! A credential is minted `Active`. It derives `Expired` once the ledger
//! clock reaches its expiry tick — nothing is stored, so a renewal moves
//! it straight back to `Active`. `Revoked` is terminal and only reachable
//! through the administrator's emergency path; issuer-initiated
//! revocation is blocked in the current contract version.
//!
//! ## Bookkeeping
//!
//! Every mint and transfer cascades into four aggregates in the same
//! call: the issuer's counters, the category's mint counter, the holder's
//! profile, and the global total. Operations validate fully before their
//! first write, so a returned error always means nothing changed.
//!
//! ## Time
//!
//! The registry never reads a clock. Every time-sensitive operation takes
//! the current [`Tick`](skillcert_core::Tick) from the caller, which keeps
//! the core deterministic and lets tests pick any point on the timeline.

pub mod category;
pub mod credential;
pub mod error;
pub mod issuer;
pub mod profile;
pub mod registry;

// ─── Record re-exports ──────────────────────────────────────────────

pub use category::SkillCategoryRecord;
pub use credential::{CredentialRecord, CredentialState};
pub use issuer::IssuerRecord;
pub use profile::HolderProfile;

// ─── Registry re-exports ────────────────────────────────────────────

pub use error::RegistryError;
pub use registry::{
    CertificationRegistry, MintRequest, RegistrySnapshot, DEFAULT_PLATFORM_FEE, MAX_PLATFORM_FEE,
};
