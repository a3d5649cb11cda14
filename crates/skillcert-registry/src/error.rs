//! Registry error taxonomy with a stable numeric contract.
//!
//! Every fallible registry operation reports one of the codes below. The
//! codes are part of the public API — clients, the HTTP layer, and the
//! test suites match on them — and must never be renumbered.
//!
//! | Code | Variant              | Meaning                                      |
//! |------|----------------------|----------------------------------------------|
//! | 100  | `NotOwner`           | caller is not the registry administrator     |
//! | 101  | `NotAuthorized`      | caller does not control the record           |
//! | 102  | `CredentialNotFound` | credential id is unknown                     |
//! | 103  | `InvalidParameter`   | request rejected by a validation rule        |
//! | 104  | `AlreadyVerified`    | issuer verification already happened         |
//! | 105  | `NotVerified`        | caller is not a verified issuer              |
//! | 106  | `ExpiredCredential`  | credential expiry tick has passed            |
//! | 0    | `UnknownCredential`  | validity probe against a nonexistent id      |
//!
//! `UnknownCredential` exists alongside `CredentialNotFound` because the
//! validity probe reports misses with a distinguished zero code rather than
//! the regular 102; see
//! [`credential_validity`](crate::CertificationRegistry::credential_validity).

use skillcert_core::CredentialId;

/// Errors returned by [`CertificationRegistry`](crate::CertificationRegistry)
/// operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Caller is not the registry administrator (code 100).
    #[error("caller is not the registry administrator")]
    NotOwner,

    /// Caller does not control the record it names (code 101): not the
    /// credential's issuer or holder, or the target of `verify_issuer` was
    /// never registered.
    #[error("caller is not authorized for this record")]
    NotAuthorized,

    /// No credential exists under the given id (code 102).
    #[error("{id} does not exist")]
    CredentialNotFound { id: CredentialId },

    /// Request rejected by a validation rule (code 103): registry paused, a
    /// length bound or enum range violated, a name collision, a missing or
    /// inactive category, a revoked credential, a fee above its cap, or an
    /// issuer-initiated revocation attempt.
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: &'static str },

    /// The issuer is already verified (code 104).
    #[error("issuer is already verified")]
    AlreadyVerified,

    /// Caller is not registered as a verified issuer (code 105).
    #[error("caller is not a verified issuer")]
    NotVerified,

    /// The credential's expiry tick has passed (code 106).
    #[error("{id} has expired")]
    ExpiredCredential { id: CredentialId },

    /// Distinguished zero-code miss reported only by the validity probe.
    #[error("{id} does not exist")]
    UnknownCredential { id: CredentialId },
}

impl RegistryError {
    /// The stable numeric code for this error.
    pub const fn code(&self) -> u32 {
        match self {
            RegistryError::NotOwner => 100,
            RegistryError::NotAuthorized => 101,
            RegistryError::CredentialNotFound { .. } => 102,
            RegistryError::InvalidParameter { .. } => 103,
            RegistryError::AlreadyVerified => 104,
            RegistryError::NotVerified => 105,
            RegistryError::ExpiredCredential { .. } => 106,
            RegistryError::UnknownCredential { .. } => 0,
        }
    }
}
