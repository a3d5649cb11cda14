//! The certification registry: every operation, every aggregate.
//!
//! [`CertificationRegistry`] owns all five state families — issuers, skill
//! categories, credentials, holder profiles, and the global counters —
//! behind one struct, so each mutating operation is a single `&mut self`
//! call. Every operation validates fully before its first write: a caller
//! observes either the whole effect or none of it.
//!
//! Validation order is part of the contract. Minting, for example, reports
//! a paused registry before an unknown category, and each operation's doc
//! comment lists its checks in the order they run.

use std::collections::HashMap;
use std::mem;

use serde::Serialize;
use skillcert_core::{
    AccountId, CertificationLevel, CredentialId, IssuerType, Tick, MAX_CATEGORY_DESCRIPTION_LEN,
    MAX_CATEGORY_NAME_LEN, MAX_ISSUER_NAME_LEN, MAX_METADATA_URI_LEN, MAX_SKILL_NAME_LEN,
};

use crate::category::SkillCategoryRecord;
use crate::credential::{CredentialRecord, CredentialState};
use crate::error::RegistryError;
use crate::issuer::IssuerRecord;
use crate::profile::HolderProfile;

/// Fee-rate ceiling enforced by [`CertificationRegistry::set_platform_fee`].
pub const MAX_PLATFORM_FEE: u64 = 5_000_000;

/// Fee rate a fresh registry starts with.
pub const DEFAULT_PLATFORM_FEE: u64 = 1_000_000;

/// Parameters for [`CertificationRegistry::mint_credential`].
///
/// `certification_level` carries the raw numeric code so that an
/// out-of-range value surfaces as the registry's own invalid-parameter
/// error instead of failing earlier at deserialization.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub holder: AccountId,
    pub skill_name: String,
    pub skill_category: String,
    pub certification_level: u64,
    pub validity_duration: u64,
    pub metadata_uri: String,
}

/// Point-in-time summary of the registry, consumed by the dashboard and
/// the metrics exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub total_credentials: u64,
    pub active_credentials: u64,
    pub expired_credentials: u64,
    pub revoked_credentials: u64,
    pub total_issuers: u64,
    pub verified_issuers: u64,
    pub total_categories: u64,
    pub active_categories: u64,
    pub holder_profiles: u64,
    pub paused: bool,
    pub platform_fee_rate: u64,
    pub accumulated_fees: u64,
}

/// The in-memory certification registry.
///
/// One administrator account is fixed at construction and gates
/// verification, category curation, fee configuration, pausing, and the
/// emergency revocation path. All other mutations authorize against the
/// records themselves (issuer of a credential, current holder).
#[derive(Debug, Clone)]
pub struct CertificationRegistry {
    admin: AccountId,
    paused: bool,
    platform_fee_rate: u64,
    accumulated_fees: u64,
    /// Mirrors `credentials.len()`; ids are dense so the next id is always
    /// `total_credentials + 1`.
    total_credentials: u64,
    issuers: HashMap<AccountId, IssuerRecord>,
    categories: HashMap<String, SkillCategoryRecord>,
    credentials: HashMap<CredentialId, CredentialRecord>,
    profiles: HashMap<AccountId, HolderProfile>,
}

impl CertificationRegistry {
    // ─── Construction and global reads ──────────────────────────────

    pub fn new(admin: AccountId) -> Self {
        CertificationRegistry {
            admin,
            paused: false,
            platform_fee_rate: DEFAULT_PLATFORM_FEE,
            accumulated_fees: 0,
            total_credentials: 0,
            issuers: HashMap::new(),
            categories: HashMap::new(),
            credentials: HashMap::new(),
            profiles: HashMap::new(),
        }
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }

    pub fn is_admin(&self, caller: &AccountId) -> bool {
        self.admin == *caller
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn platform_fee_rate(&self) -> u64 {
        self.platform_fee_rate
    }

    pub fn accumulated_fees(&self) -> u64 {
        self.accumulated_fees
    }

    pub fn total_credentials(&self) -> u64 {
        self.total_credentials
    }

    /// Counts every record family at `now`.
    pub fn snapshot(&self, now: Tick) -> RegistrySnapshot {
        let mut active = 0u64;
        let mut expired = 0u64;
        let mut revoked = 0u64;
        for record in self.credentials.values() {
            match record.state(now) {
                CredentialState::Active => active += 1,
                CredentialState::Expired => expired += 1,
                CredentialState::Revoked => revoked += 1,
            }
        }
        RegistrySnapshot {
            total_credentials: self.total_credentials,
            active_credentials: active,
            expired_credentials: expired,
            revoked_credentials: revoked,
            total_issuers: self.issuers.len() as u64,
            verified_issuers: self.issuers.values().filter(|rec| rec.verified).count() as u64,
            total_categories: self.categories.len() as u64,
            active_categories: self.categories.values().filter(|rec| rec.active).count() as u64,
            holder_profiles: self.profiles.len() as u64,
            paused: self.paused,
            platform_fee_rate: self.platform_fee_rate,
            accumulated_fees: self.accumulated_fees,
        }
    }

    // ─── Administration gate ────────────────────────────────────────

    fn require_admin(&self, caller: &AccountId) -> Result<(), RegistryError> {
        if !self.is_admin(caller) {
            return Err(RegistryError::NotOwner);
        }
        Ok(())
    }

    fn require_not_paused(&self) -> Result<(), RegistryError> {
        if self.paused {
            return Err(RegistryError::InvalidParameter { reason: "registry is paused" });
        }
        Ok(())
    }

    /// Flips the pause flag and returns the new state. Admin only
    /// (`NotOwner`). The pause gates registration, minting, and renewal;
    /// admin operations and transfers keep working while paused.
    pub fn toggle_pause(&mut self, caller: &AccountId) -> Result<bool, RegistryError> {
        self.require_admin(caller)?;
        self.paused = !self.paused;
        Ok(self.paused)
    }

    /// Sets the per-mint fee rate. Checks: admin (`NotOwner`), then the
    /// [`MAX_PLATFORM_FEE`] cap (`InvalidParameter`).
    pub fn set_platform_fee(&mut self, caller: &AccountId, amount: u64) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if amount > MAX_PLATFORM_FEE {
            return Err(RegistryError::InvalidParameter {
                reason: "platform fee exceeds the configured maximum",
            });
        }
        self.platform_fee_rate = amount;
        Ok(())
    }

    /// Drains the accumulated fee balance and returns the amount. Admin
    /// only (`NotOwner`). Succeeds with 0 when the treasury is empty.
    pub fn withdraw_platform_fees(&mut self, caller: &AccountId) -> Result<u64, RegistryError> {
        self.require_admin(caller)?;
        Ok(mem::take(&mut self.accumulated_fees))
    }

    // ─── Issuers ────────────────────────────────────────────────────

    /// Registers the caller as an issuer, unverified. Checks, in order:
    /// pause, name bound, issuer-type code, duplicate registration — all
    /// reported as `InvalidParameter`.
    pub fn register_issuer(
        &mut self,
        caller: &AccountId,
        name: &str,
        issuer_type: u64,
    ) -> Result<(), RegistryError> {
        self.require_not_paused()?;
        if name.chars().count() > MAX_ISSUER_NAME_LEN {
            return Err(RegistryError::InvalidParameter {
                reason: "issuer name exceeds the length bound",
            });
        }
        let issuer_type = IssuerType::from_code(issuer_type).ok_or(
            RegistryError::InvalidParameter { reason: "issuer type code out of range" },
        )?;
        if self.issuers.contains_key(caller) {
            return Err(RegistryError::InvalidParameter {
                reason: "issuer is already registered",
            });
        }
        self.issuers.insert(caller.clone(), IssuerRecord::new(name, issuer_type));
        Ok(())
    }

    /// Marks a registered issuer verified. Checks, in order: admin
    /// (`NotOwner`), the target is registered (`NotAuthorized`), not
    /// already verified (`AlreadyVerified`).
    pub fn verify_issuer(
        &mut self,
        caller: &AccountId,
        issuer: &AccountId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        let record = self.issuers.get_mut(issuer).ok_or(RegistryError::NotAuthorized)?;
        record.verify()
    }

    pub fn issuer(&self, account: &AccountId) -> Option<&IssuerRecord> {
        self.issuers.get(account)
    }

    // ─── Skill categories ───────────────────────────────────────────

    /// Creates an active category. Checks, in order: admin (`NotOwner`),
    /// name and description bounds, name uniqueness — bounds and
    /// collisions as `InvalidParameter`.
    pub fn add_skill_category(
        &mut self,
        caller: &AccountId,
        name: &str,
        description: &str,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(RegistryError::InvalidParameter {
                reason: "category name exceeds the length bound",
            });
        }
        if description.chars().count() > MAX_CATEGORY_DESCRIPTION_LEN {
            return Err(RegistryError::InvalidParameter {
                reason: "category description exceeds the length bound",
            });
        }
        if self.categories.contains_key(name) {
            return Err(RegistryError::InvalidParameter {
                reason: "category name is already taken",
            });
        }
        self.categories.insert(name.to_owned(), SkillCategoryRecord::new(description));
        Ok(())
    }

    /// Retires a category so no further credentials mint under it.
    /// Checks: admin (`NotOwner`), category exists (`InvalidParameter`).
    pub fn deactivate_skill_category(
        &mut self,
        caller: &AccountId,
        name: &str,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        let record = self.categories.get_mut(name).ok_or(RegistryError::InvalidParameter {
            reason: "unknown skill category",
        })?;
        record.deactivate();
        Ok(())
    }

    pub fn skill_category(&self, name: &str) -> Option<&SkillCategoryRecord> {
        self.categories.get(name)
    }

    /// All categories with their names, in no particular order.
    pub fn skill_categories(&self) -> impl Iterator<Item = (&str, &SkillCategoryRecord)> {
        self.categories.iter().map(|(name, record)| (name.as_str(), record))
    }

    // ─── Credential lifecycle ───────────────────────────────────────

    /// Mints a credential from the calling issuer to `request.holder` and
    /// returns the new id.
    ///
    /// Checks, in order: pause (`InvalidParameter`), caller registered and
    /// verified (`NotVerified`), certification level (`InvalidParameter`),
    /// positive validity duration (`InvalidParameter`), skill-name and
    /// metadata bounds (`InvalidParameter`), category exists and is active
    /// (`InvalidParameter`).
    ///
    /// On success, one atomic step: stores the record (issue date = `now`,
    /// expiry = `now + validity_duration`, verified, not revoked),
    /// advances the global counter, credits the issuer's counters, the
    /// category's mint counter, and the holder's profile (created on first
    /// touch), and accrues the current platform fee rate.
    pub fn mint_credential(
        &mut self,
        caller: &AccountId,
        now: Tick,
        request: MintRequest,
    ) -> Result<CredentialId, RegistryError> {
        self.require_not_paused()?;
        if !self.issuers.get(caller).is_some_and(|rec| rec.verified) {
            return Err(RegistryError::NotVerified);
        }
        let level = CertificationLevel::from_code(request.certification_level).ok_or(
            RegistryError::InvalidParameter { reason: "certification level out of range" },
        )?;
        if request.validity_duration == 0 {
            return Err(RegistryError::InvalidParameter {
                reason: "validity duration must be positive",
            });
        }
        if request.skill_name.chars().count() > MAX_SKILL_NAME_LEN {
            return Err(RegistryError::InvalidParameter {
                reason: "skill name exceeds the length bound",
            });
        }
        if request.metadata_uri.chars().count() > MAX_METADATA_URI_LEN {
            return Err(RegistryError::InvalidParameter {
                reason: "metadata uri exceeds the length bound",
            });
        }
        match self.categories.get(&request.skill_category) {
            None => {
                return Err(RegistryError::InvalidParameter { reason: "unknown skill category" })
            }
            Some(category) if !category.active => {
                return Err(RegistryError::InvalidParameter {
                    reason: "skill category is inactive",
                })
            }
            Some(_) => {}
        }

        let id = CredentialId(self.total_credentials + 1);
        let holder = request.holder.clone();
        let category_name = request.skill_category.clone();
        let record = CredentialRecord {
            holder: request.holder,
            issuer: caller.clone(),
            skill_name: request.skill_name,
            skill_category: request.skill_category,
            certification_level: level,
            issue_date: now,
            expiry_date: now.saturating_add(request.validity_duration),
            verified: true,
            metadata_uri: request.metadata_uri,
            revoked: false,
        };
        let points = record.skill_points();

        self.credentials.insert(id, record);
        self.total_credentials += 1;
        if let Some(issuer) = self.issuers.get_mut(caller) {
            issuer.record_mint();
        }
        if let Some(category) = self.categories.get_mut(&category_name) {
            category.record_mint();
        }
        self.profiles.entry(holder).or_default().credit(points);
        self.accumulated_fees = self.accumulated_fees.saturating_add(self.platform_fee_rate);
        Ok(id)
    }

    /// Administrator assurance probe: asserts the credential exists and
    /// the caller is the admin. Checks: admin (`NotOwner`), credential
    /// exists (`CredentialNotFound`). Records nothing.
    pub fn verify_credential_authenticity(
        &self,
        caller: &AccountId,
        id: CredentialId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        if !self.credentials.contains_key(&id) {
            return Err(RegistryError::CredentialNotFound { id });
        }
        Ok(())
    }

    /// Re-extends a credential from the current clock, not from the old
    /// expiry: the new expiry is `now + new_duration`. The issue date is
    /// untouched.
    ///
    /// Checks, in order: pause (`InvalidParameter`), credential exists
    /// (`CredentialNotFound`), caller is the issuer (`NotAuthorized`), not
    /// revoked (`InvalidParameter`), positive duration
    /// (`InvalidParameter`). An expired credential renews fine — that is
    /// the point.
    pub fn renew_credential(
        &mut self,
        caller: &AccountId,
        now: Tick,
        id: CredentialId,
        new_duration: u64,
    ) -> Result<(), RegistryError> {
        self.require_not_paused()?;
        let record = self
            .credentials
            .get_mut(&id)
            .ok_or(RegistryError::CredentialNotFound { id })?;
        if record.issuer != *caller {
            return Err(RegistryError::NotAuthorized);
        }
        if record.revoked {
            return Err(RegistryError::InvalidParameter { reason: "credential is revoked" });
        }
        if new_duration == 0 {
            return Err(RegistryError::InvalidParameter {
                reason: "validity duration must be positive",
            });
        }
        record.expiry_date = now.saturating_add(new_duration);
        Ok(())
    }

    /// Issuer-initiated revocation, currently blocked.
    ///
    /// Existence and authorization are still checked in order
    /// (`CredentialNotFound`, then `NotAuthorized`), but the final step
    /// always reports `InvalidParameter` and nothing is mutated:
    /// revocation is reserved to the administrator's
    /// [emergency path](Self::emergency_revoke_credential) in the current
    /// contract version.
    pub fn revoke_credential(
        &self,
        caller: &AccountId,
        id: CredentialId,
    ) -> Result<(), RegistryError> {
        let record = self.credentials.get(&id).ok_or(RegistryError::CredentialNotFound { id })?;
        if record.issuer != *caller {
            return Err(RegistryError::NotAuthorized);
        }
        Err(RegistryError::InvalidParameter {
            reason: "issuer revocation is disabled; only the emergency path revokes",
        })
    }

    /// Unconditionally revokes a credential, even one already expired or
    /// already revoked. Checks: admin (`NotOwner`), credential exists
    /// (`CredentialNotFound`). Holder, issuer, and category aggregates are
    /// deliberately left as they are.
    pub fn emergency_revoke_credential(
        &mut self,
        caller: &AccountId,
        id: CredentialId,
    ) -> Result<(), RegistryError> {
        self.require_admin(caller)?;
        let record = self
            .credentials
            .get_mut(&id)
            .ok_or(RegistryError::CredentialNotFound { id })?;
        record.revoked = true;
        Ok(())
    }

    /// Moves a credential to a new holder and its skill points with it.
    ///
    /// Checks, in order: credential exists (`CredentialNotFound`), caller
    /// is the current holder (`NotAuthorized`), not revoked
    /// (`InvalidParameter`), not expired at `now` (`ExpiredCredential`).
    /// On success the old holder's profile is debited, the new holder's
    /// credited (created on first touch), and the holder field rewritten.
    pub fn transfer_credential(
        &mut self,
        caller: &AccountId,
        now: Tick,
        id: CredentialId,
        new_holder: AccountId,
    ) -> Result<(), RegistryError> {
        let record = self.credentials.get(&id).ok_or(RegistryError::CredentialNotFound { id })?;
        if record.holder != *caller {
            return Err(RegistryError::NotAuthorized);
        }
        if record.revoked {
            return Err(RegistryError::InvalidParameter { reason: "credential is revoked" });
        }
        if now >= record.expiry_date {
            return Err(RegistryError::ExpiredCredential { id });
        }
        let points = record.skill_points();

        if let Some(profile) = self.profiles.get_mut(caller) {
            profile.debit(points);
        }
        self.profiles.entry(new_holder.clone()).or_default().credit(points);
        if let Some(record) = self.credentials.get_mut(&id) {
            record.holder = new_holder;
        }
        Ok(())
    }

    /// Read-only validity probe: `Ok(true)` iff the credential is neither
    /// revoked nor expired at `now`. Unknown ids report the distinguished
    /// zero-code [`UnknownCredential`](RegistryError::UnknownCredential)
    /// instead of the regular 102.
    pub fn credential_validity(&self, id: CredentialId, now: Tick) -> Result<bool, RegistryError> {
        let record = self.credentials.get(&id).ok_or(RegistryError::UnknownCredential { id })?;
        Ok(record.is_valid(now))
    }

    pub fn credential(&self, id: CredentialId) -> Option<&CredentialRecord> {
        self.credentials.get(&id)
    }

    // ─── Holder profiles ────────────────────────────────────────────

    pub fn holder_profile(&self, account: &AccountId) -> Option<&HolderProfile> {
        self.profiles.get(account)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn fixture() -> (CertificationRegistry, AccountId, AccountId, AccountId) {
        let admin = AccountId::new("admin").unwrap();
        let issuer = AccountId::new("issuer").unwrap();
        let holder = AccountId::new("holder").unwrap();
        let mut reg = CertificationRegistry::new(admin.clone());
        reg.register_issuer(&issuer, "Issuer", 2).unwrap();
        reg.verify_issuer(&admin, &issuer).unwrap();
        reg.add_skill_category(&admin, "general", "General skills").unwrap();
        (reg, admin, issuer, holder)
    }

    fn mint(reg: &mut CertificationRegistry, issuer: &AccountId, holder: &AccountId, level: u64, duration: u64) -> CredentialId {
        reg.mint_credential(
            issuer,
            Tick(1),
            MintRequest {
                holder: holder.clone(),
                skill_name: "Skill".into(),
                skill_category: "general".into(),
                certification_level: level,
                validity_duration: duration,
                metadata_uri: "https://certs.example/skill".into(),
            },
        )
        .unwrap()
    }

    /// Strategy for mint parameters within the accepted domain.
    fn mint_params() -> impl Strategy<Value = (u64, u64)> {
        (1u64..=4, 1u64..=10_000)
    }

    proptest! {
        /// A holder's skill points always equal the sum of minted level
        /// weights, and counters match the mint count.
        #[test]
        fn skill_points_conserve_mint_weights(params in prop::collection::vec(mint_params(), 1..40)) {
            let (mut reg, _admin, issuer, holder) = fixture();
            let mut expected_points = 0u64;
            for (level, duration) in &params {
                mint(&mut reg, &issuer, &holder, *level, *duration);
                expected_points += CertificationLevel::from_code(*level).unwrap().skill_points();
            }
            let profile = reg.holder_profile(&holder).unwrap();
            prop_assert_eq!(profile.skill_points, expected_points);
            prop_assert_eq!(profile.total_credentials, params.len() as u64);
            prop_assert_eq!(profile.verified_credentials, params.len() as u64);
        }

        /// Credential ids are dense from 1, and issuer and category
        /// counters agree with the global total.
        #[test]
        fn ids_and_counters_stay_dense(count in 1usize..50) {
            let (mut reg, _admin, issuer, holder) = fixture();
            for i in 0..count {
                let id = mint(&mut reg, &issuer, &holder, 1 + (i as u64 % 4), 100);
                prop_assert_eq!(id, CredentialId(i as u64 + 1));
            }
            prop_assert_eq!(reg.total_credentials(), count as u64);
            prop_assert_eq!(reg.issuer(&issuer).unwrap().credentials_issued, count as u64);
            prop_assert_eq!(reg.skill_category("general").unwrap().total_credentials, count as u64);
        }

        /// Transfers move points between profiles without creating or
        /// destroying any.
        #[test]
        fn transfers_conserve_points(
            params in prop::collection::vec(mint_params(), 1..20),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 0..20),
        ) {
            let (mut reg, _admin, issuer, holder) = fixture();
            let other = AccountId::new("other-holder").unwrap();
            let mut total_points = 0u64;
            let mut ids = Vec::new();
            for (level, duration) in &params {
                ids.push(mint(&mut reg, &issuer, &holder, *level, 10_000 + *duration));
                total_points += CertificationLevel::from_code(*level).unwrap().skill_points();
            }
            for pick in picks {
                let id = *pick.get(&ids);
                let current = reg.credential(id).unwrap().holder.clone();
                let target = if current == holder { other.clone() } else { holder.clone() };
                reg.transfer_credential(&current, Tick(2), id, target).unwrap();
            }
            let holder_profile = reg.holder_profile(&holder).unwrap();
            let other_points = reg.holder_profile(&other).map(|p| p.skill_points).unwrap_or(0);
            let other_total = reg.holder_profile(&other).map(|p| p.total_credentials).unwrap_or(0);
            prop_assert_eq!(holder_profile.skill_points + other_points, total_points);
            prop_assert_eq!(holder_profile.total_credentials + other_total, params.len() as u64);
        }

        /// The validity probe agrees with the derived lifecycle state at
        /// every probe tick.
        #[test]
        fn validity_matches_derived_state(duration in 1u64..500, probe in 0u64..1_000) {
            let (mut reg, _admin, issuer, holder) = fixture();
            let id = mint(&mut reg, &issuer, &holder, 1, duration);
            let now = Tick(probe);
            let valid = reg.credential_validity(id, now).unwrap();
            let state = reg.credential(id).unwrap().state(now);
            prop_assert_eq!(valid, state == CredentialState::Active);
            prop_assert_eq!(valid, probe < 1 + duration);
        }
    }
}
