//! # Holder Profile API
//!
//! Read-only: holder profiles are derived aggregates, mutated only as a
//! side effect of mint and transfer. Revocation and expiry do not debit
//! a profile — the counts reflect credentials ever held, and validity is
//! a per-credential question answered by the validity probe.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use skillcert_core::AccountId;
use skillcert_registry::HolderProfile;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Holder profile as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct HolderProfileInfo {
    /// Ledger principal the profile belongs to.
    pub account: String,
    /// Credentials currently attributed to the holder.
    pub total_credentials: u64,
    /// Credentials minted by a verified issuer.
    pub verified_credentials: u64,
    /// Weighted sum of certification-level points.
    pub skill_points: u64,
    pub profile_active: bool,
}

impl HolderProfileInfo {
    pub(crate) fn from_record(account: &AccountId, profile: &HolderProfile) -> Self {
        HolderProfileInfo {
            account: account.to_string(),
            total_credentials: profile.total_credentials,
            verified_credentials: profile.verified_credentials,
            skill_points: profile.skill_points,
            profile_active: profile.profile_active,
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/holders/:account/profile", get(get_holder_profile))
}

/// GET /v1/holders/:account/profile — Holder aggregate profile.
#[utoipa::path(
    get,
    path = "/v1/holders/{account}/profile",
    params(("account" = String, Path, description = "Holder ledger principal")),
    responses(
        (status = 200, description = "Profile found", body = HolderProfileInfo),
        (status = 404, description = "No credential has ever touched this account", body = crate::error::ErrorBody),
    ),
    tag = "holders"
)]
async fn get_holder_profile(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<HolderProfileInfo>, AppError> {
    let account = AccountId::new(account)?;
    let registry = state.registry.read();
    registry
        .holder_profile(&account)
        .map(|profile| Json(HolderProfileInfo::from_record(&account, profile)))
        .ok_or_else(|| AppError::NotFound(format!("holder {account} has no profile")))
}
