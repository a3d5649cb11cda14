//! # Credential Lifecycle API
//!
//! The core surface: minting, the validity probe, the administrator's
//! authenticity check, renewal, both revocation paths, and transfer.
//!
//! ## Endpoints
//!
//! - `POST /v1/credentials` — verified issuer mints to a holder
//! - `GET /v1/credentials/:id` — credential record with derived state
//! - `GET /v1/credentials/:id/validity` — validity probe
//! - `POST /v1/credentials/:id/authenticity-check` — admin assurance probe
//! - `POST /v1/credentials/:id/renew` — issuer re-extends from now
//! - `POST /v1/credentials/:id/revoke` — issuer revocation (blocked in the
//!   current contract version; always reports the invalid-parameter code)
//! - `POST /v1/credentials/:id/emergency-revoke` — admin terminal revocation
//! - `POST /v1/credentials/:id/transfer` — current holder moves it

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use skillcert_core::{AccountId, CredentialId, MAX_METADATA_URI_LEN, MAX_SKILL_NAME_LEN};
use skillcert_registry::{CredentialRecord, MintRequest};
use utoipa::ToSchema;

use crate::auth::CallerAccount;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to mint a credential. The caller must be a verified issuer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MintCredentialRequest {
    /// Ledger principal the credential is minted to.
    pub holder: String,
    pub skill_name: String,
    /// Must name an active category.
    pub skill_category: String,
    /// Certification level wire code: 1 basic, 2 intermediate,
    /// 3 advanced, 4 expert.
    pub certification_level: u64,
    /// Validity window in ledger ticks; must be positive.
    pub validity_duration: u64,
    pub metadata_uri: String,
}

impl Validate for MintCredentialRequest {
    fn validate(&self) -> Result<(), String> {
        if self.skill_name.chars().count() > MAX_SKILL_NAME_LEN {
            return Err(format!("skill_name must not exceed {MAX_SKILL_NAME_LEN} characters"));
        }
        if self.metadata_uri.chars().count() > MAX_METADATA_URI_LEN {
            return Err(format!(
                "metadata_uri must not exceed {MAX_METADATA_URI_LEN} characters"
            ));
        }
        Ok(())
    }
}

/// Response to a successful mint.
#[derive(Debug, Serialize, ToSchema)]
pub struct MintCredentialResponse {
    /// The newly assigned credential id. Ids are dense from 1.
    pub credential_id: u64,
    /// Tick the credential was minted at.
    pub issue_date: u64,
    /// First tick at which the credential counts as expired.
    pub expiry_date: u64,
}

/// Credential record as returned by the API, with the lifecycle state
/// derived at the current tick.
#[derive(Debug, Serialize, ToSchema)]
pub struct CredentialDetails {
    pub credential_id: u64,
    pub holder: String,
    pub issuer: String,
    pub skill_name: String,
    pub skill_category: String,
    /// Certification level wire code (1–4).
    pub certification_level: u64,
    /// Skill-point weight this credential contributes to its holder.
    pub skill_points: u64,
    pub issue_date: u64,
    pub expiry_date: u64,
    pub verified: bool,
    pub metadata_uri: String,
    pub revoked: bool,
    /// Derived lifecycle state at the current tick: ACTIVE, EXPIRED, or
    /// REVOKED.
    pub state: String,
}

impl CredentialDetails {
    pub(crate) fn from_record(
        id: CredentialId,
        record: &CredentialRecord,
        now: skillcert_core::Tick,
    ) -> Self {
        CredentialDetails {
            credential_id: id.as_u64(),
            holder: record.holder.to_string(),
            issuer: record.issuer.to_string(),
            skill_name: record.skill_name.clone(),
            skill_category: record.skill_category.clone(),
            certification_level: record.certification_level.code(),
            skill_points: record.skill_points(),
            issue_date: record.issue_date.value(),
            expiry_date: record.expiry_date.value(),
            verified: record.verified,
            metadata_uri: record.metadata_uri.clone(),
            revoked: record.revoked,
            state: record.state(now).to_string(),
        }
    }
}

/// Validity probe result.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidityResponse {
    pub credential_id: u64,
    /// True iff the credential is neither revoked nor expired.
    pub valid: bool,
}

/// Authenticity check result. The check asserts existence and
/// administrator privilege; it records nothing on the credential.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthenticityCheckResponse {
    pub credential_id: u64,
    pub authentic: bool,
}

/// Request to renew a credential.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenewCredentialRequest {
    /// New validity window in ticks, counted from the renewal tick — not
    /// from the old expiry. Must be positive.
    pub new_validity_duration: u64,
}

impl Validate for RenewCredentialRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Request to transfer a credential to a new holder.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferCredentialRequest {
    /// Ledger principal receiving the credential.
    pub new_holder: String,
}

impl Validate for TransferCredentialRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/credentials", post(mint_credential))
        .route("/v1/credentials/:id", get(get_credential))
        .route("/v1/credentials/:id/validity", get(credential_validity))
        .route(
            "/v1/credentials/:id/authenticity-check",
            post(authenticity_check),
        )
        .route("/v1/credentials/:id/renew", post(renew_credential))
        .route("/v1/credentials/:id/revoke", post(revoke_credential))
        .route(
            "/v1/credentials/:id/emergency-revoke",
            post(emergency_revoke_credential),
        )
        .route("/v1/credentials/:id/transfer", post(transfer_credential))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/credentials — Mint a credential to a holder.
#[utoipa::path(
    post,
    path = "/v1/credentials",
    request_body = MintCredentialRequest,
    responses(
        (status = 201, description = "Credential minted", body = MintCredentialResponse),
        (status = 400, description = "Paused, bad level, zero duration, or missing/inactive category", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not a verified issuer", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn mint_credential(
    State(state): State<AppState>,
    caller: CallerAccount,
    body: Result<Json<MintCredentialRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MintCredentialResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let holder = AccountId::new(req.holder)?;
    let mut registry = state.registry.write();
    let now = state.clock.next_block();
    let id = registry.mint_credential(
        &caller.0,
        now,
        MintRequest {
            holder,
            skill_name: req.skill_name,
            skill_category: req.skill_category,
            certification_level: req.certification_level,
            validity_duration: req.validity_duration,
            metadata_uri: req.metadata_uri,
        },
    )?;
    let record = registry
        .credential(id)
        .ok_or_else(|| AppError::Internal("credential record missing after mint".into()))?;
    tracing::info!(credential = %id, issuer = %caller.0, "credential minted");
    Ok((
        StatusCode::CREATED,
        Json(MintCredentialResponse {
            credential_id: id.as_u64(),
            issue_date: record.issue_date.value(),
            expiry_date: record.expiry_date.value(),
        }),
    ))
}

/// GET /v1/credentials/:id — Credential record with derived state.
#[utoipa::path(
    get,
    path = "/v1/credentials/{id}",
    params(("id" = u64, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Credential found", body = CredentialDetails),
        (status = 404, description = "Credential unknown", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn get_credential(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CredentialDetails>, AppError> {
    let id = CredentialId(id);
    let registry = state.registry.read();
    registry
        .credential(id)
        .map(|record| Json(CredentialDetails::from_record(id, record, state.clock.now())))
        .ok_or_else(|| AppError::NotFound(format!("{id} does not exist")))
}

/// GET /v1/credentials/:id/validity — Validity probe.
///
/// An unknown id reports the distinguished registry code 0 rather than
/// the regular 102; both surface as 404 with the code in the details.
#[utoipa::path(
    get,
    path = "/v1/credentials/{id}/validity",
    params(("id" = u64, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Probe result", body = ValidityResponse),
        (status = 404, description = "Credential unknown (registry code 0)", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn credential_validity(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ValidityResponse>, AppError> {
    let id = CredentialId(id);
    let registry = state.registry.read();
    let valid = registry.credential_validity(id, state.clock.now())?;
    Ok(Json(ValidityResponse {
        credential_id: id.as_u64(),
        valid,
    }))
}

/// POST /v1/credentials/:id/authenticity-check — Admin assurance probe.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/authenticity-check",
    params(("id" = u64, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Credential exists; no state recorded", body = AuthenticityCheckResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
        (status = 404, description = "Credential unknown", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn authenticity_check(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(id): Path<u64>,
) -> Result<Json<AuthenticityCheckResponse>, AppError> {
    let id = CredentialId(id);
    let registry = state.registry.read();
    registry.verify_credential_authenticity(&caller.0, id)?;
    Ok(Json(AuthenticityCheckResponse {
        credential_id: id.as_u64(),
        authentic: true,
    }))
}

/// POST /v1/credentials/:id/renew — Issuer re-extends a credential.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/renew",
    params(("id" = u64, Path, description = "Credential id")),
    request_body = RenewCredentialRequest,
    responses(
        (status = 200, description = "Expiry re-extended from the current tick", body = CredentialDetails),
        (status = 400, description = "Paused, revoked, or zero duration", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not the credential's issuer", body = crate::error::ErrorBody),
        (status = 404, description = "Credential unknown", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn renew_credential(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(id): Path<u64>,
    body: Result<Json<RenewCredentialRequest>, JsonRejection>,
) -> Result<Json<CredentialDetails>, AppError> {
    let req = extract_validated_json(body)?;
    let id = CredentialId(id);
    let mut registry = state.registry.write();
    let now = state.clock.next_block();
    registry.renew_credential(&caller.0, now, id, req.new_validity_duration)?;
    let record = registry
        .credential(id)
        .ok_or_else(|| AppError::Internal("credential record missing after renewal".into()))?;
    Ok(Json(CredentialDetails::from_record(id, record, now)))
}

/// POST /v1/credentials/:id/revoke — Issuer-initiated revocation.
///
/// Blocked in the current contract version: after the existence and
/// issuer checks the registry reports the invalid-parameter code and
/// nothing changes. Revocation is reserved to the emergency path.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/revoke",
    params(("id" = u64, Path, description = "Credential id")),
    responses(
        (status = 400, description = "Issuer revocation is disabled (registry code 103)", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not the credential's issuer", body = crate::error::ErrorBody),
        (status = 404, description = "Credential unknown", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn revoke_credential(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(id): Path<u64>,
) -> Result<Json<CredentialDetails>, AppError> {
    let id = CredentialId(id);
    let registry = state.registry.read();
    registry.revoke_credential(&caller.0, id)?;
    // The registry never reaches Ok for this operation in the current
    // contract version.
    Err(AppError::Internal(
        "issuer revocation unexpectedly succeeded".into(),
    ))
}

/// POST /v1/credentials/:id/emergency-revoke — Admin terminal revocation.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/emergency-revoke",
    params(("id" = u64, Path, description = "Credential id")),
    responses(
        (status = 200, description = "Credential revoked, terminal", body = CredentialDetails),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
        (status = 404, description = "Credential unknown", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn emergency_revoke_credential(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(id): Path<u64>,
) -> Result<Json<CredentialDetails>, AppError> {
    let id = CredentialId(id);
    let mut registry = state.registry.write();
    let now = state.clock.next_block();
    registry.emergency_revoke_credential(&caller.0, id)?;
    let record = registry
        .credential(id)
        .ok_or_else(|| AppError::Internal("credential record missing after revocation".into()))?;
    tracing::warn!(credential = %id, admin = %caller.0, "credential emergency-revoked");
    Ok(Json(CredentialDetails::from_record(id, record, now)))
}

/// POST /v1/credentials/:id/transfer — Current holder moves a credential.
#[utoipa::path(
    post,
    path = "/v1/credentials/{id}/transfer",
    params(("id" = u64, Path, description = "Credential id")),
    request_body = TransferCredentialRequest,
    responses(
        (status = 200, description = "Credential transferred; both profiles adjusted", body = CredentialDetails),
        (status = 400, description = "Credential revoked", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not the current holder", body = crate::error::ErrorBody),
        (status = 404, description = "Credential unknown", body = crate::error::ErrorBody),
        (status = 409, description = "Credential expired", body = crate::error::ErrorBody),
    ),
    tag = "credentials"
)]
async fn transfer_credential(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(id): Path<u64>,
    body: Result<Json<TransferCredentialRequest>, JsonRejection>,
) -> Result<Json<CredentialDetails>, AppError> {
    let req = extract_validated_json(body)?;
    let new_holder = AccountId::new(req.new_holder)?;
    let id = CredentialId(id);
    let mut registry = state.registry.write();
    let now = state.clock.next_block();
    registry.transfer_credential(&caller.0, now, id, new_holder)?;
    let record = registry
        .credential(id)
        .ok_or_else(|| AppError::Internal("credential record missing after transfer".into()))?;
    Ok(Json(CredentialDetails::from_record(id, record, now)))
}
