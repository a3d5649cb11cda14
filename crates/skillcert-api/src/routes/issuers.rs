//! # Issuer Registry API
//!
//! Issuer registration, administrator verification, and issuer info.
//!
//! ## Endpoints
//!
//! - `POST /v1/issuers` — register the calling account as an issuer
//! - `POST /v1/issuers/:account/verify` — admin verifies an issuer
//! - `GET /v1/issuers/:account` — issuer record

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use skillcert_core::{AccountId, MAX_ISSUER_NAME_LEN};
use skillcert_registry::IssuerRecord;
use utoipa::ToSchema;

use crate::auth::CallerAccount;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to register the calling account as an issuer.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterIssuerRequest {
    /// Display name of the issuing organization.
    pub name: String,
    /// Organization class wire code: 1 educational, 2 corporate,
    /// 3 professional.
    pub issuer_type: u64,
}

impl Validate for RegisterIssuerRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.chars().count() > MAX_ISSUER_NAME_LEN {
            return Err(format!("name must not exceed {MAX_ISSUER_NAME_LEN} characters"));
        }
        Ok(())
    }
}

/// Issuer record as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct IssuerInfo {
    /// Ledger principal the issuer registered under.
    pub account: String,
    pub name: String,
    /// Organization class wire code (1–3).
    pub issuer_type: u64,
    pub verified: bool,
    pub credentials_issued: u64,
    pub reputation_score: u64,
}

impl IssuerInfo {
    pub(crate) fn from_record(account: &AccountId, record: &IssuerRecord) -> Self {
        IssuerInfo {
            account: account.to_string(),
            name: record.name.clone(),
            issuer_type: record.issuer_type.code(),
            verified: record.verified,
            credentials_issued: record.credentials_issued,
            reputation_score: record.reputation_score,
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/issuers", post(register_issuer))
        .route("/v1/issuers/:account", get(get_issuer))
        .route("/v1/issuers/:account/verify", post(verify_issuer))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/issuers — Register the calling account as an issuer.
#[utoipa::path(
    post,
    path = "/v1/issuers",
    request_body = RegisterIssuerRequest,
    responses(
        (status = 201, description = "Issuer registered, unverified", body = IssuerInfo),
        (status = 400, description = "Paused, bad issuer type, or duplicate registration", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "issuers"
)]
async fn register_issuer(
    State(state): State<AppState>,
    caller: CallerAccount,
    body: Result<Json<RegisterIssuerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<IssuerInfo>), AppError> {
    let req = extract_validated_json(body)?;
    let mut registry = state.registry.write();
    state.clock.next_block();
    registry.register_issuer(&caller.0, &req.name, req.issuer_type)?;
    let record = registry
        .issuer(&caller.0)
        .ok_or_else(|| AppError::Internal("issuer record missing after registration".into()))?;
    Ok((
        StatusCode::CREATED,
        Json(IssuerInfo::from_record(&caller.0, record)),
    ))
}

/// POST /v1/issuers/:account/verify — Admin verifies an issuer.
#[utoipa::path(
    post,
    path = "/v1/issuers/{account}/verify",
    params(("account" = String, Path, description = "Issuer ledger principal")),
    responses(
        (status = 200, description = "Issuer verified", body = IssuerInfo),
        (status = 403, description = "Caller is not the administrator, or issuer unregistered", body = crate::error::ErrorBody),
        (status = 409, description = "Issuer already verified", body = crate::error::ErrorBody),
    ),
    tag = "issuers"
)]
async fn verify_issuer(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(account): Path<String>,
) -> Result<Json<IssuerInfo>, AppError> {
    let issuer = AccountId::new(account)?;
    let mut registry = state.registry.write();
    state.clock.next_block();
    registry.verify_issuer(&caller.0, &issuer)?;
    let record = registry
        .issuer(&issuer)
        .ok_or_else(|| AppError::Internal("issuer record missing after verification".into()))?;
    Ok(Json(IssuerInfo::from_record(&issuer, record)))
}

/// GET /v1/issuers/:account — Issuer record.
#[utoipa::path(
    get,
    path = "/v1/issuers/{account}",
    params(("account" = String, Path, description = "Issuer ledger principal")),
    responses(
        (status = 200, description = "Issuer found", body = IssuerInfo),
        (status = 404, description = "Issuer not registered", body = crate::error::ErrorBody),
    ),
    tag = "issuers"
)]
async fn get_issuer(
    State(state): State<AppState>,
    Path(account): Path<String>,
) -> Result<Json<IssuerInfo>, AppError> {
    let account = AccountId::new(account)?;
    let registry = state.registry.read();
    registry
        .issuer(&account)
        .map(|record| Json(IssuerInfo::from_record(&account, record)))
        .ok_or_else(|| AppError::NotFound(format!("issuer {account} is not registered")))
}
