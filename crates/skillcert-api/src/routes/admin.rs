//! # Administration & Registry Stats API
//!
//! The administrator's console: the pause toggle, fee treasury, ledger
//! clock control, and a dashboard. The public stats endpoint lives here
//! too — it is the same snapshot without the admin gate.
//!
//! ## Endpoints
//!
//! - `POST /v1/admin/pause` — toggle the global pause flag
//! - `POST /v1/admin/fees/rate` — set the per-mint fee rate
//! - `POST /v1/admin/fees/withdraw` — drain the accumulated fee balance
//! - `POST /v1/admin/clock/advance` — advance the ledger clock
//! - `GET /v1/admin/dashboard` — admin view: snapshot plus clock
//! - `GET /v1/registry/stats` — public registry snapshot

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use skillcert_registry::{RegistryError, RegistrySnapshot};
use utoipa::ToSchema;

use crate::auth::CallerAccount;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Pause toggle result.
#[derive(Debug, Serialize, ToSchema)]
pub struct PauseResponse {
    /// The pause state after the toggle.
    pub paused: bool,
}

/// Request to set the per-mint platform fee rate.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFeeRateRequest {
    /// Fee in micro-units of the ledger's base currency. Capped at
    /// 5,000,000 (5 base units).
    pub amount: u64,
}

impl Validate for SetFeeRateRequest {
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Fee rate after an update.
#[derive(Debug, Serialize, ToSchema)]
pub struct FeeRateResponse {
    pub platform_fee_rate: u64,
}

/// Result of a treasury withdrawal.
#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawFeesResponse {
    /// Amount drained to the administrator. Zero is a valid withdrawal.
    pub withdrawn: u64,
}

/// Request to advance the ledger clock.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AdvanceClockRequest {
    /// Number of ticks to advance by. Must be positive.
    pub ticks: u64,
}

impl Validate for AdvanceClockRequest {
    fn validate(&self) -> Result<(), String> {
        if self.ticks == 0 {
            return Err("ticks must be positive".to_string());
        }
        Ok(())
    }
}

/// Current ledger clock position.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClockResponse {
    pub current_tick: u64,
}

/// Point-in-time registry statistics.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
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

impl From<RegistrySnapshot> for StatsResponse {
    fn from(snapshot: RegistrySnapshot) -> Self {
        StatsResponse {
            total_credentials: snapshot.total_credentials,
            active_credentials: snapshot.active_credentials,
            expired_credentials: snapshot.expired_credentials,
            revoked_credentials: snapshot.revoked_credentials,
            total_issuers: snapshot.total_issuers,
            verified_issuers: snapshot.verified_issuers,
            total_categories: snapshot.total_categories,
            active_categories: snapshot.active_categories,
            holder_profiles: snapshot.holder_profiles,
            paused: snapshot.paused,
            platform_fee_rate: snapshot.platform_fee_rate,
            accumulated_fees: snapshot.accumulated_fees,
        }
    }
}

/// Administrator dashboard: the snapshot plus the clock position.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub current_tick: u64,
    pub admin_account: String,
    pub stats: StatsResponse,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/admin/pause", post(toggle_pause))
        .route("/v1/admin/fees/rate", post(set_fee_rate))
        .route("/v1/admin/fees/withdraw", post(withdraw_fees))
        .route("/v1/admin/clock/advance", post(advance_clock))
        .route("/v1/admin/dashboard", get(dashboard))
        .route("/v1/registry/stats", get(registry_stats))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/admin/pause — Toggle the global pause flag.
#[utoipa::path(
    post,
    path = "/v1/admin/pause",
    responses(
        (status = 200, description = "Pause flag flipped", body = PauseResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
    ),
    tag = "admin"
)]
async fn toggle_pause(
    State(state): State<AppState>,
    caller: CallerAccount,
) -> Result<Json<PauseResponse>, AppError> {
    let mut registry = state.registry.write();
    state.clock.next_block();
    let paused = registry.toggle_pause(&caller.0)?;
    tracing::info!(paused, "registry pause toggled");
    Ok(Json(PauseResponse { paused }))
}

/// POST /v1/admin/fees/rate — Set the per-mint fee rate.
#[utoipa::path(
    post,
    path = "/v1/admin/fees/rate",
    request_body = SetFeeRateRequest,
    responses(
        (status = 200, description = "Fee rate updated", body = FeeRateResponse),
        (status = 400, description = "Rate exceeds the configured maximum", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
    ),
    tag = "admin"
)]
async fn set_fee_rate(
    State(state): State<AppState>,
    caller: CallerAccount,
    body: Result<Json<SetFeeRateRequest>, JsonRejection>,
) -> Result<Json<FeeRateResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let mut registry = state.registry.write();
    state.clock.next_block();
    registry.set_platform_fee(&caller.0, req.amount)?;
    Ok(Json(FeeRateResponse {
        platform_fee_rate: registry.platform_fee_rate(),
    }))
}

/// POST /v1/admin/fees/withdraw — Drain the accumulated fee balance.
///
/// The actual currency transfer is the host ledger's concern; the
/// registry reports the drained amount and zeroes the balance.
#[utoipa::path(
    post,
    path = "/v1/admin/fees/withdraw",
    responses(
        (status = 200, description = "Balance drained (zero is valid)", body = WithdrawFeesResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
    ),
    tag = "admin"
)]
async fn withdraw_fees(
    State(state): State<AppState>,
    caller: CallerAccount,
) -> Result<Json<WithdrawFeesResponse>, AppError> {
    let mut registry = state.registry.write();
    state.clock.next_block();
    let withdrawn = registry.withdraw_platform_fees(&caller.0)?;
    tracing::info!(withdrawn, "platform fees withdrawn");
    Ok(Json(WithdrawFeesResponse { withdrawn }))
}

/// POST /v1/admin/clock/advance — Advance the ledger clock.
///
/// The clock is API-layer state, not a registry operation, so the admin
/// gate is checked here with the same numeric contract.
#[utoipa::path(
    post,
    path = "/v1/admin/clock/advance",
    request_body = AdvanceClockRequest,
    responses(
        (status = 200, description = "Clock advanced", body = ClockResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
        (status = 422, description = "Zero ticks", body = crate::error::ErrorBody),
    ),
    tag = "admin"
)]
async fn advance_clock(
    State(state): State<AppState>,
    caller: CallerAccount,
    body: Result<Json<AdvanceClockRequest>, JsonRejection>,
) -> Result<Json<ClockResponse>, AppError> {
    let req = extract_validated_json(body)?;
    if !state.registry.read().is_admin(&caller.0) {
        return Err(RegistryError::NotOwner.into());
    }
    let now = state.clock.advance(req.ticks);
    tracing::info!(tick = now.value(), "ledger clock advanced");
    Ok(Json(ClockResponse {
        current_tick: now.value(),
    }))
}

/// GET /v1/admin/dashboard — Administrator view of the registry.
#[utoipa::path(
    get,
    path = "/v1/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard", body = DashboardResponse),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
    ),
    tag = "admin"
)]
async fn dashboard(
    State(state): State<AppState>,
    caller: CallerAccount,
) -> Result<Json<DashboardResponse>, AppError> {
    let registry = state.registry.read();
    if !registry.is_admin(&caller.0) {
        return Err(RegistryError::NotOwner.into());
    }
    let now = state.clock.now();
    Ok(Json(DashboardResponse {
        current_tick: now.value(),
        admin_account: registry.admin().to_string(),
        stats: registry.snapshot(now).into(),
    }))
}

/// GET /v1/registry/stats — Public registry snapshot.
#[utoipa::path(
    get,
    path = "/v1/registry/stats",
    responses(
        (status = 200, description = "Registry statistics", body = StatsResponse),
    ),
    tag = "admin"
)]
async fn registry_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let registry = state.registry.read();
    Json(registry.snapshot(state.clock.now()).into())
}
