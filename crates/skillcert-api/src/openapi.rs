//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served unauthenticated at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SkillCert API — Credential Issuance & Verification Registry",
        version = "0.1.0",
        description = "Issuer registration and verification, the admin-curated skill-category taxonomy, the credential lifecycle (mint, renew, transfer, revocation paths, validity probe), derived holder profiles, and the platform fee treasury.",
        license(name = "Apache-2.0")
    ),
    paths(
        // Issuers
        crate::routes::issuers::register_issuer,
        crate::routes::issuers::verify_issuer,
        crate::routes::issuers::get_issuer,
        // Categories
        crate::routes::categories::add_category,
        crate::routes::categories::deactivate_category,
        crate::routes::categories::get_category,
        crate::routes::categories::list_categories,
        // Credentials
        crate::routes::credentials::mint_credential,
        crate::routes::credentials::get_credential,
        crate::routes::credentials::credential_validity,
        crate::routes::credentials::authenticity_check,
        crate::routes::credentials::renew_credential,
        crate::routes::credentials::revoke_credential,
        crate::routes::credentials::emergency_revoke_credential,
        crate::routes::credentials::transfer_credential,
        // Holders
        crate::routes::holders::get_holder_profile,
        // Admin
        crate::routes::admin::toggle_pause,
        crate::routes::admin::set_fee_rate,
        crate::routes::admin::withdraw_fees,
        crate::routes::admin::advance_clock,
        crate::routes::admin::dashboard,
        crate::routes::admin::registry_stats,
    ),
    components(schemas(
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        // Issuer DTOs
        crate::routes::issuers::RegisterIssuerRequest,
        crate::routes::issuers::IssuerInfo,
        // Category DTOs
        crate::routes::categories::AddCategoryRequest,
        crate::routes::categories::CategoryInfo,
        // Credential DTOs
        crate::routes::credentials::MintCredentialRequest,
        crate::routes::credentials::MintCredentialResponse,
        crate::routes::credentials::CredentialDetails,
        crate::routes::credentials::ValidityResponse,
        crate::routes::credentials::AuthenticityCheckResponse,
        crate::routes::credentials::RenewCredentialRequest,
        crate::routes::credentials::TransferCredentialRequest,
        // Holder DTOs
        crate::routes::holders::HolderProfileInfo,
        // Admin DTOs
        crate::routes::admin::PauseResponse,
        crate::routes::admin::SetFeeRateRequest,
        crate::routes::admin::FeeRateResponse,
        crate::routes::admin::WithdrawFeesResponse,
        crate::routes::admin::AdvanceClockRequest,
        crate::routes::admin::ClockResponse,
        crate::routes::admin::StatsResponse,
        crate::routes::admin::DashboardResponse,
    )),
    tags(
        (name = "issuers", description = "Issuer registration and verification"),
        (name = "categories", description = "Admin-curated skill-category taxonomy"),
        (name = "credentials", description = "Credential lifecycle operations"),
        (name = "holders", description = "Derived holder profiles"),
        (name = "admin", description = "Administration, fee treasury, ledger clock, stats"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router, serving the JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
