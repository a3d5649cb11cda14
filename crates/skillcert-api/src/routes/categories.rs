//! # Skill Category API
//!
//! The admin-curated taxonomy credentials are minted under.
//!
//! ## Endpoints
//!
//! - `POST /v1/categories` — admin creates a category
//! - `POST /v1/categories/:name/deactivate` — admin retires a category
//! - `GET /v1/categories/:name` — category record
//! - `GET /v1/categories` — all categories

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use skillcert_core::{MAX_CATEGORY_DESCRIPTION_LEN, MAX_CATEGORY_NAME_LEN};
use skillcert_registry::SkillCategoryRecord;
use utoipa::ToSchema;

use crate::auth::CallerAccount;
use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Request to create a skill category.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddCategoryRequest {
    /// Category name; unique registry-wide and used as the key.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl Validate for AddCategoryRequest {
    fn validate(&self) -> Result<(), String> {
        if self.name.chars().count() > MAX_CATEGORY_NAME_LEN {
            return Err(format!("name must not exceed {MAX_CATEGORY_NAME_LEN} characters"));
        }
        if self.description.chars().count() > MAX_CATEGORY_DESCRIPTION_LEN {
            return Err(format!(
                "description must not exceed {MAX_CATEGORY_DESCRIPTION_LEN} characters"
            ));
        }
        Ok(())
    }
}

/// Skill category record as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryInfo {
    pub name: String,
    pub active: bool,
    /// Credentials ever minted under this category.
    pub total_credentials: u64,
    pub description: String,
}

impl CategoryInfo {
    pub(crate) fn from_record(name: &str, record: &SkillCategoryRecord) -> Self {
        CategoryInfo {
            name: name.to_string(),
            active: record.active,
            total_credentials: record.total_credentials,
            description: record.category_description.clone(),
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/categories", get(list_categories).post(add_category))
        .route("/v1/categories/:name", get(get_category))
        .route("/v1/categories/:name/deactivate", post(deactivate_category))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/categories — Admin creates a skill category.
#[utoipa::path(
    post,
    path = "/v1/categories",
    request_body = AddCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryInfo),
        (status = 400, description = "Duplicate category name", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
    ),
    tag = "categories"
)]
async fn add_category(
    State(state): State<AppState>,
    caller: CallerAccount,
    body: Result<Json<AddCategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CategoryInfo>), AppError> {
    let req = extract_validated_json(body)?;
    let mut registry = state.registry.write();
    state.clock.next_block();
    registry.add_skill_category(&caller.0, &req.name, &req.description)?;
    let record = registry
        .skill_category(&req.name)
        .ok_or_else(|| AppError::Internal("category record missing after creation".into()))?;
    Ok((
        StatusCode::CREATED,
        Json(CategoryInfo::from_record(&req.name, record)),
    ))
}

/// POST /v1/categories/:name/deactivate — Admin retires a category.
#[utoipa::path(
    post,
    path = "/v1/categories/{name}/deactivate",
    params(("name" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Category deactivated", body = CategoryInfo),
        (status = 400, description = "Unknown category", body = crate::error::ErrorBody),
        (status = 403, description = "Caller is not the administrator", body = crate::error::ErrorBody),
    ),
    tag = "categories"
)]
async fn deactivate_category(
    State(state): State<AppState>,
    caller: CallerAccount,
    Path(name): Path<String>,
) -> Result<Json<CategoryInfo>, AppError> {
    let mut registry = state.registry.write();
    state.clock.next_block();
    registry.deactivate_skill_category(&caller.0, &name)?;
    let record = registry
        .skill_category(&name)
        .ok_or_else(|| AppError::Internal("category record missing after deactivation".into()))?;
    Ok(Json(CategoryInfo::from_record(&name, record)))
}

/// GET /v1/categories/:name — Category record.
#[utoipa::path(
    get,
    path = "/v1/categories/{name}",
    params(("name" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Category found", body = CategoryInfo),
        (status = 404, description = "Category unknown", body = crate::error::ErrorBody),
    ),
    tag = "categories"
)]
async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<CategoryInfo>, AppError> {
    let registry = state.registry.read();
    registry
        .skill_category(&name)
        .map(|record| Json(CategoryInfo::from_record(&name, record)))
        .ok_or_else(|| AppError::NotFound(format!("category \"{name}\" does not exist")))
}

/// GET /v1/categories — All categories.
#[utoipa::path(
    get,
    path = "/v1/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryInfo>),
    ),
    tag = "categories"
)]
async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryInfo>> {
    let registry = state.registry.read();
    let mut categories: Vec<CategoryInfo> = registry
        .skill_categories()
        .map(|(name, record)| CategoryInfo::from_record(name, record))
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    Json(categories)
}
