//! # skillcert-api — Axum HTTP Surface for the SkillCert Registry
//!
//! Serves the certification registry over HTTP: issuer registration and
//! verification, the skill-category taxonomy, the credential lifecycle,
//! derived holder profiles, and the administrator's console.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                  | Domain                    |
//! |-------------------------|-------------------------|---------------------------|
//! | `/v1/issuers/*`         | [`routes::issuers`]     | Issuer registry           |
//! | `/v1/categories/*`      | [`routes::categories`]  | Skill-category taxonomy   |
//! | `/v1/credentials/*`     | [`routes::credentials`] | Credential lifecycle      |
//! | `/v1/holders/*`         | [`routes::holders`]     | Holder profiles           |
//! | `/v1/admin/*`           | [`routes::admin`]       | Pause, fees, clock, dashboard |
//! | `/v1/registry/stats`    | [`routes::admin`]       | Public snapshot           |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → AuthMiddleware → Handler
//! ```
//!
//! Health probes, `/metrics`, and `/openapi.json` are mounted outside the
//! auth middleware so they remain accessible without credentials.
//!
//! ## Identity
//!
//! The bearer token authenticates the request; the `x-caller-account`
//! header names the ledger principal the operation executes as. The
//! registry itself decides authorization (admin equality, credential
//! issuer, current holder) and reports refusals through its stable
//! numeric code contract, surfaced in `details.registry_code` of every
//! error body.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod metrics;
pub mod openapi;
pub mod routes;
pub mod seed;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::metrics::ApiMetrics;
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };
    let metrics = ApiMetrics::new();

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::issuers::router())
        .merge(routes::categories::router())
        .merge(routes::credentials::router())
        .merge(routes::holders::router())
        .merge(routes::admin::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(from_fn(metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .layer(Extension(metrics.clone()))
        .with_state(state.clone());

    // Unauthenticated: health probes, metrics scrape, OpenAPI document.
    let unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness))
        .route("/metrics", axum::routing::get(prometheus_metrics))
        .merge(openapi::router())
        .layer(Extension(metrics))
        .with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET /metrics — Prometheus metrics scrape endpoint.
///
/// Updates domain gauges from the current registry snapshot on each
/// scrape (pull model), then encodes everything in text exposition
/// format.
async fn prometheus_metrics(
    State(state): State<AppState>,
    Extension(metrics): Extension<ApiMetrics>,
) -> impl IntoResponse {
    match metrics::scrape(&state, &metrics) {
        Ok(body) => (
            StatusCode::OK,
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode Prometheus metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e).into_response()
        }
    }
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the registry lock is acquirable (not
/// deadlocked). `parking_lot::RwLock::try_read` is non-blocking.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    if state.registry.try_read().is_none() {
        return (StatusCode::SERVICE_UNAVAILABLE, "registry locked").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
