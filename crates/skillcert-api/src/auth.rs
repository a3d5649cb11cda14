//! # Authentication & Caller Identity
//!
//! Two separate concerns, deliberately kept apart:
//!
//! 1. **Bearer token** — `Authorization: Bearer <token>` gates the whole
//!    API surface (health probes, metrics, and the OpenAPI document stay
//!    open). The token is an infrastructure credential; it says nothing
//!    about who the caller is on the ledger.
//! 2. **Caller account** — the `x-caller-account` header carries the
//!    opaque ledger principal the operation executes as. The registry
//!    authorizes against this value (admin equality, credential issuer,
//!    current holder). In the original deployment the host ledger proved
//!    this binding; here it is an explicit collaborator supplied per
//!    request.
//!
//! When `AuthConfig.token` is `None`, all requests pass (auth disabled,
//! development and test mode).

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use skillcert_core::AccountId;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::{AppError, ErrorBody, ErrorDetail};

/// Header naming the ledger principal a request executes as.
pub const CALLER_ACCOUNT_HEADER: &str = "x-caller-account";

// ── Secret token ────────────────────────────────────────────────────

/// A bearer secret that zeroizes on drop and never prints its value.
#[derive(Clone)]
pub struct SecretToken(Zeroizing<String>);

impl SecretToken {
    pub fn new(raw: impl Into<String>) -> Self {
        SecretToken(Zeroizing::new(raw.into()))
    }

    /// Constant-time comparison against a provided token.
    ///
    /// When lengths differ, a dummy comparison runs anyway so the timing
    /// does not reveal whether the length matched.
    pub fn matches(&self, provided: &str) -> bool {
        let expected = self.0.as_bytes();
        let provided = provided.as_bytes();
        if provided.len() != expected.len() {
            let _ = expected.ct_eq(expected);
            return false;
        }
        provided.ct_eq(expected).into()
    }
}

impl std::fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}

// ── Auth configuration ──────────────────────────────────────────────

/// Auth configuration injected into request extensions.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token: Option<SecretToken>,
}

// ── Caller identity extractor ───────────────────────────────────────

/// The ledger principal a request executes as, read from
/// [`CALLER_ACCOUNT_HEADER`].
///
/// Handlers for mutating operations take this as an extractor argument.
/// A missing header rejects with 401; a malformed principal rejects with
/// 422 before the registry is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerAccount(pub AccountId);

#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for CallerAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CALLER_ACCOUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(format!("missing {CALLER_ACCOUNT_HEADER} header"))
            })?;
        let account = AccountId::new(raw)?;
        Ok(CallerAccount(account))
    }
}

// ── Middleware ──────────────────────────────────────────────────────

/// Validate the Bearer token from the Authorization header.
///
/// The caller-account header is not touched here; it is extracted per
/// handler so that read-only endpoints stay anonymous.
pub async fn auth_middleware(request: Request, next: Next) -> Response {
    let config = request.extensions().get::<AuthConfig>().cloned();

    match config {
        Some(AuthConfig {
            token: Some(ref expected),
        }) => {
            let auth_header = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok());

            match auth_header {
                Some(value) if value.starts_with("Bearer ") => {
                    if expected.matches(&value[7..]) {
                        next.run(request).await
                    } else {
                        tracing::warn!("authentication failed: invalid bearer token");
                        unauthorized_response("invalid bearer token")
                    }
                }
                Some(_) => {
                    tracing::warn!("authentication failed: non-Bearer authorization scheme");
                    unauthorized_response("authorization header must use Bearer scheme")
                }
                None => {
                    tracing::warn!("authentication failed: missing authorization header");
                    unauthorized_response("missing authorization header")
                }
            }
        }
        _ => next.run(request).await,
    }
}

fn unauthorized_response(message: &str) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
            details: None,
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn echo_caller(caller: CallerAccount) -> String {
        caller.0.to_string()
    }

    /// Minimal router with the auth middleware and a caller-echo handler.
    fn test_app(token: Option<&str>) -> Router {
        let auth_config = AuthConfig {
            token: token.map(SecretToken::new),
        };
        Router::new()
            .route("/test", get(|| async { "ok" }))
            .route("/caller", get(echo_caller))
            .layer(from_fn(auth_middleware))
            .layer(axum::Extension(auth_config))
    }

    // ── Bearer token ────────────────────────────────────────────────

    #[tokio::test]
    async fn valid_bearer_token_accepted() {
        let app = test_app(Some("my-secret"));
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer my-secret")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn missing_authorization_header_rejected() {
        let app = test_app(Some("my-secret"));
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(err["error"]["code"], "UNAUTHORIZED");
        assert!(err["error"]["message"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn invalid_token_rejected() {
        let app = test_app(Some("my-secret"));
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer wrong-token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_rejected() {
        let app = test_app(Some("my-secret"));
        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(err["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Bearer scheme"));
    }

    #[tokio::test]
    async fn auth_disabled_allows_all_requests() {
        let app = test_app(None);
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // ── SecretToken ─────────────────────────────────────────────────

    #[test]
    fn secret_token_matches_identical() {
        assert!(SecretToken::new("secret-token-123").matches("secret-token-123"));
    }

    #[test]
    fn secret_token_rejects_wrong_value() {
        assert!(!SecretToken::new("secret-token-123").matches("wrong-token"));
    }

    #[test]
    fn secret_token_rejects_prefix() {
        assert!(!SecretToken::new("secret-token-123").matches("secret"));
    }

    #[test]
    fn secret_token_rejects_empty() {
        assert!(!SecretToken::new("secret-token-123").matches(""));
    }

    #[test]
    fn secret_token_debug_is_redacted() {
        let token = SecretToken::new("super-secret");
        assert!(!format!("{token:?}").contains("super-secret"));
    }

    // ── CallerAccount extractor ─────────────────────────────────────

    #[tokio::test]
    async fn caller_account_extracted_from_header() {
        let app = test_app(None);
        let request = Request::builder()
            .uri("/caller")
            .header(CALLER_ACCOUNT_HEADER, "ST1ISSUER")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"ST1ISSUER");
    }

    #[tokio::test]
    async fn missing_caller_header_rejected_unauthorized() {
        let app = test_app(None);
        let request = Request::builder().uri("/caller").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_caller_header_rejected_as_validation_error() {
        let app = test_app(None);
        let request = Request::builder()
            .uri("/caller")
            .header(CALLER_ACCOUNT_HEADER, "has whitespace")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
