//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps registry errors to HTTP status codes while preserving the stable
//! numeric registry contract: every registry failure carries its code
//! (100–106, or the distinguished 0) in `details.registry_code`, so
//! ledger-aware clients keep the exact error taxonomy the original
//! contract surfaced.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use skillcert_registry::RegistryError;
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "FORBIDDEN").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional context. Registry failures carry `registry_code` here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication failure — missing or invalid token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failure — insufficient permissions (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A registry operation refused the call. Status follows the numeric
    /// contract (see [`RegistryError::code`]).
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Internal server error (500). Message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    ///
    /// Registry codes map per the contract table: 100/101/105 are
    /// authorization failures (403), 102 and the distinguished 0 are
    /// misses (404), 103 is a precondition failure (400), 104 and 106
    /// conflict with the record's current state (409).
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Registry(err) => match err {
                RegistryError::NotOwner => (StatusCode::FORBIDDEN, "NOT_OWNER"),
                RegistryError::NotAuthorized => (StatusCode::FORBIDDEN, "NOT_AUTHORIZED"),
                RegistryError::CredentialNotFound { .. } => {
                    (StatusCode::NOT_FOUND, "CREDENTIAL_NOT_FOUND")
                }
                RegistryError::InvalidParameter { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_PARAMETER")
                }
                RegistryError::AlreadyVerified => (StatusCode::CONFLICT, "ALREADY_VERIFIED"),
                RegistryError::NotVerified => (StatusCode::FORBIDDEN, "NOT_VERIFIED"),
                RegistryError::ExpiredCredential { .. } => {
                    (StatusCode::CONFLICT, "EXPIRED_CREDENTIAL")
                }
                RegistryError::UnknownCredential { .. } => {
                    (StatusCode::NOT_FOUND, "UNKNOWN_CREDENTIAL")
                }
            },
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match &self {
            Self::Registry(err) => Some(serde_json::json!({ "registry_code": err.code() })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert skillcert-core validation errors to API errors.
impl From<skillcert_core::ValidationError> for AppError {
    fn from(err: skillcert_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use skillcert_core::CredentialId;

    #[test]
    fn plain_variants_map_to_expected_statuses() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (
                AppError::Unauthorized("x".into()),
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
            ),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code));
        }
    }

    #[test]
    fn registry_codes_map_per_contract() {
        let id = CredentialId(9);
        let cases = [
            (RegistryError::NotOwner, StatusCode::FORBIDDEN),
            (RegistryError::NotAuthorized, StatusCode::FORBIDDEN),
            (RegistryError::CredentialNotFound { id }, StatusCode::NOT_FOUND),
            (
                RegistryError::InvalidParameter { reason: "registry is paused" },
                StatusCode::BAD_REQUEST,
            ),
            (RegistryError::AlreadyVerified, StatusCode::CONFLICT),
            (RegistryError::NotVerified, StatusCode::FORBIDDEN),
            (RegistryError::ExpiredCredential { id }, StatusCode::CONFLICT),
            (RegistryError::UnknownCredential { id }, StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            let (got, _) = AppError::Registry(err).status_and_code();
            assert_eq!(got, status);
        }
    }

    /// Helper to extract status and body from a response.
    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn registry_error_body_carries_numeric_code() {
        let (status, body) = response_parts(AppError::Registry(RegistryError::NotOwner)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.error.code, "NOT_OWNER");
        assert_eq!(body.error.details.unwrap()["registry_code"], 100);
    }

    #[tokio::test]
    async fn validity_probe_miss_carries_zero_code() {
        let err = AppError::Registry(RegistryError::UnknownCredential { id: CredentialId(4) });
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.details.unwrap()["registry_code"], 0);
    }

    #[tokio::test]
    async fn expired_credential_conflicts() {
        let err = AppError::Registry(RegistryError::ExpiredCredential { id: CredentialId(2) });
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error.details.unwrap()["registry_code"], 106);
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let (status, body) = response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn non_registry_errors_omit_details() {
        let (_, body) = response_parts(AppError::NotFound("issuer ST1X".into())).await;
        assert!(body.error.details.is_none());
    }

    #[test]
    fn validation_error_from_core() {
        let core_err = skillcert_core::ValidationError::InvalidAccountId {
            reason: "must not be empty".into(),
        };
        match AppError::from(core_err) {
            AppError::Validation(msg) => assert!(msg.contains("must not be empty")),
            other => panic!("expected Validation, got: {other:?}"),
        }
    }
}
