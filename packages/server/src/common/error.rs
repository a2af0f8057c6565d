//! Domain error type shared by all effects and routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use super::auth::AuthError;

/// Errors returned by domain operations.
///
/// Every error is reported synchronously to the caller; nothing is retried.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The entity's current status does not satisfy the operation's precondition.
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),

    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced entity id does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The actor lacks permission for the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DomainError {
    /// Stable machine-readable kind, used in response bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidStateTransition(_) => "invalid_state_transition",
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Unauthorized(_) => "unauthorized",
            Self::Database(_) => "internal_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidStateTransition(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        Self::Unauthorized(err.to_string())
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Database details stay out of response bodies
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error while handling request");
                "internal error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "error": self.kind(),
                "message": message,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_are_stable() {
        assert_eq!(
            DomainError::InvalidStateTransition("x".into()).kind(),
            "invalid_state_transition"
        );
        assert_eq!(DomainError::Validation("x".into()).kind(), "validation_error");
        assert_eq!(DomainError::NotFound("listing").kind(), "not_found");
        assert_eq!(DomainError::Unauthorized("x".into()).kind(), "unauthorized");
    }
}
