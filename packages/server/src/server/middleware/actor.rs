//! Actor extraction from trusted identity headers.
//!
//! Authentication happens in the identity layer in front of this service;
//! it forwards the verified actor id and admin flag as headers. Handlers
//! take `Actor` as an extractor argument, so a request without the headers
//! is rejected before the handler body runs.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::common::auth::{Actor, AuthError};
use crate::common::{CustomerId, DomainError};

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ADMIN_HEADER: &str = "x-actor-admin";

#[async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(ACTOR_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::AuthenticationRequired)?;

        let customer_id = CustomerId::parse(raw_id).map_err(|_| {
            DomainError::Validation(format!("{ACTOR_ID_HEADER} is not a valid UUID"))
        })?;

        let is_admin = parts
            .headers
            .get(ACTOR_ADMIN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        Ok(Actor::new(customer_id, is_admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_for(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn extracts_admin_actor() {
        let id = CustomerId::new();
        let mut parts = parts_for(&[
            (ACTOR_ID_HEADER, &id.to_string()),
            (ACTOR_ADMIN_HEADER, "true"),
        ]);

        let actor = Actor::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(actor.customer_id, id);
        assert!(actor.is_admin);
    }

    #[tokio::test]
    async fn missing_id_header_is_rejected() {
        let mut parts = parts_for(&[]);
        let err = Actor::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn admin_flag_defaults_to_false() {
        let id = CustomerId::new();
        let mut parts = parts_for(&[(ACTOR_ID_HEADER, &id.to_string())]);

        let actor = Actor::from_request_parts(&mut parts, &()).await.unwrap();
        assert!(!actor.is_admin);
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let mut parts = parts_for(&[(ACTOR_ID_HEADER, "not-a-uuid")]);
        let err = Actor::from_request_parts(&mut parts, &()).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
