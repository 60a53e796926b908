// src/application/ports/identity.rs
use crate::application::ApplicationResult;
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Resolves the forwarded `authorization` credential to the caller's user id.
/// Any failure surfaces as `ApplicationError::Unauthenticated`.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, authorization: &str) -> ApplicationResult<UserId>;
}
