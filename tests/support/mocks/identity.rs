// tests/support/mocks/identity.rs
use std::sync::atomic::{AtomicUsize, Ordering};

use article_service::application::{
    ApplicationResult, error::ApplicationError, ports::identity::IdentityResolver,
};
use article_service::domain::user::UserId;
use async_trait::async_trait;

/// 拒否される資格情報
pub const REJECTED_TOKEN: &str = "Bearer rejected";

/// `Bearer <user>` 形式の資格情報を組み立てる
pub fn bearer(user: &str) -> String {
    format!("Bearer {user}")
}

/// `Bearer <user>` をそのままユーザー ID として解決するアイデンティティ解決器
#[derive(Default)]
pub struct StaticIdentity {
    calls: AtomicUsize,
}

impl StaticIdentity {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn resolve(&self, authorization: &str) -> ApplicationResult<UserId> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if authorization == REJECTED_TOKEN {
            return Err(ApplicationError::unauthenticated("credential rejected"));
        }

        let user = authorization
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApplicationError::unauthenticated("unsupported scheme"))?;
        UserId::new(user).map_err(|err| ApplicationError::unauthenticated(err.to_string()))
    }
}
