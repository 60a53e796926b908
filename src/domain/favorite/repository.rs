use std::collections::HashSet;

use crate::domain::article::{Article, ArticleId};
use crate::domain::errors::DomainResult;
use crate::domain::favorite::entity::FavoriteMark;
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Owns the favorite relation and the `favorites_count` column derived from it.
///
/// After every committed `add`/`remove` the article's counter equals the number
/// of marks stored for it. Implementations change both in one transaction and
/// adjust the counter with a relative update so concurrent callers never lose
/// an increment. The in-memory `article` is only touched after commit.
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Inserts the mark and increments the counter. A mark that already exists
    /// fails with `ConstraintViolation` and leaves the counter unchanged.
    async fn add(&self, article: &mut Article, user_id: &UserId) -> DomainResult<FavoriteMark>;

    /// Deletes the mark and decrements the counter by the number of marks
    /// removed. Removing an absent mark is not an error. Returns whether a mark
    /// was removed.
    async fn remove(&self, article: &mut Article, user_id: &UserId) -> DomainResult<bool>;

    async fn exists(&self, article_id: ArticleId, user_id: &UserId) -> DomainResult<bool>;

    /// Subset of `ids` that `user_id` has favorited.
    async fn favorited_among(
        &self,
        user_id: &UserId,
        ids: &[ArticleId],
    ) -> DomainResult<HashSet<ArticleId>>;

    /// Number of stored marks for the article.
    async fn count_marks(&self, article_id: ArticleId) -> DomainResult<i64>;

    /// `false` without a store round-trip when either side is absent.
    async fn is_favorited(
        &self,
        article: Option<&Article>,
        user_id: Option<&UserId>,
    ) -> DomainResult<bool> {
        match (article, user_id) {
            (Some(article), Some(user_id)) => self.exists(article.id, user_id).await,
            _ => Ok(false),
        }
    }
}
