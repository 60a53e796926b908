use crate::domain::article::ArticleId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// Existence of a mark means the user favorited the article. At most one
/// mark exists per (article, user).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteMark {
    pub article_id: ArticleId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
