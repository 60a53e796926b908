use crate::domain::comment::Comment;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentDto {
    /// Decimal string, as accepted by `DeleteComment`.
    pub id: String,
    pub body: String,
    pub author_id: String,
    pub article_id: i64,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            body: comment.body.into_inner(),
            author_id: comment.author_id.into_inner(),
            article_id: comment.article_id.into(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}
