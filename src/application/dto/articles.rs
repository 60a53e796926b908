use crate::domain::article::Article;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::serde_time;

/// Article as seen by one caller: `favorited` is specific to that caller.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArticleDto {
    pub id: i64,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub favorited: bool,
    pub favorites_count: i64,
    pub author_id: String,
    #[serde(with = "serde_time")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_time")]
    pub updated_at: DateTime<Utc>,
}

impl ArticleDto {
    pub fn from_article(article: Article, favorited: bool) -> Self {
        Self {
            id: article.id.into(),
            slug: article.slug.into_inner(),
            title: article.title.into_inner(),
            description: article.description.into_inner(),
            tag_list: article.tags.names(),
            body: article.body.into_inner(),
            favorited,
            favorites_count: article.favorites_count,
            author_id: article.author_id.into_inner(),
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}
