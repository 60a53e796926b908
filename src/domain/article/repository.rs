use std::collections::HashMap;

use crate::domain::article::entity::{Article, NewArticle};
use crate::domain::article::value_objects::{ArticleId, ArticleSlug, TagList, TagName};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const MAX_PAGE_LIMIT: u32 = 100;

/// What happens to comments and favorite marks when their article is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// Leave dependent rows in place.
    Retain,
    /// Remove dependent rows in the same transaction as the article.
    #[default]
    Cascade,
}

/// Optional listing filters, combined with AND. `None` imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub author_id: Option<UserId>,
    pub tag: Option<TagName>,
    pub favorited_by: Option<UserId>,
}

impl ArticleFilter {
    pub fn by_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn with_tag(mut self, tag: TagName) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn favorited_by(mut self, user_id: UserId) -> Self {
        self.favorited_by = Some(user_id);
        self
    }
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    offset: u32,
}

impl Pagination {
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[async_trait]
pub trait ArticleWriteRepository: Send + Sync {
    /// Stores the article and its tag associations atomically.
    async fn insert(&self, article: NewArticle) -> DomainResult<Article>;
    /// Persists title, slug, description, body, tags and `updated_at`.
    /// `favorites_count` is never written here.
    async fn update(&self, article: &Article) -> DomainResult<Article>;
    async fn delete(&self, article: &Article, policy: DeletePolicy) -> DomainResult<()>;
}

#[async_trait]
pub trait ArticleReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>>;
    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>>;
    async fn list(&self, filter: &ArticleFilter, page: Pagination) -> DomainResult<Vec<Article>>;
    /// Batch load of tag associations through the join table.
    async fn load_tags(&self, ids: &[ArticleId]) -> DomainResult<HashMap<ArticleId, TagList>>;

    async fn get_by_id(&self, id: ArticleId) -> DomainResult<Article> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("article {id} not found")))
    }

    async fn get_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Article> {
        self.find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("article '{slug}' not found")))
    }
}
