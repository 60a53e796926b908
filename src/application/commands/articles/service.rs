// src/application/commands/articles/service.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::AuthenticatedUser,
        error::ApplicationResult,
        ports::time::Clock,
    },
    domain::{
        article::{
            Article, ArticleReadRepository, ArticleSlug, ArticleWriteRepository, DeletePolicy,
            services::ArticleSlugService,
        },
        favorite::FavoriteRepository,
    },
};

pub struct ArticleCommandService {
    pub(super) write_repo: Arc<dyn ArticleWriteRepository>,
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) favorite_repo: Arc<dyn FavoriteRepository>,
    pub(super) slug_service: Arc<ArticleSlugService>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) delete_policy: DeletePolicy,
}

impl ArticleCommandService {
    pub fn new(
        write_repo: Arc<dyn ArticleWriteRepository>,
        read_repo: Arc<dyn ArticleReadRepository>,
        favorite_repo: Arc<dyn FavoriteRepository>,
        slug_service: Arc<ArticleSlugService>,
        clock: Arc<dyn Clock>,
        delete_policy: DeletePolicy,
    ) -> Self {
        Self {
            write_repo,
            read_repo,
            favorite_repo,
            slug_service,
            clock,
            delete_policy,
        }
    }

    pub(super) async fn load_by_slug(&self, slug: &str) -> ApplicationResult<Article> {
        let slug = ArticleSlug::new(slug)?;
        Ok(self.read_repo.get_by_slug(&slug).await?)
    }

    pub(super) async fn favorited_by(
        &self,
        article: &Article,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<bool> {
        Ok(self
            .favorite_repo
            .is_favorited(Some(article), Some(&actor.id))
            .await?)
    }
}
