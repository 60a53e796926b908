// src/application/commands/articles/favorite.rs
use super::ArticleCommandService;
use crate::application::{
    dto::{ArticleDto, AuthenticatedUser},
    error::ApplicationResult,
};

pub struct FavoriteArticleCommand {
    pub slug: String,
}

pub struct UnfavoriteArticleCommand {
    pub slug: String,
}

impl ArticleCommandService {
    /// Favoriting twice is an error, not a no-op.
    pub async fn favorite_article(
        &self,
        actor: &AuthenticatedUser,
        command: FavoriteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_by_slug(&command.slug).await?;

        self.favorite_repo.add(&mut article, &actor.id).await?;
        tracing::info!(
            article_id = %article.id,
            user_id = %actor.id,
            favorites_count = article.favorites_count,
            "article favorited"
        );

        Ok(ArticleDto::from_article(article, true))
    }

    pub async fn unfavorite_article(
        &self,
        actor: &AuthenticatedUser,
        command: UnfavoriteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let mut article = self.load_by_slug(&command.slug).await?;

        let removed = self.favorite_repo.remove(&mut article, &actor.id).await?;
        tracing::info!(
            article_id = %article.id,
            user_id = %actor.id,
            removed,
            favorites_count = article.favorites_count,
            "article unfavorited"
        );

        Ok(ArticleDto::from_article(article, false))
    }
}
