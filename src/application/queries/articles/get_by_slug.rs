use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::ArticleSlug,
};

pub struct GetArticleBySlugQuery {
    pub slug: String,
}

impl ArticleQueryService {
    pub async fn get_article_by_slug(
        &self,
        actor: &AuthenticatedUser,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        let slug = ArticleSlug::new(query.slug)?;
        let article = self.read_repo.get_by_slug(&slug).await?;

        let favorited = self
            .favorite_repo
            .is_favorited(Some(&article), Some(&actor.id))
            .await?;

        Ok(ArticleDto::from_article(article, favorited))
    }
}
