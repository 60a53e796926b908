use super::ArticleQueryService;
use crate::{
    application::{
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::ArticleId,
};

pub struct GetArticleByIdQuery {
    pub id: i64,
}

impl ArticleQueryService {
    /// Unknown ids fail with `NotFound`.
    pub async fn get_article_by_id(
        &self,
        actor: &AuthenticatedUser,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        let id = ArticleId::new(query.id)?;
        let article = self.read_repo.get_by_id(id).await?;
        let favorited = self
            .favorite_repo
            .is_favorited(Some(&article), Some(&actor.id))
            .await?;
        Ok(ArticleDto::from_article(article, favorited))
    }
}
