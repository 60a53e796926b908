use super::CommentQueryService;
use crate::{
    application::{dto::CommentDto, error::ApplicationResult},
    domain::article::ArticleSlug,
};

pub struct GetCommentsQuery {
    pub slug: String,
}

impl CommentQueryService {
    /// Every comment of the article, oldest first. Not paginated.
    pub async fn get_comments(&self, query: GetCommentsQuery) -> ApplicationResult<Vec<CommentDto>> {
        let slug = ArticleSlug::new(query.slug)?;
        let article = self.article_repo.get_by_slug(&slug).await?;
        let comments = self.comment_repo.list_by_article(article.id).await?;
        Ok(comments.into_iter().map(Into::into).collect())
    }
}
