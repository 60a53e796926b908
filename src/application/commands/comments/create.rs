use super::CommentCommandService;
use crate::{
    application::{
        dto::{AuthenticatedUser, CommentDto},
        error::ApplicationResult,
    },
    domain::{
        article::ArticleSlug,
        comment::{CommentBody, NewComment},
    },
};

pub struct CreateCommentCommand {
    pub slug: String,
    pub body: String,
}

impl CommentCommandService {
    pub async fn create_comment(
        &self,
        actor: &AuthenticatedUser,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        let body = CommentBody::new(command.body)?;
        let slug = ArticleSlug::new(command.slug)?;
        let article = self.article_repo.get_by_slug(&slug).await?;

        let comment = self
            .comment_repo
            .insert(NewComment {
                body,
                author_id: actor.id.clone(),
                article_id: article.id,
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(comment_id = %comment.id, article_id = %article.id, "comment created");
        Ok(comment.into())
    }
}
