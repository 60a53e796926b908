use super::CommentCommandService;
use crate::{
    application::{
        commands::ownership::ensure_owner,
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        article::{ArticleSlug, specifications::CanModifyArticleSpec},
        comment::CommentId,
    },
};

pub struct DeleteCommentCommand {
    pub slug: String,
    /// Wire form of the comment id.
    pub id: String,
}

impl CommentCommandService {
    pub async fn delete_comment(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteCommentCommand,
    ) -> ApplicationResult<()> {
        let comment_id = CommentId::parse(&command.id)?;
        let slug = ArticleSlug::new(command.slug)?;
        let article = self.article_repo.get_by_slug(&slug).await?;

        // Comments are moderated by the author of the article they sit under.
        ensure_owner(
            &CanModifyArticleSpec::new(&article, &actor.id),
            "only the article author may delete its comments",
        )?;

        // A comment addressed through another article's slug does not exist
        // from the caller's point of view.
        let comment = self
            .comment_repo
            .find_by_id(comment_id)
            .await?
            .filter(|comment| comment.belongs_to(article.id))
            .ok_or_else(|| ApplicationError::not_found(format!("comment {comment_id} not found")))?;

        self.comment_repo.delete(&comment).await?;
        tracing::info!(comment_id = %comment.id, article_id = %article.id, "comment deleted");
        Ok(())
    }
}
