// src/application/commands/articles/delete.rs
use super::ArticleCommandService;
use crate::{
    application::{
        commands::ownership::ensure_owner, dto::AuthenticatedUser, error::ApplicationResult,
    },
    domain::article::specifications::CanModifyArticleSpec,
};

pub struct DeleteArticleCommand {
    pub slug: String,
}

impl ArticleCommandService {
    pub async fn delete_article(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        let article = self.load_by_slug(&command.slug).await?;

        ensure_owner(
            &CanModifyArticleSpec::new(&article, &actor.id),
            "only the author may delete this article",
        )?;

        self.write_repo.delete(&article, self.delete_policy).await?;
        tracing::info!(
            article_id = %article.id,
            policy = ?self.delete_policy,
            "article deleted"
        );
        Ok(())
    }
}
