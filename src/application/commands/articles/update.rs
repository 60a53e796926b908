use super::ArticleCommandService;
use crate::{
    application::{
        commands::ownership::ensure_owner,
        dto::{ArticleDto, AuthenticatedUser},
        error::ApplicationResult,
    },
    domain::article::{
        ArticleBody, ArticleDescription, ArticleOverwrite, ArticleTitle, TagList,
        specifications::CanModifyArticleSpec,
    },
};

/// Fields left as `None` keep their stored value.
pub struct UpdateArticleCommand {
    pub slug: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub tag_list: Option<Vec<String>>,
}

impl ArticleCommandService {
    pub async fn update_article(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        let UpdateArticleCommand {
            slug,
            title,
            description,
            body,
            tag_list,
        } = command;

        let mut article = self.load_by_slug(&slug).await?;
        ensure_owner(
            &CanModifyArticleSpec::new(&article, &actor.id),
            "only the author may update this article",
        )?;

        let overwrite = self.build_overwrite(title, description, body, tag_list)?;
        if !article.overwrite(overwrite, self.clock.now()) {
            let favorited = self.favorited_by(&article, actor).await?;
            return Ok(ArticleDto::from_article(article, favorited));
        }

        let updated = self.write_repo.update(&article).await?;
        tracing::info!(article_id = %updated.id, slug = %updated.slug, "article updated");

        let favorited = self.favorited_by(&updated, actor).await?;
        Ok(ArticleDto::from_article(updated, favorited))
    }

    fn build_overwrite(
        &self,
        title: Option<String>,
        description: Option<String>,
        body: Option<String>,
        tag_list: Option<Vec<String>>,
    ) -> ApplicationResult<ArticleOverwrite> {
        let mut overwrite = ArticleOverwrite::new();

        if let Some(title) = title {
            let title = ArticleTitle::new(title)?;
            let slug = self.slug_service.slug_for(&title)?;
            overwrite = overwrite.with_title(title, slug);
        }
        if let Some(description) = description {
            overwrite = overwrite.with_description(ArticleDescription::new(description));
        }
        if let Some(body) = body {
            overwrite = overwrite.with_body(ArticleBody::new(body)?);
        }
        if let Some(tag_list) = tag_list {
            overwrite = overwrite.with_tags(TagList::required(tag_list)?);
        }

        Ok(overwrite)
    }
}
