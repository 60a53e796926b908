// src/application/services/mod.rs
use std::future::Future;
use std::sync::Arc;

use tracing::Instrument;

use crate::{
    application::{
        ApplicationResult, RequestContext,
        commands::{
            articles::{
                ArticleCommandService, CreateArticleCommand, DeleteArticleCommand,
                FavoriteArticleCommand, UnfavoriteArticleCommand, UpdateArticleCommand,
            },
            comments::{CommentCommandService, CreateCommentCommand, DeleteCommentCommand},
        },
        dto::{ArticleDto, AuthenticatedUser, CommentDto, OffsetPage},
        error::ApplicationError,
        ports::{identity::IdentityResolver, time::Clock, util::SlugGenerator},
        queries::{
            articles::{
                ArticleQueryService, GetArticleByIdQuery, GetArticleBySlugQuery,
                ListArticlesQuery,
            },
            comments::{CommentQueryService, GetCommentsQuery},
        },
    },
    domain::{
        article::{
            ArticleReadRepository, ArticleWriteRepository, DeletePolicy,
            services::ArticleSlugService,
        },
        comment::CommentRepository,
        favorite::FavoriteRepository,
    },
};

/// Repositories the services are built from.
pub struct Repositories {
    pub article_write: Arc<dyn ArticleWriteRepository>,
    pub article_read: Arc<dyn ArticleReadRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub favorites: Arc<dyn FavoriteRepository>,
}

/// Entry point for every inbound call. Each operation authenticates the
/// caller first, then delegates to the command/query services inside the
/// span of the request context.
pub struct ApplicationServices {
    pub article_commands: Arc<ArticleCommandService>,
    pub article_queries: Arc<ArticleQueryService>,
    pub comment_commands: Arc<CommentCommandService>,
    pub comment_queries: Arc<CommentQueryService>,
    identity: Arc<dyn IdentityResolver>,
}

impl ApplicationServices {
    pub fn new(
        repositories: Repositories,
        identity: Arc<dyn IdentityResolver>,
        clock: Arc<dyn Clock>,
        slugger: Arc<dyn SlugGenerator>,
        delete_policy: DeletePolicy,
    ) -> Self {
        let Repositories {
            article_write,
            article_read,
            comments,
            favorites,
        } = repositories;

        let slug_service = Arc::new(ArticleSlugService::new(Arc::clone(&slugger)));

        let article_commands = Arc::new(ArticleCommandService::new(
            Arc::clone(&article_write),
            Arc::clone(&article_read),
            Arc::clone(&favorites),
            Arc::clone(&slug_service),
            Arc::clone(&clock),
            delete_policy,
        ));
        let article_queries = Arc::new(ArticleQueryService::new(
            Arc::clone(&article_read),
            Arc::clone(&favorites),
        ));
        let comment_commands = Arc::new(CommentCommandService::new(
            Arc::clone(&comments),
            Arc::clone(&article_read),
            Arc::clone(&clock),
        ));
        let comment_queries = Arc::new(CommentQueryService::new(
            Arc::clone(&comments),
            Arc::clone(&article_read),
        ));

        Self {
            article_commands,
            article_queries,
            comment_commands,
            comment_queries,
            identity,
        }
    }

    /// Resolve the caller from the forwarded `authorization` metadata. Every
    /// failure is reported as `Unauthenticated` and happens before any store
    /// access.
    pub async fn authenticate(&self, ctx: &RequestContext) -> ApplicationResult<AuthenticatedUser> {
        let credential = ctx
            .authorization()
            .ok_or_else(|| ApplicationError::unauthenticated("missing authorization metadata"))?;

        let user_id = self
            .identity
            .resolve(credential)
            .await
            .map_err(|err| match err {
                ApplicationError::Unauthenticated(_) => err,
                other => ApplicationError::unauthenticated(other.to_string()),
            })?;

        Ok(AuthenticatedUser::new(user_id))
    }

    pub async fn create_article(
        &self,
        ctx: &RequestContext,
        command: CreateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        self.run(ctx, "CreateArticle", |actor| async move {
            self.article_commands.create_article(&actor, command).await
        })
        .await
    }

    pub async fn get_article(
        &self,
        ctx: &RequestContext,
        query: GetArticleBySlugQuery,
    ) -> ApplicationResult<ArticleDto> {
        self.run(ctx, "GetArticle", |actor| async move {
            self.article_queries.get_article_by_slug(&actor, query).await
        })
        .await
    }

    pub async fn get_article_by_id(
        &self,
        ctx: &RequestContext,
        query: GetArticleByIdQuery,
    ) -> ApplicationResult<ArticleDto> {
        self.run(ctx, "GetArticleById", |actor| async move {
            self.article_queries.get_article_by_id(&actor, query).await
        })
        .await
    }

    pub async fn list_articles(
        &self,
        ctx: &RequestContext,
        query: ListArticlesQuery,
    ) -> ApplicationResult<OffsetPage<ArticleDto>> {
        self.run(ctx, "ListArticles", |actor| async move {
            self.article_queries.list_articles(&actor, query).await
        })
        .await
    }

    pub async fn update_article(
        &self,
        ctx: &RequestContext,
        command: UpdateArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        self.run(ctx, "UpdateArticle", |actor| async move {
            self.article_commands.update_article(&actor, command).await
        })
        .await
    }

    pub async fn delete_article(
        &self,
        ctx: &RequestContext,
        command: DeleteArticleCommand,
    ) -> ApplicationResult<()> {
        self.run(ctx, "DeleteArticle", |actor| async move {
            self.article_commands.delete_article(&actor, command).await
        })
        .await
    }

    pub async fn favorite_article(
        &self,
        ctx: &RequestContext,
        command: FavoriteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        self.run(ctx, "FavoriteArticle", |actor| async move {
            self.article_commands.favorite_article(&actor, command).await
        })
        .await
    }

    pub async fn unfavorite_article(
        &self,
        ctx: &RequestContext,
        command: UnfavoriteArticleCommand,
    ) -> ApplicationResult<ArticleDto> {
        self.run(ctx, "UnfavoriteArticle", |actor| async move {
            self.article_commands.unfavorite_article(&actor, command).await
        })
        .await
    }

    pub async fn create_comment(
        &self,
        ctx: &RequestContext,
        command: CreateCommentCommand,
    ) -> ApplicationResult<CommentDto> {
        self.run(ctx, "CreateComment", |actor| async move {
            self.comment_commands.create_comment(&actor, command).await
        })
        .await
    }

    pub async fn get_comments(
        &self,
        ctx: &RequestContext,
        query: GetCommentsQuery,
    ) -> ApplicationResult<Vec<CommentDto>> {
        self.run(ctx, "GetComments", |_actor| async move {
            self.comment_queries.get_comments(query).await
        })
        .await
    }

    pub async fn delete_comment(
        &self,
        ctx: &RequestContext,
        command: DeleteCommentCommand,
    ) -> ApplicationResult<()> {
        self.run(ctx, "DeleteComment", |actor| async move {
            self.comment_commands.delete_comment(&actor, command).await
        })
        .await
    }

    async fn run<T, F, Fut>(
        &self,
        ctx: &RequestContext,
        method: &'static str,
        operation: F,
    ) -> ApplicationResult<T>
    where
        F: FnOnce(AuthenticatedUser) -> Fut,
        Fut: Future<Output = ApplicationResult<T>>,
    {
        let span = ctx.operation_span(method);

        let result = async {
            let actor = self.authenticate(ctx).await?;
            tracing::debug!(user_id = %actor.id, "caller resolved");
            operation(actor).await
        }
        .instrument(span.clone())
        .await;

        if let Err(err) = &result {
            span.in_scope(|| {
                let request_id = ctx.request_id();
                if err.is_server_side() {
                    tracing::error!(request_id, code = err.code(), error = %err, "operation failed");
                } else {
                    tracing::warn!(request_id, code = err.code(), error = %err, "operation rejected");
                }
            });
        }

        result
    }
}
