// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        CreateArticleCommand, DeleteArticleCommand, FavoriteArticleCommand,
        UnfavoriteArticleCommand, UpdateArticleCommand,
    },
    dto::ArticleDto,
    queries::articles::{GetArticleByIdQuery, GetArticleBySlugQuery, ListArticlesQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{CallContext, RpcJson};
use crate::presentation::http::openapi::{ArticleListResponse, Empty};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateArticleRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tag_list: Vec<String>,
}

/// Looks an article up by `id` when given, otherwise by `slug`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetArticleRequest {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ListArticlesRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub favorited: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Absent fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateArticleRequest {
    pub slug: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub tag_list: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SlugRequest {
    pub slug: String,
}

#[utoipa::path(
    post,
    path = "/article.Articles/CreateArticle",
    request_body = CreateArticleRequest,
    responses(
        (status = 200, description = "Article created.", body = ArticleDto),
        (status = 400, description = "Validation failed.", body = ErrorResponse),
        (status = 401, description = "Caller could not be resolved.", body = ErrorResponse),
        (status = 409, description = "Slug already taken.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<CreateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = CreateArticleCommand {
        title: payload.title,
        description: payload.description,
        body: payload.body,
        tag_list: payload.tag_list,
    };

    let article = state
        .services
        .create_article(&ctx, command)
        .await
        .into_http()?;
    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/article.Articles/GetArticle",
    request_body = GetArticleRequest,
    responses(
        (status = 200, description = "Article found.", body = ArticleDto),
        (status = 401, description = "Caller could not be resolved.", body = ErrorResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<GetArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let article = match payload.id {
        Some(id) => {
            state
                .services
                .get_article_by_id(&ctx, GetArticleByIdQuery { id })
                .await
        }
        None => {
            state
                .services
                .get_article(
                    &ctx,
                    GetArticleBySlugQuery {
                        slug: payload.slug.unwrap_or_default(),
                    },
                )
                .await
        }
    }
    .into_http()?;

    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/article.Articles/ListArticles",
    request_body = ListArticlesRequest,
    responses(
        (status = 200, description = "Newest articles first.", body = ArticleListResponse),
        (status = 401, description = "Caller could not be resolved.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<ListArticlesRequest>,
) -> HttpResult<Json<ArticleListResponse>> {
    let query = ListArticlesQuery {
        author: payload.author,
        tag: payload.tag,
        favorited_by: payload.favorited,
        limit: payload.limit,
        offset: payload.offset,
    };

    let page = state
        .services
        .list_articles(&ctx, query)
        .await
        .into_http()?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/article.Articles/UpdateArticle",
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Article updated.", body = ArticleDto),
        (status = 400, description = "Validation failed.", body = ErrorResponse),
        (status = 403, description = "Caller is not the author.", body = ErrorResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<UpdateArticleRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let command = UpdateArticleCommand {
        slug: payload.slug,
        title: payload.title,
        description: payload.description,
        body: payload.body,
        tag_list: payload.tag_list,
    };

    let article = state
        .services
        .update_article(&ctx, command)
        .await
        .into_http()?;
    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/article.Articles/DeleteArticle",
    request_body = SlugRequest,
    responses(
        (status = 200, description = "Article deleted.", body = Empty),
        (status = 403, description = "Caller is not the author.", body = ErrorResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<SlugRequest>,
) -> HttpResult<Json<Empty>> {
    state
        .services
        .delete_article(&ctx, DeleteArticleCommand { slug: payload.slug })
        .await
        .into_http()?;
    Ok(Json(Empty {}))
}

#[utoipa::path(
    post,
    path = "/article.Articles/FavoriteArticle",
    request_body = SlugRequest,
    responses(
        (status = 200, description = "Article favorited by the caller.", body = ArticleDto),
        (status = 404, description = "No such article.", body = ErrorResponse),
        (status = 409, description = "Already favorited.", body = ErrorResponse)
    ),
    tag = "Favorites"
)]
pub async fn favorite_article(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<SlugRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let article = state
        .services
        .favorite_article(&ctx, FavoriteArticleCommand { slug: payload.slug })
        .await
        .into_http()?;
    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/article.Articles/UnfavoriteArticle",
    request_body = SlugRequest,
    responses(
        (status = 200, description = "Caller's mark removed, if any.", body = ArticleDto),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Favorites"
)]
pub async fn unfavorite_article(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<SlugRequest>,
) -> HttpResult<Json<ArticleDto>> {
    let article = state
        .services
        .unfavorite_article(&ctx, UnfavoriteArticleCommand { slug: payload.slug })
        .await
        .into_http()?;
    Ok(Json(article))
}
