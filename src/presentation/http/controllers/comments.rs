// src/presentation/http/controllers/comments.rs
use crate::application::{
    commands::comments::{CreateCommentCommand, DeleteCommentCommand},
    dto::CommentDto,
    queries::comments::GetCommentsQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{CallContext, RpcJson};
use crate::presentation::http::openapi::Empty;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::articles::SlugRequest;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub slug: String,
    pub body: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteCommentRequest {
    pub slug: String,
    /// Comment id as a decimal string.
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentsResponse {
    pub comments: Vec<CommentDto>,
}

#[utoipa::path(
    post,
    path = "/article.Articles/CreateComment",
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created.", body = CommentDto),
        (status = 400, description = "Empty body.", body = ErrorResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn create_comment(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<CreateCommentRequest>,
) -> HttpResult<Json<CommentDto>> {
    let command = CreateCommentCommand {
        slug: payload.slug,
        body: payload.body,
    };

    let comment = state
        .services
        .create_comment(&ctx, command)
        .await
        .into_http()?;
    Ok(Json(comment))
}

#[utoipa::path(
    post,
    path = "/article.Articles/GetComments",
    request_body = SlugRequest,
    responses(
        (status = 200, description = "All comments, oldest first.", body = CommentsResponse),
        (status = 404, description = "No such article.", body = ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn get_comments(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<SlugRequest>,
) -> HttpResult<Json<CommentsResponse>> {
    let comments = state
        .services
        .get_comments(&ctx, GetCommentsQuery { slug: payload.slug })
        .await
        .into_http()?;
    Ok(Json(CommentsResponse { comments }))
}

#[utoipa::path(
    post,
    path = "/article.Articles/DeleteComment",
    request_body = DeleteCommentRequest,
    responses(
        (status = 200, description = "Comment deleted.", body = Empty),
        (status = 403, description = "Caller is not the comment author.", body = ErrorResponse),
        (status = 404, description = "No such article or comment.", body = ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn delete_comment(
    Extension(state): Extension<HttpState>,
    CallContext(ctx): CallContext,
    RpcJson(payload): RpcJson<DeleteCommentRequest>,
) -> HttpResult<Json<Empty>> {
    let command = DeleteCommentCommand {
        slug: payload.slug,
        id: payload.id,
    };

    state
        .services
        .delete_comment(&ctx, command)
        .await
        .into_http()?;
    Ok(Json(Empty {}))
}
