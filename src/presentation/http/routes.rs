// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, comments},
    middleware::rate_limit::{RateLimitSettings, rate_limit_layer},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Router,
    http::{HeaderName, HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

/// Router options resolved from configuration.
#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    /// `None` disables per-IP rate limiting.
    pub rate_limit: Option<RateLimitSettings>,
}

pub fn build_router(state: HttpState) -> Router {
    build_router_with_options(state, RouterOptions::default())
}

pub fn build_router_with_options(state: HttpState, options: RouterOptions) -> Router {
    let rpc = Router::new()
        .route(
            "/article.Articles/CreateArticle",
            post(articles::create_article),
        )
        .route("/article.Articles/GetArticle", post(articles::get_article))
        .route(
            "/article.Articles/ListArticles",
            post(articles::list_articles),
        )
        .route(
            "/article.Articles/UpdateArticle",
            post(articles::update_article),
        )
        .route(
            "/article.Articles/DeleteArticle",
            post(articles::delete_article),
        )
        .route(
            "/article.Articles/FavoriteArticle",
            post(articles::favorite_article),
        )
        .route(
            "/article.Articles/UnfavoriteArticle",
            post(articles::unfavorite_article),
        )
        .route(
            "/article.Articles/CreateComment",
            post(comments::create_comment),
        )
        .route(
            "/article.Articles/GetComments",
            post(comments::get_comments),
        )
        .route(
            "/article.Articles/DeleteComment",
            post(comments::delete_comment),
        );

    let rpc = match options.rate_limit.and_then(rate_limit_layer) {
        Some(limiter) => rpc.layer(limiter),
        None => rpc,
    };

    Router::new()
        .merge(openapi::docs_router())
        .route("/health", get(health))
        .merge(rpc)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
        .max_age(Duration::from_secs(3600))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = crate::presentation::http::openapi::StatusResponse)
    ),
    tag = "System"
)]
pub async fn health() -> axum::Json<StatusResponse> {
    axum::Json(StatusResponse {
        status: "ok".into(),
    })
}
