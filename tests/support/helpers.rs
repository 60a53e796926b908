// tests/support/helpers.rs
use std::sync::Arc;

use article_service::application::{
    RequestContext,
    ports::{identity::IdentityResolver, time::Clock, util::SlugGenerator},
    services::{ApplicationServices, Repositories},
};
use article_service::domain::article::DeletePolicy;
use article_service::infrastructure::util::DefaultSlugGenerator;
use article_service::presentation::http::{routes::build_router, state::HttpState};
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use serde_json::Value;

use super::mocks::{FixedClock, InMemoryStore, StaticIdentity, bearer};

/// テスト対象のサービスと、その裏側のダブル
pub struct TestApp {
    pub services: Arc<ApplicationServices>,
    pub store: Arc<InMemoryStore>,
    pub identity: Arc<StaticIdentity>,
}

pub fn build_app(policy: DeletePolicy) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let identity = Arc::new(StaticIdentity::default());

    let repositories = Repositories {
        article_write: store.clone(),
        article_read: store.clone(),
        comments: store.clone(),
        favorites: store.clone(),
    };
    let identity_port: Arc<dyn IdentityResolver> = identity.clone();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        repositories,
        identity_port,
        clock,
        slugger,
        policy,
    ));

    TestApp {
        services,
        store,
        identity,
    }
}

/// 既定（カスケード削除）のテストアプリ
pub fn default_app() -> TestApp {
    build_app(DeletePolicy::default())
}

/// 指定ユーザーとして呼び出すコンテキスト
pub fn ctx_for(user: &str) -> RequestContext {
    RequestContext::new(format!("test-{user}"), Some(bearer(user)))
}

/// 資格情報なしのコンテキスト
pub fn anonymous_ctx() -> RequestContext {
    RequestContext::new("test-anonymous", None)
}

pub fn make_test_router(app: &TestApp) -> axum::Router {
    build_router(HttpState::new(Arc::clone(&app.services)))
}

/// RPC 呼び出し用のリクエストを組み立てる
pub fn rpc_request(method: &str, credential: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(format!("/article.Articles/{method}"))
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(credential) = credential {
        builder = builder.header(header::AUTHORIZATION, credential);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// エラーレスポンスのステータスと `code` を検証する
pub async fn assert_error_response(resp: Response, expected_status: StatusCode, expected_code: &str) {
    assert_eq!(resp.status(), expected_status);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "unexpected content-type: {content_type}"
    );

    let json = read_json(resp).await;
    assert_eq!(json["code"], expected_code, "unexpected body: {json}");
    let message = json["message"].as_str().unwrap_or("");
    assert!(!message.is_empty(), "expected non-empty message in {json}");
}
