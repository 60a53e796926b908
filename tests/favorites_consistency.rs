// tests/favorites_consistency.rs
use std::sync::Arc;

use article_service::application::{
    commands::articles::{FavoriteArticleCommand, UnfavoriteArticleCommand},
    error::ApplicationError,
};
use article_service::domain::{
    article::{ArticleId, ArticleReadRepository, ArticleWriteRepository, DeletePolicy},
    errors::DomainError,
    favorite::FavoriteRepository,
    user::UserId,
};

mod support;

use support::{build_app, create_command, ctx_for, default_app};

fn favorite(slug: &str) -> FavoriteArticleCommand {
    FavoriteArticleCommand {
        slug: slug.to_string(),
    }
}

fn unfavorite(slug: &str) -> UnfavoriteArticleCommand {
    UnfavoriteArticleCommand {
        slug: slug.to_string(),
    }
}

/// 二重のお気に入りは ConstraintViolation になり、カウンタは変わらない
#[tokio::test]
async fn second_favorite_fails_and_keeps_counter() {
    let app = default_app();
    let author = ctx_for("author");
    let fan = ctx_for("fan");
    let created = app
        .services
        .create_article(&author, create_command("Popular", &["x"]))
        .await
        .unwrap();

    app.services
        .favorite_article(&fan, favorite("popular"))
        .await
        .unwrap();
    let err = app
        .services
        .favorite_article(&fan, favorite("popular"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationError::ConstraintViolation(_)));

    assert_eq!(app.store.counter_and_marks(created.id), (1, 1));
}

/// 存在しないマークの解除はエラーにならず、カウンタは負にならない
#[tokio::test]
async fn unfavorite_without_mark_is_a_no_op() {
    let app = default_app();
    let author = ctx_for("author");
    let created = app
        .services
        .create_article(&author, create_command("Lonely", &["x"]))
        .await
        .unwrap();

    for _ in 0..2 {
        let article = app
            .services
            .unfavorite_article(&ctx_for("stranger"), unfavorite("lonely"))
            .await
            .unwrap();
        assert_eq!(article.favorites_count, 0);
    }
    assert_eq!(app.store.counter_and_marks(created.id), (0, 0));
}

/// 任意の操作列の後でカウンタとマーク数が一致する
#[tokio::test]
async fn counter_tracks_marks_across_a_sequence() {
    let app = default_app();
    let author = ctx_for("author");
    let created = app
        .services
        .create_article(&author, create_command("Tracked", &["x"]))
        .await
        .unwrap();

    let steps: [(&str, bool); 8] = [
        ("a", true),
        ("b", true),
        ("a", false),
        ("c", true),
        ("a", false),
        ("a", true),
        ("b", false),
        ("b", true),
    ];
    for (user, add) in steps {
        let ctx = ctx_for(user);
        if add {
            app.services
                .favorite_article(&ctx, favorite("tracked"))
                .await
                .unwrap();
        } else {
            app.services
                .unfavorite_article(&ctx, unfavorite("tracked"))
                .await
                .unwrap();
        }
        let (counter, marks) = app.store.counter_and_marks(created.id);
        assert_eq!(counter, marks, "after {user} add={add}");
    }
    assert_eq!(app.store.counter_and_marks(created.id), (3, 3));
}

/// 別ユーザーによる同時お気に入りはすべて成功し、カウンタは人数分増える
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_favorites_from_distinct_users_all_count() {
    let app = default_app();
    let created = app
        .services
        .create_article(&ctx_for("author"), create_command("Race", &["x"]))
        .await
        .unwrap();

    let services = Arc::clone(&app.services);
    let handles: Vec<_> = (0..16)
        .map(|n| {
            let services = Arc::clone(&services);
            tokio::spawn(async move {
                services
                    .favorite_article(&ctx_for(&format!("user-{n}")), favorite("race"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(app.store.counter_and_marks(created.id), (16, 16));
    let count = app
        .store
        .count_marks(ArticleId::new(created.id).unwrap())
        .await
        .unwrap();
    assert_eq!(count, 16);
}

/// 同一ユーザーの同時お気に入りは一件だけ成功する
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicate_favorites_succeed_once() {
    let app = default_app();
    let created = app
        .services
        .create_article(&ctx_for("author"), create_command("Dupe Race", &["x"]))
        .await
        .unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let services = Arc::clone(&app.services);
            tokio::spawn(async move {
                services
                    .favorite_article(&ctx_for("same"), favorite("dupe-race"))
                    .await
            })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(err) => assert!(matches!(err, ApplicationError::ConstraintViolation(_))),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(app.store.counter_and_marks(created.id), (1, 1));
}

/// 記事か利用者が無い場合、ストアに触れずに false を返す
#[tokio::test]
async fn is_favorited_short_circuits_on_missing_inputs() {
    let app = default_app();
    let created = app
        .services
        .create_article(&ctx_for("author"), create_command("Lookup", &["x"]))
        .await
        .unwrap();
    let article = app
        .store
        .get_by_id(ArticleId::new(created.id).unwrap())
        .await
        .unwrap();
    let user = UserId::new("author").unwrap();

    let before = app.store.calls();
    assert!(!app.store.is_favorited(None, Some(&user)).await.unwrap());
    assert!(!app.store.is_favorited(Some(&article), None).await.unwrap());
    assert_eq!(app.store.calls(), before);

    assert!(!app.store.is_favorited(Some(&article), Some(&user)).await.unwrap());
    assert_eq!(app.store.calls(), before + 1);
}

/// 記事が消えた後のお気に入り操作は NotFound になり、マークもカウンタも変えない
#[tokio::test]
async fn favorite_ops_on_deleted_article_leave_no_partial_state() {
    let app = build_app(DeletePolicy::Retain);
    let created = app
        .services
        .create_article(&ctx_for("author"), create_command("Vanished", &["x"]))
        .await
        .unwrap();
    app.services
        .favorite_article(&ctx_for("fan"), favorite("vanished"))
        .await
        .unwrap();

    let id = ArticleId::new(created.id).unwrap();
    let mut stale = app.store.get_by_id(id).await.unwrap();
    assert_eq!(stale.favorites_count, 1);
    ArticleWriteRepository::delete(&*app.store, &stale, DeletePolicy::Retain)
        .await
        .unwrap();
    assert_eq!(app.store.mark_count(), 1);

    let fan = UserId::new("fan").unwrap();
    let err = app.store.remove(&mut stale, &fan).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "{err:?}");
    assert!(app.store.exists(id, &fan).await.unwrap());
    assert_eq!(stale.favorites_count, 1);

    let latecomer = UserId::new("latecomer").unwrap();
    let err = app.store.add(&mut stale, &latecomer).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)), "{err:?}");
    assert!(!app.store.exists(id, &latecomer).await.unwrap());
    assert_eq!(app.store.count_marks(id).await.unwrap(), 1);
    assert_eq!(stale.favorites_count, 1);
}
