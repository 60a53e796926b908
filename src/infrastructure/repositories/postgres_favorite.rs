use std::collections::HashSet;

use super::map_sqlx;
use crate::domain::article::{Article, ArticleId};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::favorite::{FavoriteMark, FavoriteRepository};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

#[derive(Clone)]
pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Relative counter update. The row lock taken here serializes concurrent
/// writers on the same article until their transaction ends.
async fn adjust_count(conn: &mut PgConnection, article_id: ArticleId, delta: i64) -> DomainResult<i64> {
    sqlx::query_scalar::<_, i64>(
        "UPDATE articles SET favorites_count = favorites_count + $1
         WHERE id = $2
         RETURNING favorites_count",
    )
    .bind(delta)
    .bind(article_id.0)
    .fetch_optional(conn)
    .await
    .map_err(map_sqlx)?
    .ok_or_else(|| DomainError::NotFound(format!("article {article_id} not found")))
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn add(&self, article: &mut Article, user_id: &UserId) -> DomainResult<FavoriteMark> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let created_at: DateTime<Utc> = sqlx::query_scalar(
            "INSERT INTO favorite_marks (article_id, user_id) VALUES ($1, $2)
             RETURNING created_at",
        )
        .bind(article.id.0)
        .bind(user_id.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        let count = adjust_count(&mut *tx, article.id, 1).await?;
        tx.commit().await.map_err(map_sqlx)?;

        article.set_favorites_count(count);
        Ok(FavoriteMark {
            article_id: article.id,
            user_id: user_id.clone(),
            created_at,
        })
    }

    async fn remove(&self, article: &mut Article, user_id: &UserId) -> DomainResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let removed = sqlx::query("DELETE FROM favorite_marks WHERE article_id = $1 AND user_id = $2")
            .bind(article.id.0)
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?
            .rows_affected();

        let delta = i64::try_from(removed)
            .map_err(|_| DomainError::Persistence("removed row count overflow".into()))?;
        let count = adjust_count(&mut *tx, article.id, -delta).await?;
        tx.commit().await.map_err(map_sqlx)?;

        article.set_favorites_count(count);
        Ok(removed > 0)
    }

    async fn exists(&self, article_id: ArticleId, user_id: &UserId) -> DomainResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM favorite_marks WHERE article_id = $1 AND user_id = $2)",
        )
        .bind(article_id.0)
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)
    }

    async fn favorited_among(
        &self,
        user_id: &UserId,
        ids: &[ArticleId],
    ) -> DomainResult<HashSet<ArticleId>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let marked: Vec<i64> = sqlx::query_scalar(
            "SELECT article_id FROM favorite_marks WHERE user_id = $1 AND article_id = ANY($2)",
        )
        .bind(user_id.as_str())
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        marked.into_iter().map(ArticleId::new).collect()
    }

    async fn count_marks(&self, article_id: ArticleId) -> DomainResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorite_marks WHERE article_id = $1")
            .bind(article_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}
