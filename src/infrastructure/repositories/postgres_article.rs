// src/infrastructure/repositories/postgres_article.rs
use std::collections::HashMap;

use super::map_sqlx;
use crate::domain::article::{
    Article, ArticleBody, ArticleDescription, ArticleFilter, ArticleId, ArticleReadRepository,
    ArticleSlug, ArticleTitle, ArticleWriteRepository, DeletePolicy, NewArticle, Pagination,
    TagList, TagName,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};

const ARTICLE_COLUMNS: &str =
    "id, slug, title, description, body, author_id, favorites_count, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresArticleWriteRepository {
    pool: PgPool,
}

impl PostgresArticleWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresArticleReadRepository {
    pool: PgPool,
}

impl PostgresArticleReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    slug: String,
    title: String,
    description: String,
    body: String,
    author_id: String,
    favorites_count: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ArticleRow {
    fn into_article(self, tags: TagList) -> DomainResult<Article> {
        Ok(Article {
            id: ArticleId::new(self.id)?,
            slug: ArticleSlug::new(self.slug)?,
            title: ArticleTitle::new(self.title)?,
            description: ArticleDescription::new(self.description),
            body: ArticleBody::new(self.body)?,
            author_id: UserId::new(self.author_id)?,
            tags,
            favorites_count: self.favorites_count,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Replaces the tag associations of one article. Unknown tag names are
/// created; `position` keeps the caller's ordering.
async fn sync_tags(conn: &mut PgConnection, article_id: i64, tags: &TagList) -> DomainResult<()> {
    let names = tags.names();

    sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
        .bind(article_id)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    sqlx::query("INSERT INTO tags (name) SELECT UNNEST($1::text[]) ON CONFLICT (name) DO NOTHING")
        .bind(&names)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    sqlx::query(
        "INSERT INTO article_tags (article_id, tag_id, position)
         SELECT $1, t.id, n.ord::int
         FROM UNNEST($2::text[]) WITH ORDINALITY AS n(name, ord)
         JOIN tags t ON t.name = n.name",
    )
    .bind(article_id)
    .bind(&names)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx)?;

    Ok(())
}

#[async_trait]
impl ArticleWriteRepository for PostgresArticleWriteRepository {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        let NewArticle {
            slug,
            title,
            description,
            body,
            author_id,
            tags,
            created_at,
            updated_at,
        } = article;

        if tags.is_empty() {
            return Err(DomainError::ConstraintViolation(
                "article requires at least one tag".into(),
            ));
        }

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO articles (slug, title, description, body, author_id, favorites_count, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, 0, $6, $7)
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(slug.as_str())
        .bind(title.as_str())
        .bind(description.as_str())
        .bind(body.as_str())
        .bind(author_id.as_str())
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        sync_tags(&mut *tx, row.id, &tags).await?;
        tx.commit().await.map_err(map_sqlx)?;

        row.into_article(tags)
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "UPDATE articles
             SET slug = $1, title = $2, description = $3, body = $4, updated_at = $5
             WHERE id = $6
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(article.slug.as_str())
        .bind(article.title.as_str())
        .bind(article.description.as_str())
        .bind(article.body.as_str())
        .bind(article.updated_at)
        .bind(article.id.0)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound(format!("article {} not found", article.id)))?;

        sync_tags(&mut *tx, row.id, &article.tags).await?;
        tx.commit().await.map_err(map_sqlx)?;

        row.into_article(article.tags.clone())
    }

    async fn delete(&self, article: &Article, policy: DeletePolicy) -> DomainResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;

        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(article.id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound(format!(
                "article {} not found",
                article.id
            )));
        }

        if policy == DeletePolicy::Cascade {
            sqlx::query("DELETE FROM comments WHERE article_id = $1")
                .bind(article.id.0)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
            sqlx::query("DELETE FROM favorite_marks WHERE article_id = $1")
                .bind(article.id.0)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        }

        tx.commit().await.map_err(map_sqlx)?;
        Ok(())
    }
}

impl PostgresArticleReadRepository {
    async fn attach_tags(&self, rows: Vec<ArticleRow>) -> DomainResult<Vec<Article>> {
        let ids = rows
            .iter()
            .map(|row| ArticleId::new(row.id))
            .collect::<DomainResult<Vec<_>>>()?;
        let mut tags = self.load_tags(&ids).await?;

        rows.into_iter()
            .zip(ids)
            .map(|(row, id)| row.into_article(tags.remove(&id).unwrap_or_default()))
            .collect()
    }

    async fn single(&self, row: Option<ArticleRow>) -> DomainResult<Option<Article>> {
        match row {
            Some(row) => Ok(self.attach_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Article ids marked by the user, resolved before the main listing query.
    async fn favorited_ids(&self, user_id: &UserId) -> DomainResult<Vec<i64>> {
        sqlx::query_scalar::<_, i64>("SELECT article_id FROM favorite_marks WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)
    }
}

#[async_trait]
impl ArticleReadRepository for PostgresArticleReadRepository {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.single(row).await
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        // first match by ascending id; the unique index keeps this to one row
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE slug = $1 ORDER BY id ASC LIMIT 1"
        ))
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        self.single(row).await
    }

    async fn list(&self, filter: &ArticleFilter, page: Pagination) -> DomainResult<Vec<Article>> {
        let favorited = match &filter.favorited_by {
            Some(user_id) => {
                let ids = self.favorited_ids(user_id).await?;
                if ids.is_empty() {
                    return Ok(Vec::new());
                }
                Some(ids)
            }
            None => None,
        };

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles a WHERE TRUE"));

        if let Some(author_id) = &filter.author_id {
            builder.push(" AND a.author_id = ");
            builder.push_bind(author_id.as_str().to_string());
        }

        if let Some(tag) = &filter.tag {
            builder.push(
                " AND EXISTS (SELECT 1 FROM article_tags at JOIN tags t ON t.id = at.tag_id \
                 WHERE at.article_id = a.id AND t.name = ",
            );
            builder.push_bind(tag.as_str().to_string());
            builder.push(")");
        }

        if let Some(ids) = favorited {
            builder.push(" AND a.id = ANY(");
            builder.push_bind(ids);
            builder.push(")");
        }

        builder.push(" ORDER BY a.created_at DESC, a.id DESC LIMIT ");
        builder.push_bind(i64::from(page.limit()));
        builder.push(" OFFSET ");
        builder.push_bind(i64::from(page.offset()));

        let rows = builder
            .build_query_as::<ArticleRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        self.attach_tags(rows).await
    }

    /// One query for the whole batch; each list keeps its `position` order.
    async fn load_tags(&self, ids: &[ArticleId]) -> DomainResult<HashMap<ArticleId, TagList>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.0).collect();
        let rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT at.article_id, t.name
             FROM article_tags at
             JOIN tags t ON t.id = at.tag_id
             WHERE at.article_id = ANY($1)
             ORDER BY at.article_id, at.position",
        )
        .bind(&raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        let mut grouped: HashMap<ArticleId, Vec<TagName>> = HashMap::new();
        for (article_id, name) in rows {
            grouped
                .entry(ArticleId::new(article_id)?)
                .or_default()
                .push(TagName::new(name)?);
        }

        Ok(grouped
            .into_iter()
            .map(|(id, tags)| (id, TagList::from(tags)))
            .collect())
    }
}
