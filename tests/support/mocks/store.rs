// tests/support/mocks/store.rs
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use article_service::domain::article::{
    Article, ArticleFilter, ArticleId, ArticleReadRepository, ArticleSlug, ArticleWriteRepository,
    DeletePolicy, NewArticle, Pagination, TagList,
};
use article_service::domain::comment::{Comment, CommentId, CommentRepository, NewComment};
use article_service::domain::errors::{DomainError, DomainResult};
use article_service::domain::favorite::{FavoriteMark, FavoriteRepository};
use article_service::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::time::fixed_now;

#[derive(Default)]
struct StoreState {
    next_article_id: i64,
    next_comment_id: i64,
    articles: BTreeMap<i64, Article>,
    comments: BTreeMap<i64, Comment>,
    marks: BTreeMap<(i64, String), DateTime<Utc>>,
}

impl StoreState {
    fn marks_for(&self, article_id: i64) -> i64 {
        self.marks.keys().filter(|(id, _)| *id == article_id).count() as i64
    }
}

/// 全リポジトリを一つのミューテックスで実装するインメモリストア。
/// お気に入り操作はロック内で完結するため、トランザクションと同様に原子的。
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
    calls: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// リポジトリ呼び出しの累計回数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 保存済み記事のスナップショット
    pub fn article(&self, id: i64) -> Option<Article> {
        self.lock().articles.get(&id).cloned()
    }

    pub fn comment_count(&self) -> usize {
        self.lock().comments.len()
    }

    pub fn mark_count(&self) -> usize {
        self.lock().marks.len()
    }

    /// 記事のカウンタとマーク数の組
    pub fn counter_and_marks(&self, id: i64) -> (i64, i64) {
        let state = self.lock();
        let counter = state
            .articles
            .get(&id)
            .map(|article| article.favorites_count)
            .unwrap_or_default();
        (counter, state.marks_for(id))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().expect("store mutex poisoned")
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ArticleWriteRepository for InMemoryStore {
    async fn insert(&self, article: NewArticle) -> DomainResult<Article> {
        self.touch();
        if article.tags.is_empty() {
            return Err(DomainError::ConstraintViolation(
                "article requires at least one tag".into(),
            ));
        }

        let mut state = self.lock();
        if state.articles.values().any(|a| a.slug == article.slug) {
            return Err(DomainError::ConstraintViolation(
                "slug already exists".into(),
            ));
        }

        state.next_article_id += 1;
        let id = state.next_article_id;
        let stored = Article {
            id: ArticleId::new(id)?,
            slug: article.slug,
            title: article.title,
            description: article.description,
            body: article.body,
            author_id: article.author_id,
            tags: article.tags,
            favorites_count: 0,
            created_at: article.created_at,
            updated_at: article.updated_at,
        };
        state.articles.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, article: &Article) -> DomainResult<Article> {
        self.touch();
        let mut state = self.lock();
        if state
            .articles
            .values()
            .any(|other| other.id != article.id && other.slug == article.slug)
        {
            return Err(DomainError::ConstraintViolation(
                "slug already exists".into(),
            ));
        }

        let stored = state
            .articles
            .get_mut(&article.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("article {} not found", article.id)))?;
        stored.slug = article.slug.clone();
        stored.title = article.title.clone();
        stored.description = article.description.clone();
        stored.body = article.body.clone();
        stored.tags = article.tags.clone();
        stored.updated_at = article.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, article: &Article, policy: DeletePolicy) -> DomainResult<()> {
        self.touch();
        let mut state = self.lock();
        let id = article.id.0;
        if state.articles.remove(&id).is_none() {
            return Err(DomainError::NotFound(format!("article {id} not found")));
        }
        if policy == DeletePolicy::Cascade {
            state.comments.retain(|_, comment| comment.article_id.0 != id);
            state.marks.retain(|(article_id, _), _| *article_id != id);
        }
        Ok(())
    }
}

#[async_trait]
impl ArticleReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: ArticleId) -> DomainResult<Option<Article>> {
        self.touch();
        Ok(self.lock().articles.get(&id.0).cloned())
    }

    async fn find_by_slug(&self, slug: &ArticleSlug) -> DomainResult<Option<Article>> {
        self.touch();
        Ok(self
            .lock()
            .articles
            .values()
            .find(|article| &article.slug == slug)
            .cloned())
    }

    async fn list(&self, filter: &ArticleFilter, page: Pagination) -> DomainResult<Vec<Article>> {
        self.touch();
        let state = self.lock();

        let favorited: Option<HashSet<i64>> = filter.favorited_by.as_ref().map(|user| {
            state
                .marks
                .keys()
                .filter(|(_, marked_by)| marked_by == user.as_str())
                .map(|(id, _)| *id)
                .collect()
        });

        let mut matched: Vec<Article> = state
            .articles
            .values()
            .filter(|a| filter.author_id.as_ref().is_none_or(|author| &a.author_id == author))
            .filter(|a| filter.tag.as_ref().is_none_or(|tag| a.tags.contains(tag.as_str())))
            .filter(|a| favorited.as_ref().is_none_or(|ids| ids.contains(&a.id.0)))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect())
    }

    async fn load_tags(&self, ids: &[ArticleId]) -> DomainResult<HashMap<ArticleId, TagList>> {
        self.touch();
        let state = self.lock();
        Ok(ids
            .iter()
            .filter_map(|id| state.articles.get(&id.0).map(|a| (*id, a.tags.clone())))
            .collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: NewComment) -> DomainResult<Comment> {
        self.touch();
        let mut state = self.lock();
        if !state.articles.contains_key(&comment.article_id.0) {
            return Err(DomainError::NotFound(format!(
                "article {} not found",
                comment.article_id
            )));
        }
        state.next_comment_id += 1;
        let stored = Comment {
            id: CommentId::new(state.next_comment_id)?,
            body: comment.body,
            author_id: comment.author_id,
            article_id: comment.article_id,
            created_at: comment.created_at,
            updated_at: comment.created_at,
        };
        state.comments.insert(stored.id.0, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: CommentId) -> DomainResult<Option<Comment>> {
        self.touch();
        Ok(self.lock().comments.get(&id.0).cloned())
    }

    async fn list_by_article(&self, article_id: ArticleId) -> DomainResult<Vec<Comment>> {
        self.touch();
        let mut comments: Vec<Comment> = self
            .lock()
            .comments
            .values()
            .filter(|comment| comment.belongs_to(article_id))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn delete(&self, comment: &Comment) -> DomainResult<()> {
        self.touch();
        match self.lock().comments.remove(&comment.id.0) {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound(format!(
                "comment {} not found",
                comment.id
            ))),
        }
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn add(&self, article: &mut Article, user_id: &UserId) -> DomainResult<FavoriteMark> {
        self.touch();
        let mut state = self.lock();
        let key = (article.id.0, user_id.as_str().to_string());
        if state.marks.contains_key(&key) {
            return Err(DomainError::ConstraintViolation(
                "article already favorited".into(),
            ));
        }
        let stored = state
            .articles
            .get_mut(&article.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("article {} not found", article.id)))?;
        stored.favorites_count += 1;
        let count = stored.favorites_count;

        let created_at = fixed_now();
        state.marks.insert(key, created_at);
        drop(state);

        article.set_favorites_count(count);
        Ok(FavoriteMark {
            article_id: article.id,
            user_id: user_id.clone(),
            created_at,
        })
    }

    async fn remove(&self, article: &mut Article, user_id: &UserId) -> DomainResult<bool> {
        self.touch();
        let mut guard = self.lock();
        let state = &mut *guard;
        // 記事が無ければマークには触れない
        let stored = state
            .articles
            .get_mut(&article.id.0)
            .ok_or_else(|| DomainError::NotFound(format!("article {} not found", article.id)))?;

        let key = (article.id.0, user_id.as_str().to_string());
        let removed = state.marks.remove(&key).is_some();
        if removed {
            stored.favorites_count -= 1;
        }
        let count = stored.favorites_count;
        drop(guard);

        article.set_favorites_count(count);
        Ok(removed)
    }

    async fn exists(&self, article_id: ArticleId, user_id: &UserId) -> DomainResult<bool> {
        self.touch();
        Ok(self
            .lock()
            .marks
            .contains_key(&(article_id.0, user_id.as_str().to_string())))
    }

    async fn favorited_among(
        &self,
        user_id: &UserId,
        ids: &[ArticleId],
    ) -> DomainResult<HashSet<ArticleId>> {
        self.touch();
        let state = self.lock();
        Ok(ids
            .iter()
            .copied()
            .filter(|id| state.marks.contains_key(&(id.0, user_id.as_str().to_string())))
            .collect())
    }

    async fn count_marks(&self, article_id: ArticleId) -> DomainResult<i64> {
        self.touch();
        Ok(self.lock().marks_for(article_id.0))
    }
}
