// src/domain/article/entity.rs
use crate::domain::article::value_objects::{
    ArticleBody, ArticleDescription, ArticleId, ArticleSlug, ArticleTitle, TagList,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Article {
    pub id: ArticleId,
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub body: ArticleBody,
    pub author_id: UserId,
    pub tags: TagList,
    /// Denormalized count of favorite marks. Only the favorite repository
    /// writes it.
    pub favorites_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Article {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// Applies the supplied fields and leaves the others untouched. A new
    /// title always arrives together with its slug. Returns whether anything
    /// was supplied.
    pub fn overwrite(&mut self, changes: ArticleOverwrite, now: DateTime<Utc>) -> bool {
        if changes.is_empty() {
            return false;
        }

        let ArticleOverwrite {
            title,
            description,
            body,
            tags,
        } = changes;

        if let Some((title, slug)) = title {
            self.title = title;
            self.slug = slug;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(body) = body {
            self.body = body;
        }
        if let Some(tags) = tags {
            self.tags = tags;
        }
        self.updated_at = now;
        true
    }

    pub fn set_favorites_count(&mut self, count: i64) {
        self.favorites_count = count.max(0);
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub slug: ArticleSlug,
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub body: ArticleBody,
    pub author_id: UserId,
    pub tags: TagList,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial replacement of an article's editable fields. `None` means the
/// field was not supplied.
#[derive(Debug, Clone, Default)]
pub struct ArticleOverwrite {
    pub title: Option<(ArticleTitle, ArticleSlug)>,
    pub description: Option<ArticleDescription>,
    pub body: Option<ArticleBody>,
    pub tags: Option<TagList>,
}

impl ArticleOverwrite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: ArticleTitle, slug: ArticleSlug) -> Self {
        self.title = Some((title, slug));
        self
    }

    pub fn with_description(mut self, description: ArticleDescription) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_body(mut self, body: ArticleBody) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_tags(mut self, tags: TagList) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.body.is_none() && self.tags.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_article() -> Article {
        let now = Utc::now();
        Article {
            id: ArticleId::new(1).unwrap(),
            slug: ArticleSlug::new("hello-world").unwrap(),
            title: ArticleTitle::new("Hello World").unwrap(),
            description: ArticleDescription::new("old desc"),
            body: ArticleBody::new("content").unwrap(),
            author_id: UserId::new("u1").unwrap(),
            tags: TagList::required(["go"]).unwrap(),
            favorites_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn description_only_overwrite_keeps_title_and_slug() {
        let mut article = sample_article();
        let later = article.updated_at + Duration::seconds(5);
        let changed = article.overwrite(
            ArticleOverwrite::new().with_description(ArticleDescription::new("new desc")),
            later,
        );

        assert!(changed);
        assert_eq!(article.title.as_str(), "Hello World");
        assert_eq!(article.slug.as_str(), "hello-world");
        assert_eq!(article.body.as_str(), "content");
        assert_eq!(article.description.as_str(), "new desc");
        assert_eq!(article.updated_at, later);
    }

    #[test]
    fn title_overwrite_replaces_slug() {
        let mut article = sample_article();
        article.overwrite(
            ArticleOverwrite::new().with_title(
                ArticleTitle::new("Hello Go").unwrap(),
                ArticleSlug::new("hello-go").unwrap(),
            ),
            Utc::now(),
        );
        assert_eq!(article.title.as_str(), "Hello Go");
        assert_eq!(article.slug.as_str(), "hello-go");
    }

    #[test]
    fn empty_overwrite_is_a_no_op() {
        let mut article = sample_article();
        let before = article.updated_at;
        assert!(!article.overwrite(ArticleOverwrite::new(), before + Duration::seconds(1)));
        assert_eq!(article.updated_at, before);
    }

    #[test]
    fn ownership_compares_user_ids() {
        let article = sample_article();
        assert!(article.is_owned_by(&UserId::new("u1").unwrap()));
        assert!(!article.is_owned_by(&UserId::new("u2").unwrap()));
    }

    #[test]
    fn favorites_count_never_negative() {
        let mut article = sample_article();
        article.set_favorites_count(-3);
        assert_eq!(article.favorites_count, 0);
    }
}
