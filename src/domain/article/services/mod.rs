// src/domain/article/services/mod.rs
use std::sync::Arc;

use crate::domain::article::value_objects::{ArticleSlug, ArticleTitle};
use crate::domain::errors::{DomainError, DomainResult};

pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Derives article slugs from titles. The same title always yields the same
/// slug; collisions are rejected by the store.
pub struct ArticleSlugService {
    generator: Arc<dyn SlugGenerator>,
}

impl ArticleSlugService {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    pub fn slug_for(&self, title: &ArticleTitle) -> DomainResult<ArticleSlug> {
        let slug = self.generator.slugify(title.as_str());
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "title must contain at least one letter or digit".into(),
            ));
        }
        ArticleSlug::new(slug)
    }
}
