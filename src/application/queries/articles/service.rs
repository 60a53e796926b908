use std::sync::Arc;

use crate::domain::{article::ArticleReadRepository, favorite::FavoriteRepository};

pub struct ArticleQueryService {
    pub(super) read_repo: Arc<dyn ArticleReadRepository>,
    pub(super) favorite_repo: Arc<dyn FavoriteRepository>,
}

impl ArticleQueryService {
    pub fn new(
        read_repo: Arc<dyn ArticleReadRepository>,
        favorite_repo: Arc<dyn FavoriteRepository>,
    ) -> Self {
        Self {
            read_repo,
            favorite_repo,
        }
    }
}
