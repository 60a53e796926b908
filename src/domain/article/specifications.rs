use crate::domain::article::entity::Article;
use crate::domain::user::UserId;

pub trait OwnershipSpecification {
    fn is_satisfied(&self) -> bool;
}

/// Update and delete of an article, and deletion of comments under it, are
/// reserved to the article's author.
pub struct CanModifyArticleSpec<'a> {
    article: &'a Article,
    user_id: &'a UserId,
}

impl<'a> CanModifyArticleSpec<'a> {
    pub fn new(article: &'a Article, user_id: &'a UserId) -> Self {
        Self { article, user_id }
    }
}

impl OwnershipSpecification for CanModifyArticleSpec<'_> {
    fn is_satisfied(&self) -> bool {
        self.article.is_owned_by(self.user_id)
    }
}
