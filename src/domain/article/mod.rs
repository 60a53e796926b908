pub mod entity;
pub mod repository;
pub mod services;
pub mod specifications;
pub mod value_objects;

pub use entity::{Article, ArticleOverwrite, NewArticle};
pub use repository::{
    ArticleFilter, ArticleReadRepository, ArticleWriteRepository, DeletePolicy, Pagination,
};
pub use value_objects::{
    ArticleBody, ArticleDescription, ArticleId, ArticleSlug, ArticleTitle, TagList, TagName,
};
