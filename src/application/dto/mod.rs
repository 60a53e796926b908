pub mod articles;
pub mod auth;
pub mod comments;
pub mod pagination;
pub mod serde_time;

pub use articles::ArticleDto;
pub use auth::AuthenticatedUser;
pub use comments::CommentDto;
pub use pagination::OffsetPage;
