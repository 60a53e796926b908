mod list;
mod service;

pub use list::GetCommentsQuery;
pub use service::CommentQueryService;
