pub mod articles;
pub mod comments;
mod ownership;
