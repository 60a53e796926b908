pub mod entity;
pub mod repository;

pub use entity::FavoriteMark;
pub use repository::FavoriteRepository;
