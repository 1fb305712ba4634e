pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{Article, Author, NewArticle, Tag};
pub use repository::ArticleRepository;
pub use value_objects::{ArticleId, ArticleSlug, TagId};
