// src/infrastructure/repositories/mod.rs
mod articles;
mod relation;
mod users;

pub use articles::ArticleStore;
pub use relation::{JoinRelation, relation_exists};
pub use users::UserStore;
