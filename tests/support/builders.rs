// tests/support/builders.rs
use super::mocks::fixed_now;
use realworld_store::domain::article::{Article, ArticleId, ArticleSlug, Author};
use realworld_store::domain::user::{Email, User, UserId, Username};
use realworld_store::infrastructure::mapper::Row;

pub fn user(id: i64) -> User {
    User {
        id: UserId::new(id),
        username: Username::new(format!("user{id}")),
        email: Email::new(format!("user{id}@example.com")),
        password_hash: "hash".into(),
        bio: String::new(),
        image: String::new(),
        created_at: fixed_now(),
        updated_at: fixed_now(),
        deleted_at: None,
    }
}

pub fn article(id: i64) -> Article {
    Article {
        id: ArticleId::new(id),
        slug: ArticleSlug::new(format!("article-{id}")),
        title: format!("Article {id}"),
        description: "description".into(),
        body: "body".into(),
        author_id: UserId::new(1),
        author: Author::unresolved(UserId::new(1)),
        tags: Vec::new(),
        favorites_count: 0,
        created_at: fixed_now(),
        updated_at: fixed_now(),
        deleted_at: None,
    }
}

pub fn user_row(id: i64, username: &str, email: &str) -> Row {
    Row::new()
        .with("id", id)
        .with("username", username)
        .with("email", email)
        .with("bio", "bio")
        .with("image", "https://example.com/avatar.png")
        .with("created_at", fixed_now())
        .with("updated_at", fixed_now())
}

pub fn tag_row(id: i64, name: &str) -> Row {
    Row::new().with("id", id).with("name", name)
}

pub fn article_row(id: i64, author_id: i64) -> Row {
    Row::new()
        .with("id", id)
        .with("slug", format!("article-{id}"))
        .with("title", format!("Article {id}"))
        .with("description", "description")
        .with("body", "body")
        .with("author_id", author_id)
        .with("favorites_count", 0_i64)
        .with("created_at", fixed_now())
        .with("updated_at", fixed_now())
}
