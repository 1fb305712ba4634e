// src/application/ports/util.rs
/// Turns an article title into the base of its slug.
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, title: &str) -> String;
}
