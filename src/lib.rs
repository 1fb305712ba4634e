//! Persistence layer for a RealWorld-style blogging backend.
//!
//! [`infrastructure::repositories::UserStore`] and
//! [`infrastructure::repositories::ArticleStore`] translate domain lookups
//! into queries against an injected [`infrastructure::datasource::Datasource`]
//! and map the rows back into domain records.
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
