//! Blog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Posts, tags, query criteria, row folding, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Post Lifecycle
//! - Created as draft; `publish` moves it to published and stamps `published_at`
//! - Delete is soft: the row stays with status deleted and is hidden from reads
//! - Drafts are visible to their owner only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::BlogConfig;
pub use error::{BlogError, BlogResult};
pub use infra::postgres::PgBlogRepository;
pub use presentation::{BlogAppState, blog_router};

#[cfg(test)]
mod tests;
