//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_post;
pub mod delete_post;
pub mod get_post;
pub mod list_posts;
pub mod manage_tags;
pub mod update_post;

// Re-exports
pub use config::BlogConfig;
pub use create_post::{CreatePostInput, CreatePostOutput, CreatePostUseCase};
pub use delete_post::DeletePostUseCase;
pub use get_post::GetPostUseCase;
pub use list_posts::ListPostsUseCase;
pub use manage_tags::ManageTagsUseCase;
pub use update_post::{UpdatePostInput, UpdatePostUseCase};
