//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{PostId, TagId};

use crate::domain::entities::{NewPost, NewTag, Post, Tag};
use crate::domain::value_objects::PostCriteria;
use crate::error::BlogResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Posts matching `criteria`, tags attached, newest first.
    /// Pagination counts posts, not joined rows. No match is `NotFound`.
    async fn find_by_criteria(&self, criteria: &PostCriteria) -> BlogResult<Vec<Post>>;

    /// Insert as draft and return the new id
    async fn create(&self, post: &NewPost) -> BlogResult<PostId>;

    /// Write back every mutable column. When `tags` is present the post's
    /// associations are replaced in the same transaction.
    async fn update(&self, post: &Post, tags: Option<&[TagId]>) -> BlogResult<()>;

    /// Mark deleted; the row and its associations stay
    async fn soft_delete(&self, id: PostId, at: DateTime<Utc>) -> BlogResult<()>;
}

/// Post/tag association
#[trait_variant::make(PostTagRepository: Send)]
pub trait LocalPostTagRepository {
    async fn tag_post(&self, post_id: PostId, tag_id: TagId) -> BlogResult<()>;
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    async fn create_tag(&self, tag: &NewTag) -> BlogResult<Tag>;

    async fn find_tag(&self, id: TagId) -> BlogResult<Tag>;

    /// Empty table is `NotFound`
    async fn find_all_tags(&self) -> BlogResult<Vec<Tag>>;

    async fn update_tag(&self, tag: &Tag) -> BlogResult<()>;

    /// Removes the tag and every association to it
    async fn delete_tag(&self, id: TagId) -> BlogResult<()>;
}

/// Everything the blog handlers need from storage
pub trait BlogRepository:
    PostRepository + PostTagRepository + TagRepository + Clone + Send + Sync + 'static
{
}

impl<T> BlogRepository for T where
    T: PostRepository + PostTagRepository + TagRepository + Clone + Send + Sync + 'static
{
}
