//! Create Post Use Case
//!
//! Inserts a draft, then associates tags one at a time. A failed association
//! does not fail the request; the tag id is reported as skipped.

use std::sync::Arc;

use kernel::id::{PostId, TagId, UserId};

use crate::domain::entities::NewPost;
use crate::domain::repository::{PostRepository, PostTagRepository};
use crate::error::BlogResult;

pub struct CreatePostInput {
    pub author: UserId,
    pub reading_time: i32,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub content: String,
    pub slug: String,
    pub tags: Vec<TagId>,
}

#[derive(Debug)]
pub struct CreatePostOutput {
    pub post_id: PostId,
    /// Tags that could not be associated
    pub skipped_tags: Vec<TagId>,
}

pub struct CreatePostUseCase<R>
where
    R: PostRepository + PostTagRepository,
{
    repo: Arc<R>,
}

impl<R> CreatePostUseCase<R>
where
    R: PostRepository + PostTagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePostInput) -> BlogResult<CreatePostOutput> {
        let new_post = NewPost {
            user_id: input.author,
            reading_time: input.reading_time,
            title: input.title,
            subtitle: input.subtitle,
            image_url: input.image_url,
            content: input.content,
            slug: input.slug,
        };
        new_post.validate()?;

        let post_id = self.repo.create(&new_post).await?;

        let mut skipped_tags = Vec::new();
        for tag_id in input.tags {
            if let Err(e) = self.repo.tag_post(post_id, tag_id).await {
                tracing::warn!(
                    post_id = %post_id,
                    tag_id = %tag_id,
                    error = %e,
                    "Skipping tag association"
                );
                skipped_tags.push(tag_id);
            }
        }

        tracing::info!(
            post_id = %post_id,
            user_id = %input.author,
            skipped = skipped_tags.len(),
            "Post created"
        );

        Ok(CreatePostOutput {
            post_id,
            skipped_tags,
        })
    }
}
