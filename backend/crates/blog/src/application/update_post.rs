//! Update Post Use Case
//!
//! Sparse merge over the stored post. Only the owner may update.

use std::sync::Arc;

use kernel::id::{PostId, UserId};
use kernel::patch::Sparse;

use crate::application::get_post::load_visible;
use crate::domain::entities::PostPatch;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

pub struct UpdatePostInput {
    pub post_id: PostId,
    pub caller: UserId,
    pub patch: PostPatch,
}

pub struct UpdatePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> UpdatePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: UpdatePostInput) -> BlogResult<()> {
        let UpdatePostInput {
            post_id,
            caller,
            mut patch,
        } = input;

        patch.validate()?;

        let mut post = load_visible(self.repo.as_ref(), post_id, Some(caller)).await?;
        if !post.is_owned_by(caller) {
            return Err(BlogError::Unauthorized);
        }

        let tags = patch.tags.take();
        patch.merge_into(&mut post);

        self.repo.update(&post, tags.as_deref()).await?;

        tracing::info!(
            post_id = %post_id,
            status = post.status.as_i16(),
            tags_replaced = tags.is_some(),
            "Post updated"
        );

        Ok(())
    }
}
