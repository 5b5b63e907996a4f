//! Delete Post Use Case

use std::sync::Arc;

use chrono::Utc;
use kernel::id::{PostId, UserId};

use crate::application::get_post::load_visible;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

pub struct DeletePostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> DeletePostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Soft delete by the owner
    pub async fn execute(&self, post_id: PostId, caller: UserId) -> BlogResult<()> {
        let post = load_visible(self.repo.as_ref(), post_id, Some(caller)).await?;
        if !post.is_owned_by(caller) {
            return Err(BlogError::Unauthorized);
        }

        self.repo.soft_delete(post_id, Utc::now()).await?;

        tracing::info!(post_id = %post_id, user_id = %caller, "Post deleted");

        Ok(())
    }
}
