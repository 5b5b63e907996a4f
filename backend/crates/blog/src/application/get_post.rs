//! Get Post Use Case

use std::sync::Arc;

use kernel::id::{PostId, UserId};

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::PostCriteria;
use crate::error::{BlogError, BlogResult};

pub struct GetPostUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
}

impl<R> GetPostUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Drafts of other users are reported as `NotFound`
    pub async fn execute(&self, post_id: PostId, viewer: Option<UserId>) -> BlogResult<Post> {
        load_visible(self.repo.as_ref(), post_id, viewer).await
    }
}

/// Single non-deleted post, if `viewer` may see it
pub(crate) async fn load_visible<R>(
    repo: &R,
    post_id: PostId,
    viewer: Option<UserId>,
) -> BlogResult<Post>
where
    R: PostRepository,
{
    let post = repo
        .find_by_criteria(&PostCriteria::by_id(post_id))
        .await?
        .into_iter()
        .next()
        .ok_or(BlogError::NotFound)?;

    if !post.is_visible_to(viewer) {
        return Err(BlogError::NotFound);
    }

    Ok(post)
}
