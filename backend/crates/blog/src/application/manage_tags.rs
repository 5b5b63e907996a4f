//! Tag Use Cases
//!
//! Tags are shared across users; any signed-in caller may manage them.
//! The HTTP layer enforces the sign-in requirement.

use std::sync::Arc;

use kernel::id::TagId;
use kernel::patch::Sparse;

use crate::domain::entities::{NewTag, Tag, TagPatch};
use crate::domain::repository::TagRepository;
use crate::error::BlogResult;

pub struct ManageTagsUseCase<R>
where
    R: TagRepository,
{
    repo: Arc<R>,
}

impl<R> ManageTagsUseCase<R>
where
    R: TagRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new_tag: NewTag) -> BlogResult<Tag> {
        new_tag.validate()?;
        let tag = self.repo.create_tag(&new_tag).await?;
        tracing::info!(tag_id = %tag.id, slug = %tag.slug, "Tag created");
        Ok(tag)
    }

    pub async fn get(&self, tag_id: TagId) -> BlogResult<Tag> {
        self.repo.find_tag(tag_id).await
    }

    pub async fn list(&self) -> BlogResult<Vec<Tag>> {
        self.repo.find_all_tags().await
    }

    pub async fn update(&self, tag_id: TagId, patch: TagPatch) -> BlogResult<Tag> {
        patch.validate()?;

        let mut tag = self.repo.find_tag(tag_id).await?;
        patch.merge_into(&mut tag);
        self.repo.update_tag(&tag).await?;

        tracing::info!(tag_id = %tag_id, "Tag updated");
        Ok(tag)
    }

    /// Cascades to post associations
    pub async fn delete(&self, tag_id: TagId) -> BlogResult<()> {
        self.repo.delete_tag(tag_id).await?;
        tracing::info!(tag_id = %tag_id, "Tag deleted");
        Ok(())
    }
}
