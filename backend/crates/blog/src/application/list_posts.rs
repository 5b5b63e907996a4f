//! List Posts Use Case

use std::sync::Arc;

use kernel::id::{TagId, UserId};

use crate::application::config::BlogConfig;
use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::domain::value_objects::{Page, PostCriteria, PostStatus};
use crate::error::BlogResult;

/// Paged post listings. Every method is `NotFound` on an empty page.
pub struct ListPostsUseCase<R>
where
    R: PostRepository,
{
    repo: Arc<R>,
    config: Arc<BlogConfig>,
}

impl<R> ListPostsUseCase<R>
where
    R: PostRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<BlogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn published(&self, page: Page) -> BlogResult<Vec<Post>> {
        let criteria = PostCriteria::default().with_status(PostStatus::Published);
        self.fetch(criteria, page).await
    }

    pub async fn published_with_tag(&self, tag_id: TagId, page: Page) -> BlogResult<Vec<Post>> {
        let criteria = PostCriteria::default()
            .with_status(PostStatus::Published)
            .with_tag(tag_id);
        self.fetch(criteria, page).await
    }

    /// Drafts included, deleted posts excluded
    pub async fn owned_by(&self, user_id: UserId, page: Page) -> BlogResult<Vec<Post>> {
        let criteria = PostCriteria::default().owned_by(user_id);
        self.fetch(criteria, page).await
    }

    async fn fetch(&self, criteria: PostCriteria, page: Page) -> BlogResult<Vec<Post>> {
        let criteria = criteria.paged(page, self.config.page_size);
        self.repo.find_by_criteria(&criteria).await
    }
}
