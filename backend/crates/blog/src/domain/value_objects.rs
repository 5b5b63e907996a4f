//! Domain Value Objects

use kernel::id::{PostId, TagId, UserId};

use crate::domain::entities::Post;
use crate::error::{BlogError, BlogResult};

/// Default page size when a criteria carries no limit
pub const DEFAULT_PAGE_SIZE: i64 = 30;

// ============================================================================
// PostStatus
// ============================================================================

/// Lifecycle state, stored as `SMALLINT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum PostStatus {
    Unspecified = 0,
    Draft = 1,
    Published = 2,
    Deleted = 3,
}

impl PostStatus {
    pub fn from_i16(value: i16) -> Option<Self> {
        match value {
            0 => Some(Self::Unspecified),
            1 => Some(Self::Draft),
            2 => Some(Self::Published),
            3 => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }
}

// ============================================================================
// PostCriteria
// ============================================================================

/// Filters for post reads. Present filters are ANDed together.
///
/// Soft-deleted posts never match unless `status` is `Deleted`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCriteria {
    pub id: Option<PostId>,
    pub user_id: Option<UserId>,
    pub status: Option<PostStatus>,
    pub tag_id: Option<TagId>,
    /// 0 means [`DEFAULT_PAGE_SIZE`]
    pub limit: i64,
    pub offset: i64,
}

impl PostCriteria {
    pub fn by_id(id: PostId) -> Self {
        Self {
            id: Some(id),
            limit: 1,
            ..Default::default()
        }
    }

    pub fn owned_by(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_tag(mut self, tag_id: TagId) -> Self {
        self.tag_id = Some(tag_id);
        self
    }

    pub fn paged(mut self, page: Page, page_size: i64) -> Self {
        self.limit = page_size;
        self.offset = page.offset(page_size);
        self
    }

    pub fn effective_limit(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            DEFAULT_PAGE_SIZE
        }
    }

    /// Column filters other than the tag filter, which needs the
    /// association table.
    pub fn admits(&self, post: &Post) -> bool {
        if self.id.is_some_and(|id| id != post.id) {
            return false;
        }
        if self.user_id.is_some_and(|id| id != post.user_id) {
            return false;
        }
        match self.status {
            Some(status) => post.status == status,
            None => post.status != PostStatus::Deleted,
        }
    }
}

// ============================================================================
// Page
// ============================================================================

/// 1-based page number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub const FIRST: Page = Page(1);

    /// Absent and 0 mean the first page; negative is rejected.
    pub fn from_query(page: Option<i64>) -> BlogResult<Self> {
        match page {
            None | Some(0) => Ok(Self::FIRST),
            Some(n) if n < 0 => Err(BlogError::BadRequest(format!("invalid page: {n}"))),
            Some(n) => Ok(Self(n)),
        }
    }

    pub fn offset(self, page_size: i64) -> i64 {
        (self.0 - 1).saturating_mul(page_size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::FIRST
    }
}
