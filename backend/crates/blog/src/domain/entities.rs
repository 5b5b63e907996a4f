//! Domain Entities
//!
//! Posts and tags, plus the sparse patches applied by `PUT` requests.

use chrono::{DateTime, Utc};
use kernel::id::{PostId, TagId, UserId};
use kernel::patch::{Sparse, assign};

use crate::domain::value_objects::PostStatus;
use crate::error::{BlogError, BlogResult};

// ============================================================================
// Post
// ============================================================================

/// Post with its tags
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    /// Owner; never changes
    pub user_id: UserId,
    pub reading_time: i32,
    pub status: PostStatus,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub content: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub tags: Vec<Tag>,
}

impl Post {
    /// Move to published. `published_at` keeps its first value.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        if self.status != PostStatus::Published {
            self.status = PostStatus::Published;
            self.published_at = Some(now);
        }
    }

    /// Back to draft
    pub fn unpublish(&mut self) {
        self.status = PostStatus::Draft;
        self.published_at = None;
    }

    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.status = PostStatus::Deleted;
        self.deleted_at = Some(now);
        self.updated_at = now;
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Published posts are public; anything else only its owner sees.
    pub fn is_visible_to(&self, viewer: Option<UserId>) -> bool {
        self.status == PostStatus::Published || viewer.is_some_and(|id| self.is_owned_by(id))
    }
}

/// Post about to be inserted. Always stored as a draft.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: UserId,
    pub reading_time: i32,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub content: String,
    pub slug: String,
}

impl NewPost {
    pub fn validate(&self) -> BlogResult<()> {
        validate_title(&self.title)?;
        validate_reading_time(self.reading_time)
    }
}

/// Sparse post update
///
/// `tags` is not merged: a present list replaces the whole association set
/// and is handed to the repository separately.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub reading_time: Option<i32>,
    pub publish: Option<bool>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub tags: Option<Vec<TagId>>,
}

impl PostPatch {
    /// Same rules as creation, applied to the fields that are present
    pub fn validate(&self) -> BlogResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(reading_time) = self.reading_time {
            validate_reading_time(reading_time)?;
        }
        Ok(())
    }
}

impl Sparse<Post> for PostPatch {
    fn merge_into(self, target: &mut Post) {
        let now = Utc::now();

        assign(&mut target.reading_time, self.reading_time);
        assign(&mut target.title, self.title);
        assign(&mut target.subtitle, self.subtitle);
        assign(&mut target.image_url, self.image_url);
        assign(&mut target.content, self.content);
        assign(&mut target.slug, self.slug);

        match self.publish {
            Some(true) => target.publish(now),
            Some(false) => target.unpublish(),
            None => {}
        }

        target.updated_at = now;
    }
}

fn validate_title(title: &str) -> BlogResult<()> {
    if title.trim().is_empty() {
        return Err(BlogError::BadRequest("title must not be empty".to_string()));
    }
    Ok(())
}

fn validate_reading_time(reading_time: i32) -> BlogResult<()> {
    if reading_time < 0 {
        return Err(BlogError::BadRequest(
            "reading_time must not be negative".to_string(),
        ));
    }
    Ok(())
}

// ============================================================================
// Tag
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub slug: String,
}

impl NewTag {
    pub fn validate(&self) -> BlogResult<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("slug", &self.slug)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl TagPatch {
    pub fn validate(&self) -> BlogResult<()> {
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        if let Some(slug) = &self.slug {
            require_non_empty("slug", slug)?;
        }
        Ok(())
    }
}

impl Sparse<Tag> for TagPatch {
    fn merge_into(self, target: &mut Tag) {
        assign(&mut target.name, self.name);
        assign(&mut target.slug, self.slug);
    }
}

fn require_non_empty(field: &str, value: &str) -> BlogResult<()> {
    if value.trim().is_empty() {
        return Err(BlogError::BadRequest(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn draft(owner: i64) -> Post {
        let now = Utc::now();
        Post {
            id: PostId::new(1),
            user_id: UserId::new(owner),
            reading_time: 4,
            status: PostStatus::Draft,
            title: "Title".to_string(),
            subtitle: "Sub".to_string(),
            image_url: "https://img.example/1.png".to_string(),
            content: "Body".to_string(),
            slug: "title".to_string(),
            published_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_publish_keeps_first_timestamp() {
        let mut post = draft(1);
        let first = Utc::now() - Duration::hours(1);
        post.publish(first);
        post.publish(Utc::now());

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.published_at, Some(first));
    }

    #[test]
    fn test_unpublish_clears_timestamp() {
        let mut post = draft(1);
        post.publish(Utc::now());
        post.unpublish();

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, None);
    }

    #[test]
    fn test_visibility() {
        let mut post = draft(1);
        assert!(post.is_visible_to(Some(UserId::new(1))));
        assert!(!post.is_visible_to(Some(UserId::new(2))));
        assert!(!post.is_visible_to(None));

        post.publish(Utc::now());
        assert!(post.is_visible_to(None));
    }

    #[test]
    fn test_patch_merges_present_fields_only() {
        let mut post = draft(1);
        let before = post.clone();

        PostPatch {
            title: Some("New".to_string()),
            ..Default::default()
        }
        .merge_into(&mut post);

        assert_eq!(post.title, "New");
        assert_eq!(post.subtitle, before.subtitle);
        assert_eq!(post.content, before.content);
        assert_eq!(post.reading_time, before.reading_time);
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.updated_at >= before.updated_at);
    }

    #[test]
    fn test_patch_publish_flag() {
        let mut post = draft(1);
        PostPatch {
            publish: Some(true),
            ..Default::default()
        }
        .merge_into(&mut post);
        assert_eq!(post.status, PostStatus::Published);
        assert!(post.published_at.is_some());

        PostPatch {
            publish: Some(false),
            ..Default::default()
        }
        .merge_into(&mut post);
        assert_eq!(post.status, PostStatus::Draft);
        assert!(post.published_at.is_none());
    }

    #[test]
    fn test_validation() {
        let patch = PostPatch {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(BlogError::BadRequest(_))));

        let patch = PostPatch {
            reading_time: Some(-1),
            ..Default::default()
        };
        assert!(matches!(patch.validate(), Err(BlogError::BadRequest(_))));

        assert!(PostPatch::default().validate().is_ok());

        let tag = NewTag {
            name: "rust".to_string(),
            slug: String::new(),
        };
        assert!(tag.validate().is_err());
    }
}
