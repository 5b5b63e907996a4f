//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{PostId, TagId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewTag, Post, PostPatch, Tag, TagPatch};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// POST /api/posts
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub reading_time: i32,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub tags: Vec<TagId>,
}

/// PUT /api/posts/{id}; absent fields keep their stored value
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub reading_time: Option<i32>,
    pub publish: Option<bool>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub image_url: Option<String>,
    pub content: Option<String>,
    pub slug: Option<String>,
    pub tags: Option<Vec<TagId>>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        PostPatch {
            reading_time: req.reading_time,
            publish: req.publish,
            title: req.title,
            subtitle: req.subtitle,
            image_url: req.image_url,
            content: req.content,
            slug: req.slug,
            tags: req.tags,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
    pub slug: String,
}

impl From<CreateTagRequest> for NewTag {
    fn from(req: CreateTagRequest) -> Self {
        NewTag {
            name: req.name,
            slug: req.slug,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTagRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl From<UpdateTagRequest> for TagPatch {
    fn from(req: UpdateTagRequest) -> Self {
        TagPatch {
            name: req.name,
            slug: req.slug,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: TagId,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub user_id: UserId,
    pub reading_time: i32,
    /// 0 unspecified, 1 draft, 2 published, 3 deleted
    pub status: i16,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub content: String,
    pub slug: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub tags: Vec<TagResponse>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            reading_time: post.reading_time,
            status: post.status.as_i16(),
            title: post.title,
            subtitle: post.subtitle,
            image_url: post.image_url,
            content: post.content,
            slug: post.slug,
            published_at: post.published_at,
            created_at: post.created_at,
            updated_at: post.updated_at,
            deleted_at: post.deleted_at,
            tags: post.tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

/// Plain acknowledgement body
pub const OK: &str = "ok";
