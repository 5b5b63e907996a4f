//! Router-level tests against an in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::Extension;
use axum::http::{Method, Request, StatusCode, header};
use axum::response::Response;
use chrono::{DateTime, Utc};
use kernel::id::{PostId, TagId, UserId};
use kernel::identity::Identity;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tower::ServiceExt;

use crate::application::config::BlogConfig;
use crate::application::{CreatePostInput, CreatePostUseCase};
use crate::domain::entities::{NewPost, NewTag, Post, Tag};
use crate::domain::repository::{PostRepository, PostTagRepository, TagRepository};
use crate::domain::services::fold_rows;
use crate::domain::value_objects::{PostCriteria, PostStatus};
use crate::error::{BlogError, BlogResult};
use crate::presentation::{BlogAppState, blog_router};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct Store {
    posts: Vec<Post>,
    tags: Vec<Tag>,
    /// (tag_id, post_id)
    links: Vec<(TagId, PostId)>,
    next_post: i64,
    next_tag: i64,
}

#[derive(Clone, Default)]
struct InMemoryBlogRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBlogRepository {
    async fn link_count(&self, tag_id: TagId) -> usize {
        let store = self.store.read().await;
        store.links.iter().filter(|(t, _)| *t == tag_id).count()
    }

    async fn stored_post(&self, id: PostId) -> Post {
        let store = self.store.read().await;
        store.posts.iter().find(|p| p.id == id).cloned().unwrap()
    }
}

impl PostRepository for InMemoryBlogRepository {
    async fn find_by_criteria(&self, criteria: &PostCriteria) -> BlogResult<Vec<Post>> {
        let store = self.store.read().await;

        let mut page: Vec<&Post> = store
            .posts
            .iter()
            .filter(|p| criteria.admits(p))
            .filter(|p| match criteria.tag_id {
                Some(tag_id) => store.links.contains(&(tag_id, p.id)),
                None => true,
            })
            .collect();
        page.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let mut rows = Vec::new();
        for post in page
            .into_iter()
            .skip(criteria.offset as usize)
            .take(criteria.effective_limit() as usize)
        {
            let mut tags: Vec<&Tag> = store
                .tags
                .iter()
                .filter(|t| store.links.contains(&(t.id, post.id)))
                .collect();
            tags.sort_by_key(|t| t.id);

            if tags.is_empty() {
                rows.push((post.clone(), None));
            }
            for tag in tags {
                rows.push((post.clone(), Some(tag.clone())));
            }
        }

        fold_rows(rows)
    }

    async fn create(&self, post: &NewPost) -> BlogResult<PostId> {
        let mut store = self.store.write().await;
        store.next_post += 1;
        let id = PostId::new(store.next_post);
        let now = Utc::now();
        store.posts.push(Post {
            id,
            user_id: post.user_id,
            reading_time: post.reading_time,
            status: PostStatus::Draft,
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            image_url: post.image_url.clone(),
            content: post.content.clone(),
            slug: post.slug.clone(),
            published_at: None,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            tags: Vec::new(),
        });
        Ok(id)
    }

    async fn update(&self, post: &Post, tags: Option<&[TagId]>) -> BlogResult<()> {
        let mut store = self.store.write().await;

        if let Some(tags) = tags {
            if let Some(unknown) = tags.iter().find(|id| !store.tags.iter().any(|t| t.id == **id))
            {
                return Err(BlogError::BadRequest(format!("unknown tag id {unknown}")));
            }
        }

        let slot = store
            .posts
            .iter_mut()
            .find(|p| p.id == post.id && p.status != PostStatus::Deleted)
            .ok_or(BlogError::NotFound)?;
        *slot = Post {
            tags: Vec::new(),
            ..post.clone()
        };

        if let Some(tags) = tags {
            store.links.retain(|(_, p)| *p != post.id);
            for tag_id in tags {
                if !store.links.contains(&(*tag_id, post.id)) {
                    store.links.push((*tag_id, post.id));
                }
            }
        }
        Ok(())
    }

    async fn soft_delete(&self, id: PostId, at: DateTime<Utc>) -> BlogResult<()> {
        let mut store = self.store.write().await;
        let post = store
            .posts
            .iter_mut()
            .find(|p| p.id == id && p.status != PostStatus::Deleted)
            .ok_or(BlogError::NotFound)?;
        post.soft_delete(at);
        Ok(())
    }
}

impl PostTagRepository for InMemoryBlogRepository {
    async fn tag_post(&self, post_id: PostId, tag_id: TagId) -> BlogResult<()> {
        let mut store = self.store.write().await;
        if !store.tags.iter().any(|t| t.id == tag_id) {
            return Err(BlogError::BadRequest("unknown tag id".to_string()));
        }
        if store.links.contains(&(tag_id, post_id)) {
            return Err(BlogError::BadRequest("already tagged".to_string()));
        }
        store.links.push((tag_id, post_id));
        Ok(())
    }
}

impl TagRepository for InMemoryBlogRepository {
    async fn create_tag(&self, tag: &NewTag) -> BlogResult<Tag> {
        let mut store = self.store.write().await;
        store.next_tag += 1;
        let tag = Tag {
            id: TagId::new(store.next_tag),
            name: tag.name.clone(),
            slug: tag.slug.clone(),
        };
        store.tags.push(tag.clone());
        Ok(tag)
    }

    async fn find_tag(&self, id: TagId) -> BlogResult<Tag> {
        let store = self.store.read().await;
        store
            .tags
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(BlogError::NotFound)
    }

    async fn find_all_tags(&self) -> BlogResult<Vec<Tag>> {
        let store = self.store.read().await;
        if store.tags.is_empty() {
            return Err(BlogError::NotFound);
        }
        Ok(store.tags.clone())
    }

    async fn update_tag(&self, tag: &Tag) -> BlogResult<()> {
        let mut store = self.store.write().await;
        let slot = store
            .tags
            .iter_mut()
            .find(|t| t.id == tag.id)
            .ok_or(BlogError::NotFound)?;
        *slot = tag.clone();
        Ok(())
    }

    async fn delete_tag(&self, id: TagId) -> BlogResult<()> {
        let mut store = self.store.write().await;
        let before = store.tags.len();
        store.tags.retain(|t| t.id != id);
        if store.tags.len() == before {
            return Err(BlogError::NotFound);
        }
        store.links.retain(|(t, _)| *t != id);
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

const ALICE: i64 = 1;
const BOB: i64 = 2;

struct Harness {
    repo: InMemoryBlogRepository,
}

impl Harness {
    fn new() -> Self {
        Self {
            repo: InMemoryBlogRepository::default(),
        }
    }

    fn app(&self, identity: Identity) -> Router {
        let state = BlogAppState::new(self.repo.clone(), BlogConfig::default());
        Router::new()
            .nest("/api", blog_router(state))
            .layer(Extension(identity))
    }

    fn as_user(&self, user_id: i64) -> Router {
        self.app(Identity::authenticated(
            UserId::new(user_id),
            format!("user{user_id}"),
        ))
    }

    fn anonymous(&self) -> Router {
        self.app(Identity::Anonymous)
    }

    async fn create_tag(&self, name: &str) -> TagId {
        let res = send(
            &self.as_user(ALICE),
            Method::POST,
            "/api/tags",
            Some(json!({ "name": name, "slug": name.to_lowercase() })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let store = self.repo.store.read().await;
        store.tags.iter().find(|t| t.name == name).unwrap().id
    }

    /// Creates a post through the router and returns its id
    async fn create_post(&self, owner: i64, body: Value) -> PostId {
        let res = send(&self.as_user(owner), Method::POST, "/api/posts", Some(body)).await;
        assert_eq!(res.status(), StatusCode::OK);

        let store = self.repo.store.read().await;
        store.posts.last().unwrap().id
    }

    async fn publish(&self, owner: i64, post_id: PostId) {
        let res = send(
            &self.as_user(owner),
            Method::PUT,
            &format!("/api/posts/{post_id}"),
            Some(json!({ "publish": true })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}

fn post_body(title: &str) -> Value {
    json!({
        "reading_time": 5,
        "title": title,
        "subtitle": "subtitle",
        "image_url": "https://img.example/cover.png",
        "content": "content",
        "slug": title.to_lowercase().replace(' ', "-"),
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(req.body(body).unwrap()).await.unwrap()
}

async fn json_body(res: Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn tag_ids(post: &Value) -> Vec<i64> {
    post["tags"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect()
}

// ============================================================================
// Posts
// ============================================================================

#[tokio::test]
async fn test_create_with_tags_then_fetch() {
    let h = Harness::new();
    let a = h.create_tag("Rust").await;
    let b = h.create_tag("Web").await;

    let mut body = post_body("Hello World");
    body["tags"] = json!([a.get(), b.get()]);
    let id = h.create_post(ALICE, body).await;

    let res = send(
        &h.as_user(ALICE),
        Method::GET,
        &format!("/api/posts/{id}"),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let post = json_body(res).await;
    assert_eq!(post["id"], id.get());
    assert_eq!(post["user_id"], ALICE);
    assert_eq!(post["status"], 1);
    assert_eq!(post["slug"], "hello-world");
    assert!(post["published_at"].is_null());
    assert_eq!(tag_ids(&post), vec![a.get(), b.get()]);
}

#[tokio::test]
async fn test_create_requires_sign_in() {
    let h = Harness::new();
    let res = send(
        &h.anonymous(),
        Method::POST,
        "/api/posts",
        Some(post_body("Nope")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_rejects_invalid_body() {
    let h = Harness::new();
    let app = h.as_user(ALICE);

    let res = send(&app, Method::POST, "/api/posts", Some(post_body("  "))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let mut body = post_body("Negative");
    body["reading_time"] = json!(-3);
    let res = send(&app, Method::POST, "/api/posts", Some(body)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&app, Method::POST, "/api/posts", Some(json!({ "title": 7 }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_skips_unknown_tags() {
    let h = Harness::new();
    let known = h.create_tag("Known").await;
    let missing = TagId::new(999);

    let use_case = CreatePostUseCase::new(Arc::new(h.repo.clone()));
    let output = use_case
        .execute(CreatePostInput {
            author: UserId::new(ALICE),
            reading_time: 1,
            title: "Partial".to_string(),
            subtitle: String::new(),
            image_url: String::new(),
            content: String::new(),
            slug: "partial".to_string(),
            tags: vec![known, missing],
        })
        .await
        .unwrap();

    assert_eq!(output.skipped_tags, vec![missing]);

    let stored = h.repo.stored_post(output.post_id).await;
    assert_eq!(stored.status, PostStatus::Draft);
    assert_eq!(h.repo.link_count(known).await, 1);
}

#[tokio::test]
async fn test_sparse_update_keeps_other_fields() {
    let h = Harness::new();
    let id = h.create_post(ALICE, post_body("Original")).await;
    let before = h.repo.stored_post(id).await;

    let res = send(
        &h.as_user(ALICE),
        Method::PUT,
        &format!("/api/posts/{id}"),
        Some(json!({ "title": "Renamed" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let after = h.repo.stored_post(id).await;
    assert_eq!(after.title, "Renamed");
    assert_eq!(after.subtitle, before.subtitle);
    assert_eq!(after.image_url, before.image_url);
    assert_eq!(after.content, before.content);
    assert_eq!(after.slug, before.slug);
    assert_eq!(after.reading_time, before.reading_time);
    assert_eq!(after.status, PostStatus::Draft);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn test_publish_then_unpublish() {
    let h = Harness::new();
    let id = h.create_post(ALICE, post_body("Lifecycle")).await;

    h.publish(ALICE, id).await;
    let published = h.repo.stored_post(id).await;
    assert_eq!(published.status, PostStatus::Published);
    let stamped = published.published_at.unwrap();

    // Publishing again keeps the first timestamp
    h.publish(ALICE, id).await;
    assert_eq!(h.repo.stored_post(id).await.published_at, Some(stamped));

    let res = send(
        &h.as_user(ALICE),
        Method::PUT,
        &format!("/api/posts/{id}"),
        Some(json!({ "publish": false })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let draft = h.repo.stored_post(id).await;
    assert_eq!(draft.status, PostStatus::Draft);
    assert!(draft.published_at.is_none());
}

#[tokio::test]
async fn test_update_replaces_tags_exactly() {
    let h = Harness::new();
    let a = h.create_tag("A").await;
    let b = h.create_tag("B").await;
    let c = h.create_tag("C").await;

    let mut body = post_body("Tagged");
    body["tags"] = json!([a.get(), b.get()]);
    let id = h.create_post(ALICE, body).await;
    let uri = format!("/api/posts/{id}");

    // Omitted list leaves tags alone
    send(
        &h.as_user(ALICE),
        Method::PUT,
        &uri,
        Some(json!({ "content": "edited" })),
    )
    .await;
    let post = json_body(send(&h.as_user(ALICE), Method::GET, &uri, None).await).await;
    assert_eq!(tag_ids(&post), vec![a.get(), b.get()]);

    let res = send(
        &h.as_user(ALICE),
        Method::PUT,
        &uri,
        Some(json!({ "tags": [c.get()] })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let post = json_body(send(&h.as_user(ALICE), Method::GET, &uri, None).await).await;
    assert_eq!(tag_ids(&post), vec![c.get()]);
}

#[tokio::test]
async fn test_update_and_delete_require_owner() {
    let h = Harness::new();
    let id = h.create_post(ALICE, post_body("Mine")).await;
    let uri = format!("/api/posts/{id}");
    let patch = Some(json!({ "title": "Stolen" }));

    // Bob cannot see Alice's draft at all
    let res = send(&h.as_user(BOB), Method::PUT, &uri, patch.clone()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    h.publish(ALICE, id).await;

    let res = send(&h.as_user(BOB), Method::PUT, &uri, patch.clone()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = send(&h.as_user(BOB), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = send(&h.anonymous(), Method::PUT, &uri, patch).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(h.repo.stored_post(id).await.title, "Mine");
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let h = Harness::new();
    let res = send(
        &h.as_user(ALICE),
        Method::PUT,
        "/api/posts/42",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_draft_visibility() {
    let h = Harness::new();
    let id = h.create_post(ALICE, post_body("Secret")).await;
    let uri = format!("/api/posts/{id}");

    let res = send(&h.as_user(ALICE), Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&h.as_user(BOB), Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&h.anonymous(), Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    h.publish(ALICE, id).await;
    let res = send(&h.anonymous(), Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_soft_delete_hides_post() {
    let h = Harness::new();
    let id = h.create_post(ALICE, post_body("Doomed")).await;
    h.publish(ALICE, id).await;
    let uri = format!("/api/posts/{id}");

    let res = send(&h.as_user(ALICE), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&h.as_user(ALICE), Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&h.anonymous(), Method::GET, "/api/posts", None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Row is kept, marked deleted
    let stored = h.repo.stored_post(id).await;
    assert_eq!(stored.status, PostStatus::Deleted);
    assert!(stored.deleted_at.is_some());

    let res = send(&h.as_user(ALICE), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stale_update_cannot_revive_deleted_post() {
    let h = Harness::new();
    let id = h.create_post(ALICE, post_body("Gone")).await;

    // Loaded before a concurrent delete lands
    let mut stale = h.repo.stored_post(id).await;

    let uri = format!("/api/posts/{id}");
    let res = send(&h.as_user(ALICE), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    stale.publish(Utc::now());
    let err = h.repo.update(&stale, None).await.unwrap_err();
    assert!(matches!(err, BlogError::NotFound));

    let stored = h.repo.stored_post(id).await;
    assert_eq!(stored.status, PostStatus::Deleted);
    assert!(stored.deleted_at.is_some());

    let res = send(&h.anonymous(), Method::GET, "/api/posts", None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn test_listing_pages_are_disjoint() {
    let h = Harness::new();
    let tag = h.create_tag("Paged").await;

    for i in 0..31 {
        let mut body = post_body(&format!("Post {i}"));
        body["tags"] = json!([tag.get()]);
        let id = h.create_post(ALICE, body).await;
        h.publish(ALICE, id).await;
    }

    let anon = h.anonymous();
    let first = json_body(send(&anon, Method::GET, "/api/posts", None).await).await;
    let first_explicit = json_body(send(&anon, Method::GET, "/api/posts?page=1", None).await).await;
    let zero = json_body(send(&anon, Method::GET, "/api/posts?page=0", None).await).await;
    let second = json_body(send(&anon, Method::GET, "/api/posts?page=2", None).await).await;

    let ids = |v: &Value| -> Vec<i64> {
        v.as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect()
    };

    assert_eq!(ids(&first).len(), 30);
    assert_eq!(ids(&second).len(), 1);
    assert_eq!(ids(&first), ids(&first_explicit));
    assert_eq!(ids(&first), ids(&zero));
    assert!(ids(&second).iter().all(|id| !ids(&first).contains(id)));

    // Newest first
    assert_eq!(ids(&first)[0], 31);
    assert_eq!(ids(&second)[0], 1);

    // Every post keeps its single tag across pages
    assert!(
        first
            .as_array()
            .unwrap()
            .iter()
            .all(|p| tag_ids(p) == vec![tag.get()])
    );

    let res = send(&anon, Method::GET, "/api/posts?page=3", None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let by_tag = json_body(
        send(&anon, Method::GET, &format!("/api/tags/{tag}/posts?page=2"), None).await,
    )
    .await;
    assert_eq!(ids(&by_tag), vec![1]);
}

#[tokio::test]
async fn test_negative_page_is_bad_request() {
    let h = Harness::new();
    let res = send(&h.anonymous(), Method::GET, "/api/posts?page=-1", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = send(&h.anonymous(), Method::GET, "/api/posts?page=abc", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_public_listing_excludes_drafts() {
    let h = Harness::new();
    let draft = h.create_post(ALICE, post_body("Draft")).await;
    let public = h.create_post(ALICE, post_body("Public")).await;
    h.publish(ALICE, public).await;

    let list = json_body(send(&h.anonymous(), Method::GET, "/api/posts", None).await).await;
    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![public.get()]);

    let mine = json_body(send(&h.as_user(ALICE), Method::GET, "/api/posts/mine", None).await).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);
    assert!(
        mine.as_array()
            .unwrap()
            .iter()
            .any(|p| p["id"] == draft.get())
    );

    let res = send(&h.as_user(BOB), Method::GET, "/api/posts/mine", None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&h.anonymous(), Method::GET, "/api/posts/mine", None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Tags
// ============================================================================

#[tokio::test]
async fn test_tag_crud() {
    let h = Harness::new();

    let res = send(&h.anonymous(), Method::GET, "/api/tags", None).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(
        &h.anonymous(),
        Method::POST,
        "/api/tags",
        Some(json!({ "name": "Rust", "slug": "rust" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let id = h.create_tag("Rust").await;
    let uri = format!("/api/tags/{id}");

    let res = send(
        &h.as_user(BOB),
        Method::PUT,
        &uri,
        Some(json!({ "slug": "rust-lang" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let tag = json_body(send(&h.anonymous(), Method::GET, &uri, None).await).await;
    assert_eq!(tag, json!({ "id": id.get(), "name": "Rust", "slug": "rust-lang" }));

    let list = json_body(send(&h.anonymous(), Method::GET, "/api/tags", None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let res = send(
        &h.as_user(BOB),
        Method::PUT,
        "/api/tags/77",
        Some(json!({ "name": "Ghost" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&h.anonymous(), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(&h.as_user(BOB), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = send(&h.anonymous(), Method::GET, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = send(&h.as_user(BOB), Method::DELETE, &uri, None).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tag_delete_cascades_to_posts() {
    let h = Harness::new();
    let keep = h.create_tag("Keep").await;
    let dropped = h.create_tag("Drop").await;

    let mut body = post_body("Tagged");
    body["tags"] = json!([keep.get(), dropped.get()]);
    let id = h.create_post(ALICE, body).await;

    let res = send(
        &h.as_user(ALICE),
        Method::DELETE,
        &format!("/api/tags/{dropped}"),
        None,
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(h.repo.link_count(dropped).await, 0);

    let post = json_body(
        send(
            &h.as_user(ALICE),
            Method::GET,
            &format!("/api/posts/{id}"),
            None,
        )
        .await,
    )
    .await;
    assert_eq!(tag_ids(&post), vec![keep.get()]);
}

#[tokio::test]
async fn test_bad_path_is_bad_request() {
    let h = Harness::new();
    let res = send(&h.anonymous(), Method::GET, "/api/posts/not-a-number", None).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
