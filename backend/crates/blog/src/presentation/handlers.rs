//! HTTP Handlers

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::id::{PostId, TagId, UserId};
use kernel::identity::Identity;
use serde::Serialize;
use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::application::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListPostsUseCase,
    ManageTagsUseCase, UpdatePostInput, UpdatePostUseCase,
};
use crate::domain::repository::BlogRepository;
use crate::domain::value_objects::Page;
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    CreatePostRequest, CreateTagRequest, OK, PageQuery, PostResponse, TagResponse,
    UpdatePostRequest, UpdateTagRequest,
};

/// Shared state for blog handlers
#[derive(Clone)]
pub struct BlogAppState<R>
where
    R: BlogRepository,
{
    pub repo: Arc<R>,
    pub config: Arc<BlogConfig>,
}

impl<R> BlogAppState<R>
where
    R: BlogRepository,
{
    pub fn new(repo: R, config: BlogConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

fn require_user(identity: &Identity) -> BlogResult<UserId> {
    identity.user_id().ok_or(BlogError::Unauthorized)
}

/// Empty listings answer 204 with no body
fn listing<T, U>(result: BlogResult<Vec<T>>) -> BlogResult<Response>
where
    U: From<T> + Serialize,
{
    match result {
        Ok(items) => {
            let body: Vec<U> = items.into_iter().map(U::from).collect();
            Ok(Json(body).into_response())
        }
        Err(BlogError::NotFound) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(e) => Err(e),
    }
}

fn page_of(query: Result<Query<PageQuery>, QueryRejection>) -> BlogResult<Page> {
    let Query(query) = query?;
    Page::from_query(query.page)
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/posts
pub async fn list_posts<R>(
    State(state): State<BlogAppState<R>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> BlogResult<Response>
where
    R: BlogRepository,
{
    let page = page_of(query)?;
    let use_case = ListPostsUseCase::new(state.repo.clone(), state.config.clone());
    listing::<_, PostResponse>(use_case.published(page).await)
}

/// GET /api/posts/mine
pub async fn list_my_posts<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> BlogResult<Response>
where
    R: BlogRepository,
{
    let user_id = require_user(&identity)?;
    let page = page_of(query)?;
    let use_case = ListPostsUseCase::new(state.repo.clone(), state.config.clone());
    listing::<_, PostResponse>(use_case.owned_by(user_id, page).await)
}

/// GET /api/tags/{id}/posts
pub async fn list_posts_by_tag<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<TagId>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> BlogResult<Response>
where
    R: BlogRepository,
{
    let Path(tag_id) = path?;
    let page = page_of(query)?;
    let use_case = ListPostsUseCase::new(state.repo.clone(), state.config.clone());
    listing::<_, PostResponse>(use_case.published_with_tag(tag_id, page).await)
}

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> BlogResult<Json<&'static str>>
where
    R: BlogRepository,
{
    let author = require_user(&identity)?;
    let Json(req) = payload?;

    let use_case = CreatePostUseCase::new(state.repo.clone());
    use_case
        .execute(CreatePostInput {
            author,
            reading_time: req.reading_time,
            title: req.title,
            subtitle: req.subtitle,
            image_url: req.image_url,
            content: req.content,
            slug: req.slug,
            tags: req.tags,
        })
        .await?;

    Ok(Json(OK))
}

/// GET /api/posts/{id}
pub async fn get_post<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    path: Result<Path<PostId>, PathRejection>,
) -> BlogResult<Json<PostResponse>>
where
    R: BlogRepository,
{
    let Path(post_id) = path?;
    let use_case = GetPostUseCase::new(state.repo.clone());
    let post = use_case.execute(post_id, identity.user_id()).await?;
    Ok(Json(post.into()))
}

/// PUT /api/posts/{id}
pub async fn update_post<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    path: Result<Path<PostId>, PathRejection>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> BlogResult<Json<&'static str>>
where
    R: BlogRepository,
{
    let caller = require_user(&identity)?;
    let Path(post_id) = path?;
    let Json(req) = payload?;

    let use_case = UpdatePostUseCase::new(state.repo.clone());
    use_case
        .execute(UpdatePostInput {
            post_id,
            caller,
            patch: req.into(),
        })
        .await?;

    Ok(Json(OK))
}

/// DELETE /api/posts/{id}
pub async fn delete_post<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    path: Result<Path<PostId>, PathRejection>,
) -> BlogResult<Json<&'static str>>
where
    R: BlogRepository,
{
    let caller = require_user(&identity)?;
    let Path(post_id) = path?;

    DeletePostUseCase::new(state.repo.clone())
        .execute(post_id, caller)
        .await?;

    Ok(Json(OK))
}

// ============================================================================
// Tags
// ============================================================================

/// GET /api/tags
pub async fn list_tags<R>(State(state): State<BlogAppState<R>>) -> BlogResult<Response>
where
    R: BlogRepository,
{
    let use_case = ManageTagsUseCase::new(state.repo.clone());
    listing::<_, TagResponse>(use_case.list().await)
}

/// POST /api/tags
pub async fn create_tag<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> BlogResult<Json<&'static str>>
where
    R: BlogRepository,
{
    require_user(&identity)?;
    let Json(req) = payload?;

    ManageTagsUseCase::new(state.repo.clone())
        .create(req.into())
        .await?;

    Ok(Json(OK))
}

/// GET /api/tags/{id}
pub async fn get_tag<R>(
    State(state): State<BlogAppState<R>>,
    path: Result<Path<TagId>, PathRejection>,
) -> BlogResult<Json<TagResponse>>
where
    R: BlogRepository,
{
    let Path(tag_id) = path?;
    let tag = ManageTagsUseCase::new(state.repo.clone())
        .get(tag_id)
        .await?;
    Ok(Json(tag.into()))
}

/// PUT /api/tags/{id}
pub async fn update_tag<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    path: Result<Path<TagId>, PathRejection>,
    payload: Result<Json<UpdateTagRequest>, JsonRejection>,
) -> BlogResult<Json<&'static str>>
where
    R: BlogRepository,
{
    require_user(&identity)?;
    let Path(tag_id) = path?;
    let Json(req) = payload?;

    ManageTagsUseCase::new(state.repo.clone())
        .update(tag_id, req.into())
        .await?;

    Ok(Json(OK))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag<R>(
    State(state): State<BlogAppState<R>>,
    identity: Identity,
    path: Result<Path<TagId>, PathRejection>,
) -> BlogResult<Json<&'static str>>
where
    R: BlogRepository,
{
    require_user(&identity)?;
    let Path(tag_id) = path?;

    ManageTagsUseCase::new(state.repo.clone())
        .delete(tag_id)
        .await?;

    Ok(Json(OK))
}
