//! Blog Router

use axum::{Router, routing::get};

use crate::domain::repository::BlogRepository;
use crate::presentation::handlers::{self, BlogAppState};

/// Routes mounted under `/api`. Expects the identity middleware to run first;
/// without it every caller is anonymous.
pub fn blog_router<R>(state: BlogAppState<R>) -> Router
where
    R: BlogRepository,
{
    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route("/posts/mine", get(handlers::list_my_posts::<R>))
        .route(
            "/posts/{id}",
            get(handlers::get_post::<R>)
                .put(handlers::update_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route(
            "/tags",
            get(handlers::list_tags::<R>).post(handlers::create_tag::<R>),
        )
        .route(
            "/tags/{id}",
            get(handlers::get_tag::<R>)
                .put(handlers::update_tag::<R>)
                .delete(handlers::delete_tag::<R>),
        )
        .route("/tags/{id}/posts", get(handlers::list_posts_by_tag::<R>))
        .with_state(state)
}
