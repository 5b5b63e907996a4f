//! Identity Middleware
//!
//! Resolves the session cookie on every request and stores the resulting
//! [`Identity`] in request extensions. Never rejects a request; handlers
//! decide what an anonymous caller may do.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::cookie::extract_cookie;

use crate::application::ResolveIdentityUseCase;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::AuthAppState;

pub async fn attach_identity<R>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = extract_cookie(req.headers(), &state.config.cookie.name);

    let use_case = ResolveIdentityUseCase::new(state.repo.clone(), state.config.clone());
    let identity = use_case.execute(cookie.as_deref()).await;

    req.extensions_mut().insert(identity);

    next.run(req).await
}
