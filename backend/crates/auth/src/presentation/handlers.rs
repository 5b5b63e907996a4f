//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{CredentialsRequest, OK};

/// Shared state for auth handlers and the identity middleware
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/sign-up
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<&'static str>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(SignUpInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    Ok(Json(OK))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/sign-in
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(SignInInput {
            user_name: req.user_name,
            password: req.password,
        })
        .await?;

    let cookie = state.config.cookie.build_set_cookie(&output.cookie_value);

    Ok(([(header::SET_COOKIE, cookie)], Json(OK)).into_response())
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/sign-out
///
/// Sessions are stateless, so this only tells the browser to drop the cookie.
pub async fn sign_out<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let cookie = state.config.cookie.build_delete_cookie();
    ([(header::SET_COOKIE, cookie)], Json(OK))
}
