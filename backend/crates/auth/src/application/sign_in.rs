//! Sign In Use Case
//!
//! Checks credentials and issues a signed session cookie value.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    session_cookie::SessionCookie,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user_id: UserId,
    /// Value for the session cookie, `user_name:signature`
    pub cookie_value: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Unknown user and wrong password both yield `InvalidCredentials`, and
    /// both pay for one Argon2 verify
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let candidate = RawPassword::candidate(input.password);

        let found = match UserName::parse(&input.user_name) {
            Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await?,
            Err(_) => None,
        };

        let Some(user) = found else {
            let _ = UserPassword::decoy().verify(&candidate, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.verify(&candidate, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let cookie_value = SessionCookie::issue(&user.user_name, &self.config.signer).encode();

        tracing::info!(user_id = %user.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: user.user_id,
            cookie_value,
        })
    }
}
