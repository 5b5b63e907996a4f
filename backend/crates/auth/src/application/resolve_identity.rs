//! Resolve Identity Use Case
//!
//! Turns the session cookie of a request into an [`Identity`]. Fails open:
//!
//! | input                        | result        |
//! |------------------------------|---------------|
//! | no cookie                    | anonymous     |
//! | cookie does not decode       | anonymous     |
//! | signature does not verify    | anonymous     |
//! | user lookup misses or errors | anonymous     |
//! | user found                   | authenticated |

use std::sync::Arc;

use kernel::identity::Identity;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{session_cookie::SessionCookie, user_name::UserName};

pub struct ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ResolveIdentityUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, cookie_value: Option<&str>) -> Identity {
        let Some(raw) = cookie_value else {
            return Identity::Anonymous;
        };

        let cookie = match SessionCookie::decode(raw) {
            Ok(cookie) => cookie,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed session cookie");
                return Identity::Anonymous;
            }
        };

        if !cookie.verify(&self.config.signer) {
            tracing::debug!("Ignoring session cookie with bad signature");
            return Identity::Anonymous;
        }

        let Ok(user_name) = UserName::parse(cookie.user_name()) else {
            return Identity::Anonymous;
        };

        match self.user_repo.find_by_user_name(&user_name).await {
            Ok(Some(user)) => Identity::authenticated(user.user_id, user.user_name.into_inner()),
            Ok(None) => {
                tracing::debug!(user_name = %user_name, "Session user no longer exists");
                Identity::Anonymous
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session user lookup failed, treating as anonymous");
                Identity::Anonymous
            }
        }
    }
}
