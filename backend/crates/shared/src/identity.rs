//! Request Identity
//!
//! Who is calling. Resolution never fails: anything short of a verified
//! session is [`Identity::Anonymous`], and handlers decide whether that is
//! acceptable.

use serde::Serialize;

use crate::id::UserId;

/// Authenticated caller, derived from a verified session cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub user_id: UserId,
    pub user_name: String,
}

/// Caller identity attached to every request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(SessionUser),
}

impl Identity {
    pub fn authenticated(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self::Authenticated(SessionUser {
            user_id,
            user_name: user_name.into(),
        })
    }

    /// The session user, if any
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    /// Id of the caller, if any
    pub fn user_id(&self) -> Option<UserId> {
        self.user().map(|user| user.user_id)
    }
}

// ============================================================================
// Axum extractor (feature-gated)
// ============================================================================

/// Reads the identity stored in request extensions by the identity
/// middleware. Routes mounted without it see every caller as anonymous.
#[cfg(feature = "axum")]
impl<S> axum::extract::FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Identity>()
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        let identity = Identity::default();
        assert!(identity.user().is_none());
        assert_eq!(identity.user_id(), None);
    }

    #[test]
    fn test_authenticated_accessors() {
        let identity = Identity::authenticated(UserId::new(9), "alice");
        assert_eq!(identity.user_id(), Some(UserId::new(9)));
        assert_eq!(identity.user().map(|u| u.user_name.as_str()), Some("alice"));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_extractor_defaults_to_anonymous() {
        use axum::extract::FromRequestParts;

        let (mut parts, _) = http::Request::builder().body(()).unwrap().into_parts();
        let identity = Identity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity, Identity::Anonymous);

        parts
            .extensions
            .insert(Identity::authenticated(UserId::new(1), "bob"));
        let identity = Identity::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(identity.user_id(), Some(UserId::new(1)));
    }
}
