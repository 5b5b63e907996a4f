//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;

use platform::cookie::CookieConfig;
use platform::crypto::{Signer, SignerError, random_bytes};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie attributes (name `idCookie` by default)
    pub cookie: CookieConfig,
    /// HMAC signer for session cookies
    pub signer: Signer,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(session_secret: &[u8]) -> Result<Self, SignerError> {
        Ok(Self {
            cookie: CookieConfig::default(),
            signer: Signer::new(session_secret)?,
            password_pepper: None,
        })
    }

    /// Random secret and an insecure cookie, for local runs
    pub fn development() -> Result<Self, SignerError> {
        let mut config = Self::new(&random_bytes(32))?;
        config.cookie.secure = false;
        Ok(config)
    }

    pub fn with_cookie(mut self, cookie: CookieConfig) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper;
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("cookie", &self.cookie)
            .field("signer", &self.signer)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
