//! Session Cookie Value Object
//!
//! Wire form: `user_name:base64(hmac_sha256(secret, user_name))`.
//! The session is stateless; whoever holds a correctly signed value for an
//! existing user is that user.

use platform::crypto::{Signer, from_base64, to_base64};
use thiserror::Error;

use crate::domain::value_object::user_name::UserName;

/// Separates the user name from the signature
pub const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionCookieError {
    #[error("Session cookie is empty")]
    Empty,

    #[error("Session cookie must contain exactly one separator")]
    BadSeparator,

    #[error("Session cookie signature is not valid base64")]
    Signature,
}

/// Decoded, not yet verified, session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    user_name: String,
    signature: Vec<u8>,
}

impl SessionCookie {
    /// Sign a fresh cookie for `user_name`
    pub fn issue(user_name: &UserName, signer: &Signer) -> Self {
        Self {
            user_name: user_name.as_str().to_string(),
            signature: signer.sign(user_name.as_str().as_bytes()),
        }
    }

    pub fn decode(raw: &str) -> Result<Self, SessionCookieError> {
        if raw.is_empty() {
            return Err(SessionCookieError::Empty);
        }

        let mut parts = raw.split(SEPARATOR);
        let (Some(user_name), Some(signature), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(SessionCookieError::BadSeparator);
        };

        let signature = from_base64(signature).map_err(|_| SessionCookieError::Signature)?;

        Ok(Self {
            user_name: user_name.to_string(),
            signature,
        })
    }

    pub fn encode(&self) -> String {
        format!("{}{}{}", self.user_name, SEPARATOR, to_base64(&self.signature))
    }

    /// Claimed user name; only meaningful after [`Self::verify`]
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn verify(&self, signer: &Signer) -> bool {
        signer.verify(self.user_name.as_bytes(), &self.signature)
    }
}
