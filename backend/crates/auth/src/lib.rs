//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, value objects, repository trait
//! - `application/` - Sign-up, sign-in and identity resolution
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router, identity middleware
//!
//! ## Session Model
//! - Stateless: the cookie carries `user_name:base64(hmac_sha256(user_name))`
//! - Identity resolution fails open; a bad cookie means anonymous, not an error
//! - Passwords hashed with Argon2id

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::{AuthAppState, attach_identity, auth_router};

pub use kernel::identity::{Identity, SessionUser};
