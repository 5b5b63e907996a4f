//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business meaning:
//! - Message signing (HMAC-SHA256) and base64 transport encoding
//! - Password hashing (Argon2id, NIST SP 800-63B style policy)
//! - Cookie header building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
