//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary every feature crate agrees on:
//! - Common error types
//! - Typed integer ids (`UserId`, `PostId`, `TagId`)
//! - The per-request caller [`identity::Identity`]
//! - Sparse update helpers used by `PUT` style operations
//!
//! Only things with the same meaning in every domain belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod identity;
pub mod patch;
