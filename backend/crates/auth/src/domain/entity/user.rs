//! User Entity
//!
//! Users are created at sign-up and never change afterwards.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{user_name::UserName, user_password::UserPassword};

/// Stored user
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Unique, case-sensitive
    pub user_name: UserName,
    pub password: UserPassword,
    pub created_at: DateTime<Utc>,
}

/// User about to be inserted; the id comes from the database
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: UserName,
    pub password: UserPassword,
}
