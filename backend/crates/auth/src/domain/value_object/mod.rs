//! Value Objects

pub mod session_cookie;
pub mod user_name;
pub mod user_password;
