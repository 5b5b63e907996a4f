//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

/// Body of both sign-up and sign-in
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsRequest {
    #[serde(rename = "username")]
    pub user_name: String,
    pub password: String,
}

/// Plain acknowledgement body
pub const OK: &str = "ok";
