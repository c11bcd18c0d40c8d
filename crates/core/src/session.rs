//! Session payloads exchanged between the session service and its callers.

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Public profile of an account. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
}

/// Returned by sign-in and sign-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub access_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserProfile,
}

/// Canonical form of an email address used for lookups and uniqueness.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
