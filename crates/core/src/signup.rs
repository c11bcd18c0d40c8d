//! Credential forms and the local checks run before contacting the
//! session service.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::session::normalize_email;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const TERMS_NOT_ACCEPTED: &str = "Please accept the terms and conditions";
pub const INVALID_EMAIL: &str = "Invalid email address";

/// Email + password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Account creation form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupForm {
    /// Checked and stored in normalized form (see [`normalize_email`]).
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Stored as profile metadata on the new account.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub accept_terms: bool,
}

impl SignupForm {
    /// Run the local checks in order, failing on the first one that does
    /// not hold. Each failure carries its own message.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.password != self.confirm_password {
            return Err(CoreError::Validation(PASSWORDS_DO_NOT_MATCH.into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CoreError::Validation(PASSWORD_TOO_SHORT.into()));
        }
        if !self.accept_terms {
            return Err(CoreError::Validation(TERMS_NOT_ACCEPTED.into()));
        }
        if !normalize_email(&self.email).validate_email() {
            return Err(CoreError::Validation(INVALID_EMAIL.into()));
        }
        Ok(())
    }

    /// The full name with surrounding whitespace removed, or `None` if blank.
    pub fn normalized_full_name(&self) -> Option<String> {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}
