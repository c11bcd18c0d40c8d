//! Sign-in and sign-up flows.

use taskdeck_core::error::CoreError;
use taskdeck_core::session::{SessionInfo, UserProfile};
use taskdeck_core::signup::{LoginForm, SignupForm};

use crate::api::{ApiError, TaskdeckApi};

/// An authenticated session: the bearer token and who it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    /// Token lifetime in seconds, as reported at sign-in.
    pub expires_in: i64,
    pub user: UserProfile,
}

impl From<SessionInfo> for Session {
    fn from(info: SessionInfo) -> Self {
        Self {
            access_token: info.access_token,
            expires_in: info.expires_in,
            user: info.user,
        }
    }
}

/// Sign in with email and password and attach the new token to `api`,
/// replacing whatever session it held before.
///
/// On failure the server's message (e.g. "Invalid login credentials") is
/// returned unchanged in [`ApiError::Api`].
pub async fn login(
    api: &mut TaskdeckApi,
    email: &str,
    password: &str,
) -> Result<Session, ApiError> {
    let form = LoginForm {
        email: email.to_string(),
        password: password.to_string(),
    };
    let session = Session::from(api.sign_in(&form).await?);
    api.set_token(Some(session.access_token.clone()));
    tracing::debug!(user_id = %session.user.id, "Signed in");
    Ok(session)
}

/// Create an account and attach the new token to `api`.
///
/// The form is checked locally first; a failing check returns
/// [`ApiError::Validation`] without any request being made.
pub async fn signup(api: &mut TaskdeckApi, form: &SignupForm) -> Result<Session, ApiError> {
    form.check().map_err(|e| match e {
        CoreError::Validation(msg) => ApiError::Validation(msg),
        other => ApiError::Validation(other.to_string()),
    })?;

    let session = Session::from(api.sign_up(form).await?);
    api.set_token(Some(session.access_token.clone()));
    tracing::debug!(user_id = %session.user.id, "Account created");
    Ok(session)
}

/// Drop the session held by `api`.
pub fn logout(api: &mut TaskdeckApi) {
    api.set_token(None);
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use taskdeck_core::signup::{PASSWORDS_DO_NOT_MATCH, TERMS_NOT_ACCEPTED};

    use super::*;

    fn form() -> SignupForm {
        SignupForm {
            email: "ada@example.com".into(),
            password: "correct-horse".into(),
            confirm_password: "correct-horse".into(),
            full_name: None,
            accept_terms: true,
        }
    }

    // Port 9 (discard) is never contacted: local checks fail first.
    #[tokio::test]
    async fn local_checks_run_before_any_request() {
        let mut api = TaskdeckApi::new("http://127.0.0.1:9");

        let mismatched = SignupForm {
            confirm_password: "something-else".into(),
            ..form()
        };
        assert_matches!(
            signup(&mut api, &mismatched).await,
            Err(ApiError::Validation(msg)) if msg == PASSWORDS_DO_NOT_MATCH
        );

        let no_terms = SignupForm {
            accept_terms: false,
            ..form()
        };
        assert_matches!(
            signup(&mut api, &no_terms).await,
            Err(ApiError::Validation(msg)) if msg == TERMS_NOT_ACCEPTED
        );
        assert!(!api.is_authenticated());
    }
}
