//! Handlers for the `/auth` resource (signup, login).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taskdeck_core::error::CoreError;
use taskdeck_core::session::{normalize_email, SessionInfo};
use taskdeck_core::signup::{LoginForm, SignupForm};
use taskdeck_db::models::user::{CreateUser, User};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Returned for both unknown emails and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// POST /api/auth/signup
///
/// Runs the form checks before touching the store, creates the account with
/// the full name as profile metadata, and signs the new user in.
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupForm>,
) -> AppResult<(StatusCode, Json<DataResponse<SessionInfo>>)> {
    input.check()?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .store
        .create_user(&CreateUser {
            email: normalize_email(&input.email),
            password_hash,
            full_name: input.normalized_full_name(),
        })
        .await?;
    tracing::info!(user_id = %user.id, "Account created");

    let session = issue_session(&state, &user)?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// POST /api/auth/login
///
/// Authenticate with email + password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginForm>,
) -> AppResult<Json<DataResponse<SessionInfo>>> {
    let invalid = || AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));

    let Some(user) = state
        .store
        .find_user_by_email(&normalize_email(&input.email))
        .await?
    else {
        verify_against_dummy(&input.password);
        return Err(invalid());
    };

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(invalid());
    }

    let session = issue_session(&state, &user)?;
    Ok(Json(DataResponse { data: session }))
}

/// Sign an access token for `user` and build the session payload.
fn issue_session(state: &AppState, user: &User) -> AppResult<SessionInfo> {
    let access_token = generate_access_token(user.id, &user.email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(SessionInfo {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.jwt.expires_in_secs(),
        user: user.profile(),
    })
}
