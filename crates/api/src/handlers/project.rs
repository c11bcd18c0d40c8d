//! Handlers for the `/projects` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taskdeck_core::project::{CreateProject, Project};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = state.store.list_projects(auth.user_id).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<Project>>)> {
    let new_project = input.into_new()?;
    let project = state.store.create_project(auth.user_id, &new_project).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: project })))
}
