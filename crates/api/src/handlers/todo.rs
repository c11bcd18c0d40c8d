//! Handlers for the `/todos` resource.
//!
//! Every handler resolves the caller first and passes the caller's id to
//! the store, which matches `id AND owner` in one statement. A row owned by
//! someone else therefore behaves exactly like a missing one.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use taskdeck_core::todo::{CreateTodo, Todo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

/// GET /api/todos
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<TodoWithProject>>>> {
    let todos = state.store.list_todos(auth.user_id).await?;
    Ok(Json(DataResponse { data: todos }))
}

/// POST /api/todos
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(input): AppJson<CreateTodo>,
) -> AppResult<(StatusCode, Json<DataResponse<Todo>>)> {
    let new_todo = input.into_new()?;
    let todo = state.store.create_todo(auth.user_id, &new_todo).await?;
    tracing::debug!(todo_id = %todo.id, user_id = %auth.user_id, "Todo created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: todo })))
}

/// PATCH /api/todos/{id}
///
/// Responds `{"data": null}` when nothing matched.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTodo>,
) -> AppResult<Json<DataResponse<Option<Todo>>>> {
    input.validate()?;
    let todo = state.store.update_todo(auth.user_id, id, &input).await?;
    if todo.is_none() {
        tracing::debug!(todo_id = %id, user_id = %auth.user_id, "Update matched no row");
    }
    Ok(Json(DataResponse { data: todo }))
}

/// DELETE /api/todos/{id}
///
/// Acknowledges with `{"success": true}` whether or not a row existed.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let removed = state.store.delete_todo(auth.user_id, id).await?;
    tracing::debug!(todo_id = %id, user_id = %auth.user_id, removed, "Todo delete");
    Ok(Json(SuccessResponse::ok()))
}
