//! Route definitions for the `/todos` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::todo;
use crate::state::AppState;

/// Routes mounted at `/todos`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(todo::list).post(todo::create))
        .route("/{id}", patch(todo::update).delete(todo::delete))
}
