pub mod auth;
pub mod health;
pub mod project;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                     create account (public)
/// /auth/login                                      sign in (public)
///
/// /todos                                           list, create (auth required)
/// /todos/{id}                                      update, delete (auth required)
///
/// /projects                                        list, create (auth required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/todos", todo::router())
        .nest("/projects", project::router())
}
