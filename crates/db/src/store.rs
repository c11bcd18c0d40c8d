//! The persistence boundary.

use async_trait::async_trait;
use taskdeck_core::project::{NewProject, Project};
use taskdeck_core::todo::{NewTodo, Todo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::{CreateUser, User};

/// Table-scoped storage for users, todos and projects.
///
/// Every todo and project operation takes the caller's `owner` id and
/// filters on it inside a single statement, so a row belonging to another
/// user is indistinguishable from a missing one.
#[async_trait]
pub trait Store: Send + Sync {
    /// Short name of the backend, for logs and health output.
    fn backend_tag(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Insert a user. A duplicate email yields [`StoreError::Conflict`].
    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// All of `owner`'s todos, newest first, each joined with its project.
    async fn list_todos(&self, owner: DbId) -> Result<Vec<TodoWithProject>, StoreError>;

    async fn create_todo(&self, owner: DbId, input: &NewTodo) -> Result<Todo, StoreError>;

    /// Apply a partial update. `None` when no row matches both `id` and `owner`.
    async fn update_todo(
        &self,
        owner: DbId,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError>;

    /// Returns `true` if a row was removed.
    async fn delete_todo(&self, owner: DbId, id: DbId) -> Result<bool, StoreError>;

    /// All of `owner`'s projects ordered by name.
    async fn list_projects(&self, owner: DbId) -> Result<Vec<Project>, StoreError>;

    async fn create_project(&self, owner: DbId, input: &NewProject)
        -> Result<Project, StoreError>;
}
