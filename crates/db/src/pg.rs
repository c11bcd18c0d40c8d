//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use taskdeck_core::project::{NewProject, Project};
use taskdeck_core::todo::{NewTodo, Todo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::DbId;

use crate::error::StoreError;
use crate::models::user::{CreateUser, User};
use crate::repositories::{ProjectRepo, TodoRepo, UserRepo};
use crate::store::Store;
use crate::DbPool;

/// Message used when signup hits `uq_users_email`.
const EMAIL_TAKEN: &str = "User already registered";

/// [`Store`] over a sqlx connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map_err(|e| StoreError::classify(e, EMAIL_TAKEN))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_todos(&self, owner: DbId) -> Result<Vec<TodoWithProject>, StoreError> {
        Ok(TodoRepo::list_by_owner(&self.pool, owner).await?)
    }

    async fn create_todo(&self, owner: DbId, input: &NewTodo) -> Result<Todo, StoreError> {
        Ok(TodoRepo::create(&self.pool, owner, input).await?)
    }

    async fn update_todo(
        &self,
        owner: DbId,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError> {
        // An empty patch must not bump `updated_at`.
        if input.is_empty() {
            return Ok(TodoRepo::find_by_id(&self.pool, owner, id).await?);
        }
        Ok(TodoRepo::update(&self.pool, owner, id, input).await?)
    }

    async fn delete_todo(&self, owner: DbId, id: DbId) -> Result<bool, StoreError> {
        Ok(TodoRepo::delete(&self.pool, owner, id).await?)
    }

    async fn list_projects(&self, owner: DbId) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list_by_owner(&self.pool, owner).await?)
    }

    async fn create_project(
        &self,
        owner: DbId,
        input: &NewProject,
    ) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.pool, owner, input).await?)
    }
}
