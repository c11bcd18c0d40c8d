//! In-process [`Store`] used by tests and `STORE_BACKEND=memory` runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use taskdeck_core::project::{NewProject, Project};
use taskdeck_core::todo::{NewTodo, Todo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::DbId;
use tokio::sync::{Mutex, RwLock};

use crate::error::StoreError;
use crate::models::user::{CreateUser, User};
use crate::store::Store;

#[derive(Default)]
struct Tables {
    users: HashMap<DbId, User>,
    /// Insertion order, which is also creation order.
    todos: Vec<Todo>,
    projects: Vec<Project>,
}

/// [`Store`] keeping all rows in memory.
///
/// Counts every operation that reaches it and can be switched into a
/// failing mode to exercise error paths.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    operations: AtomicU64,
    unavailable: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations served (or refused) so far.
    pub fn operation_count(&self) -> u64 {
        self.operations.load(Ordering::Relaxed)
    }

    /// While set, every operation fails with [`StoreError::Unavailable`]
    /// carrying this message.
    pub async fn set_unavailable(&self, message: Option<String>) {
        if let Some(message) = &message {
            tracing::warn!(%message, "Memory store switched to failing mode");
        }
        *self.unavailable.lock().await = message;
    }

    /// Total todo rows across all owners.
    pub async fn todo_count(&self) -> usize {
        self.tables.read().await.todos.len()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        self.operations.fetch_add(1, Ordering::Relaxed);
        match self.unavailable.lock().await.as_ref() {
            Some(message) => Err(StoreError::Unavailable(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.enter().await
    }

    async fn create_user(&self, input: &CreateUser) -> Result<User, StoreError> {
        self.enter().await?;
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(StoreError::Conflict("User already registered".into()));
        }
        let now = Utc::now();
        let user = User {
            id: DbId::new_v4(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            full_name: input.full_name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.enter().await?;
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn list_todos(&self, owner: DbId) -> Result<Vec<TodoWithProject>, StoreError> {
        self.enter().await?;
        let tables = self.tables.read().await;
        let todos = tables
            .todos
            .iter()
            .rev()
            .filter(|t| t.user_id == owner)
            .map(|t| TodoWithProject {
                todo: t.clone(),
                project: t.project_id.and_then(|pid| {
                    tables
                        .projects
                        .iter()
                        .find(|p| p.id == pid && p.user_id == owner)
                        .cloned()
                }),
            })
            .collect();
        Ok(todos)
    }

    async fn create_todo(&self, owner: DbId, input: &NewTodo) -> Result<Todo, StoreError> {
        self.enter().await?;
        let now = Utc::now();
        let todo = Todo {
            id: DbId::new_v4(),
            title: input.title.clone(),
            completed: false,
            priority: input.priority,
            due_date: input.due_date,
            project_id: input.project_id,
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(
        &self,
        owner: DbId,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, StoreError> {
        self.enter().await?;
        let mut tables = self.tables.write().await;
        let Some(todo) = tables
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner)
        else {
            return Ok(None);
        };
        if !input.is_empty() {
            input.apply(todo);
            todo.updated_at = Utc::now();
        }
        Ok(Some(todo.clone()))
    }

    async fn delete_todo(&self, owner: DbId, id: DbId) -> Result<bool, StoreError> {
        self.enter().await?;
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| !(t.id == id && t.user_id == owner));
        Ok(tables.todos.len() < before)
    }

    async fn list_projects(&self, owner: DbId) -> Result<Vec<Project>, StoreError> {
        self.enter().await?;
        let tables = self.tables.read().await;
        let mut projects: Vec<Project> = tables
            .projects
            .iter()
            .filter(|p| p.user_id == owner)
            .cloned()
            .collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(projects)
    }

    async fn create_project(
        &self,
        owner: DbId,
        input: &NewProject,
    ) -> Result<Project, StoreError> {
        self.enter().await?;
        let now = Utc::now();
        let project = Project {
            id: DbId::new_v4(),
            name: input.name.clone(),
            color: input.color.clone(),
            user_id: owner,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.projects.push(project.clone());
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use taskdeck_core::todo::Priority;

    use super::*;

    fn new_todo(title: &str) -> NewTodo {
        NewTodo {
            title: title.to_string(),
            priority: Priority::Low,
            project_id: None,
            due_date: None,
        }
    }

    #[tokio::test]
    async fn list_is_newest_first_and_owner_scoped() {
        let store = MemoryStore::new();
        let alice = DbId::new_v4();
        let bob = DbId::new_v4();

        store.create_todo(alice, &new_todo("first")).await.unwrap();
        store.create_todo(bob, &new_todo("bob's")).await.unwrap();
        store.create_todo(alice, &new_todo("second")).await.unwrap();

        let titles: Vec<_> = store
            .list_todos(alice)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.todo.title)
            .collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[tokio::test]
    async fn update_and_delete_ignore_other_owners() {
        let store = MemoryStore::new();
        let alice = DbId::new_v4();
        let mallory = DbId::new_v4();
        let todo = store.create_todo(alice, &new_todo("mine")).await.unwrap();

        let patch = UpdateTodo {
            completed: Some(true),
            ..Default::default()
        };
        assert!(store
            .update_todo(mallory, todo.id, &patch)
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_todo(mallory, todo.id).await.unwrap());

        let listed = store.list_todos(alice).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(!listed[0].todo.completed);
    }

    #[tokio::test]
    async fn join_skips_projects_of_other_owners() {
        let store = MemoryStore::new();
        let alice = DbId::new_v4();
        let bob = DbId::new_v4();
        let bobs_project = store
            .create_project(
                bob,
                &NewProject {
                    name: "Secret".into(),
                    color: "#000000".into(),
                },
            )
            .await
            .unwrap();

        let input = NewTodo {
            project_id: Some(bobs_project.id),
            ..new_todo("sneaky")
        };
        store.create_todo(alice, &input).await.unwrap();

        let listed = store.list_todos(alice).await.unwrap();
        assert_eq!(listed[0].todo.project_id, Some(bobs_project.id));
        assert!(listed[0].project.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::new();
        let input = CreateUser {
            email: "ada@example.com".into(),
            password_hash: "hash".into(),
            full_name: None,
        };
        store.create_user(&input).await.unwrap();
        assert_matches!(store.create_user(&input).await, Err(StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn unavailable_mode_fails_every_operation() {
        let store = MemoryStore::new();
        store
            .set_unavailable(Some("connection refused".into()))
            .await;

        let err = store.list_todos(DbId::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(store.operation_count(), 1);

        store.set_unavailable(None).await;
        assert!(store.health_check().await.is_ok());
    }
}
