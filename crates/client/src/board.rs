//! Dashboard state: a local mirror of the caller's todos.
//!
//! Mutations go to the server first. The local copy changes only after the
//! request succeeded, so a failure never needs rolling back. Failures are
//! logged and returned; the cache is left as it was.

use indexmap::IndexMap;
use taskdeck_core::board::partition;
use taskdeck_core::project::Project;
use taskdeck_core::todo::{CreateTodo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::DbId;

use crate::api::{ApiError, TaskdeckApi};

/// Groups rendered by the dashboard. Completed todos appear in neither.
#[derive(Debug, PartialEq)]
pub struct BoardView<'a> {
    pub high_priority: Vec<&'a TodoWithProject>,
    pub other: Vec<&'a TodoWithProject>,
}

pub struct Board {
    api: TaskdeckApi,
    /// Keyed by todo id, in list order (newest first).
    todos: IndexMap<DbId, TodoWithProject>,
    projects: Vec<Project>,
}

impl Board {
    /// An empty board. Call [`Board::load`] to populate it.
    pub fn new(api: TaskdeckApi) -> Self {
        Self {
            api,
            todos: IndexMap::new(),
            projects: Vec::new(),
        }
    }

    /// Fetch todos and projects concurrently and replace the local state.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        let (todos, projects) = tokio::try_join!(self.api.list_todos(), self.api.list_projects())
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load board");
                e
            })?;

        self.todos = todos.into_iter().map(|t| (t.todo.id, t)).collect();
        self.projects = projects;
        tracing::debug!(
            todos = self.todos.len(),
            projects = self.projects.len(),
            "Board loaded"
        );
        Ok(())
    }

    /// Create a todo and put it at the top of the list.
    ///
    /// A blank title is ignored without contacting the server; `Ok(None)`
    /// is returned in that case.
    pub async fn add(&mut self, input: CreateTodo) -> Result<Option<DbId>, ApiError> {
        if input.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            return Ok(None);
        }

        let todo = self.api.create_todo(&input).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to add todo");
            e
        })?;

        let project = todo
            .project_id
            .and_then(|pid| self.projects.iter().find(|p| p.id == pid).cloned());
        let id = todo.id;
        self.todos
            .shift_insert(0, id, TodoWithProject { todo, project });
        Ok(Some(id))
    }

    /// Flip the `completed` flag of a cached todo.
    ///
    /// The local copy is flipped once the request succeeds; the row the
    /// server returns is not consulted. Unknown ids are ignored.
    pub async fn toggle(&mut self, id: DbId) -> Result<(), ApiError> {
        let Some(current) = self.todos.get(&id).map(|t| t.todo.completed) else {
            return Ok(());
        };

        let patch = UpdateTodo {
            completed: Some(!current),
            ..Default::default()
        };
        self.api.update_todo(id, &patch).await.map_err(|e| {
            tracing::error!(error = %e, todo_id = %id, "Failed to toggle todo");
            e
        })?;

        if let Some(entry) = self.todos.get_mut(&id) {
            entry.todo.completed = !current;
        }
        Ok(())
    }

    /// Delete a todo and drop it from the local list.
    pub async fn remove(&mut self, id: DbId) -> Result<(), ApiError> {
        self.api.delete_todo(id).await.map_err(|e| {
            tracing::error!(error = %e, todo_id = %id, "Failed to delete todo");
            e
        })?;
        self.todos.shift_remove(&id);
        Ok(())
    }

    pub fn todos(&self) -> impl Iterator<Item = &TodoWithProject> {
        self.todos.values()
    }

    pub fn get(&self, id: DbId) -> Option<&TodoWithProject> {
        self.todos.get(&id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Group the cached todos for display. Recomputed on every call.
    pub fn view(&self) -> BoardView<'_> {
        let groups = partition(self.todos.values());
        BoardView {
            high_priority: groups.high_priority,
            other: groups.other,
        }
    }
}
