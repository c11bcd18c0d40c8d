//! Todo entity, priority levels and the request DTOs shared by server and client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::project::Project;
use crate::types::{DbId, Timestamp};

/// Message returned when a create request carries no usable title.
pub const TITLE_REQUIRED: &str = "Title is required";

/// Message returned when an update tries to blank out a title.
pub const TITLE_EMPTY: &str = "Title cannot be empty";

/// Urgency of a todo. Persisted as the `todo_priority` enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "todo_priority", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(CoreError::Validation(format!(
                "Unknown priority '{other}'. Expected one of: high, medium, low"
            ))),
        }
    }
}

/// A todo row from the `todos` table.
///
/// `user_id` is the owner. It is bound to the authenticated caller at
/// creation and never accepted from request bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    pub due_date: Option<Timestamp>,
    pub project_id: Option<DbId>,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A todo joined with its project, as returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoWithProject {
    #[serde(flatten)]
    pub todo: Todo,
    pub project: Option<Project>,
}

impl From<Todo> for TodoWithProject {
    fn from(todo: Todo) -> Self {
        Self {
            todo,
            project: None,
        }
    }
}

/// Request body for creating a todo.
///
/// `title` is optional at the type level so that a missing title surfaces
/// as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

/// A validated insert, ready for the store. Defaults are already applied.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: String,
    pub priority: Priority,
    pub project_id: Option<DbId>,
    pub due_date: Option<Timestamp>,
}

impl CreateTodo {
    /// Validate the request and apply defaults (`priority = low`).
    pub fn into_new(self) -> Result<NewTodo, CoreError> {
        let title = validate_title(self.title.as_deref())?;
        Ok(NewTodo {
            title,
            priority: self.priority.unwrap_or_default(),
            project_id: self.project_id,
            due_date: self.due_date,
        })
    }
}

/// Partial update for a todo. Absent fields are left untouched.
///
/// `project_id` and `due_date` are nullable columns, so they use
/// `Option<Option<T>>`: the outer `None` means "not provided", while
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub project_id: Option<Option<DbId>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<Timestamp>>,
}

impl UpdateTodo {
    /// Reject a provided-but-blank title. Everything else is accepted as is.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self.title.as_deref() {
            Some(title) if title.trim().is_empty() => {
                Err(CoreError::Validation(TITLE_EMPTY.into()))
            }
            _ => Ok(()),
        }
    }

    /// Whether the request touches no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply this patch to an in-memory todo.
    pub fn apply(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        if let Some(project_id) = self.project_id {
            todo.project_id = project_id;
        }
        if let Some(due_date) = self.due_date {
            todo.due_date = due_date;
        }
    }
}

/// Deserialize a field that was present in the payload, keeping `null` as
/// `Some(None)`. Combined with `#[serde(default)]`, an absent field is `None`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Check that a title is present and not blank, returning it unchanged.
pub fn validate_title(title: Option<&str>) -> Result<String, CoreError> {
    match title {
        Some(t) if !t.trim().is_empty() => Ok(t.to_string()),
        _ => Err(CoreError::Validation(TITLE_REQUIRED.into())),
    }
}
