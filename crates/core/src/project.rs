//! Project entity: a named, colored label grouping todos.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Color assigned when a project is created without one.
pub const DEFAULT_COLOR: &str = "#6b7280";

/// Message returned when a project is created without a usable name.
pub const NAME_REQUIRED: &str = "Name is required";

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A validated project insert.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub color: String,
}

impl CreateProject {
    pub fn into_new(self) -> Result<NewProject, CoreError> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(CoreError::Validation(NAME_REQUIRED.into())),
        };
        let color = self
            .color
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        Ok(NewProject { name, color })
    }
}
