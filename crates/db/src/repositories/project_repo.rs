//! Repository for the `projects` table.

use sqlx::PgPool;
use taskdeck_core::project::{NewProject, Project};
use taskdeck_core::types::DbId;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, color, user_id, created_at, updated_at";

/// Provides owner-scoped operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project owned by `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: DbId,
        input: &NewProject,
    ) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (user_id, name, color)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(owner)
            .bind(&input.name)
            .bind(&input.color)
            .fetch_one(pool)
            .await
    }

    /// List the owner's projects ordered by name.
    pub async fn list_by_owner(pool: &PgPool, owner: DbId) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE user_id = $1 ORDER BY name ASC");
        sqlx::query_as::<_, Project>(&query)
            .bind(owner)
            .fetch_all(pool)
            .await
    }
}
