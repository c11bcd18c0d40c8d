//! Repository for the `todos` table.
//!
//! Every statement filters on `user_id` alongside the row id, so reads and
//! writes are scoped to the owner in one round trip.

use sqlx::{FromRow, PgPool};
use taskdeck_core::project::Project;
use taskdeck_core::todo::{NewTodo, Todo, TodoWithProject, UpdateTodo};
use taskdeck_core::types::{DbId, Timestamp};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, completed, priority, due_date, project_id, user_id, created_at, updated_at";

/// A todo row plus the `LEFT JOIN`ed project columns (all null when the
/// todo has no project).
#[derive(Debug, FromRow)]
struct TodoListRow {
    #[sqlx(flatten)]
    todo: Todo,
    p_id: Option<DbId>,
    p_name: Option<String>,
    p_color: Option<String>,
    p_user_id: Option<DbId>,
    p_created_at: Option<Timestamp>,
    p_updated_at: Option<Timestamp>,
}

impl From<TodoListRow> for TodoWithProject {
    fn from(row: TodoListRow) -> Self {
        let project = match (
            row.p_id,
            row.p_name,
            row.p_color,
            row.p_user_id,
            row.p_created_at,
            row.p_updated_at,
        ) {
            (Some(id), Some(name), Some(color), Some(user_id), Some(created_at), Some(updated_at)) => {
                Some(Project {
                    id,
                    name,
                    color,
                    user_id,
                    created_at,
                    updated_at,
                })
            }
            _ => None,
        };
        TodoWithProject {
            todo: row.todo,
            project,
        }
    }
}

/// Provides owner-scoped CRUD operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo for `owner`. `completed` always starts as false.
    pub async fn create(pool: &PgPool, owner: DbId, input: &NewTodo) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (user_id, title, priority, project_id, due_date, completed)
             VALUES ($1, $2, $3, $4, $5, FALSE)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(owner)
            .bind(&input.title)
            .bind(input.priority)
            .bind(input.project_id)
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    /// List the owner's todos, most recently created first, with their project.
    ///
    /// The join only matches projects of the same owner, so a todo pointing
    /// at someone else's project is listed without one.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner: DbId,
    ) -> Result<Vec<TodoWithProject>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TodoListRow>(
            "SELECT t.id, t.title, t.completed, t.priority, t.due_date, t.project_id,
                    t.user_id, t.created_at, t.updated_at,
                    p.id AS p_id, p.name AS p_name, p.color AS p_color,
                    p.user_id AS p_user_id, p.created_at AS p_created_at,
                    p.updated_at AS p_updated_at
             FROM todos t
             LEFT JOIN projects p ON p.id = t.project_id AND p.user_id = t.user_id
             WHERE t.user_id = $1
             ORDER BY t.created_at DESC",
        )
        .bind(owner)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(TodoWithProject::from).collect())
    }

    /// Find one of the owner's todos by id.
    pub async fn find_by_id(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(owner)
            .fetch_optional(pool)
            .await
    }

    /// Update a todo. Only provided fields in `input` are applied;
    /// `project_id` and `due_date` can be cleared with an explicit null.
    ///
    /// Returns `None` if no row matches both `id` and `owner`.
    pub async fn update(
        pool: &PgPool,
        owner: DbId,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title      = COALESCE($3, title),
                completed  = COALESCE($4, completed),
                priority   = COALESCE($5, priority),
                project_id = CASE WHEN $6 THEN $7 ELSE project_id END,
                due_date   = CASE WHEN $8 THEN $9 ELSE due_date END,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(owner)
            .bind(&input.title)
            .bind(input.completed)
            .bind(input.priority)
            .bind(input.project_id.is_some())
            .bind(input.project_id.flatten())
            .bind(input.due_date.is_some())
            .bind(input.due_date.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete one of the owner's todos. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, owner: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
