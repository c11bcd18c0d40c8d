/// Errors surfaced by a [`Store`](crate::Store).
///
/// `Display` output is passed to API callers unchanged, so variants carry
/// the backend's own message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An error from sqlx.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated.
    #[error("{0}")]
    Conflict(String),

    /// The backend refused to serve the request.
    #[error("{0}")]
    Unavailable(String),
}

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl StoreError {
    /// Turn unique-constraint violations on `uq_*` constraints into
    /// [`StoreError::Conflict`] with the given message. Anything else is
    /// wrapped as-is.
    pub fn classify(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let is_unique = db_err.code().as_deref() == Some(UNIQUE_VIOLATION);
            let is_named = db_err
                .constraint()
                .is_some_and(|c| c.starts_with("uq_"));
            if is_unique && is_named {
                tracing::debug!(constraint = ?db_err.constraint(), "Unique constraint violated");
                return StoreError::Conflict(conflict_message.to_string());
            }
        }
        StoreError::Database(err)
    }
}
