//! Database-specific error types and conversions.

use barback_core::error::BarbackError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for BarbackError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => BarbackError::NotFound { entity, id },
            other => BarbackError::Database(other.to_string()),
        }
    }
}
