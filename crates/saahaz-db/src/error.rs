//! Database-specific error types and conversions.

use saahaz_core::error::SaahazError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Malformed record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for SaahazError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => SaahazError::NotFound { entity, id },
            other => SaahazError::Database(other.to_string()),
        }
    }
}

/// Whether a statement failed because a UNIQUE index rejected the write.
pub(crate) fn is_unique_violation(err: &surrealdb::Error) -> bool {
    err.to_string().contains("already contains")
}

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<uuid::Uuid, DbError> {
    uuid::Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid {field} UUID: {e}")))
}
