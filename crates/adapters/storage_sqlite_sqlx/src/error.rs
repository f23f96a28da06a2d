//! Storage-specific error type wrapping sqlx errors.

use acrules_domain::error::AcRulesError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored column holds a value the domain does not know.
    #[error("invalid value {value} in column {column}")]
    InvalidColumn { column: &'static str, value: i64 },
}

impl From<StorageError> for AcRulesError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
