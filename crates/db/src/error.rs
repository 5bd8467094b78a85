use std::time::Duration;

/// Failure of a single store operation.
///
/// Absence is not an error: lookups return `Ok(None)` and mutations
/// `Ok(false)` when nothing matched.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write. Holds the constraint or
    /// index name.
    #[error("Duplicate value violates unique constraint: {0}")]
    Duplicate(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Postgres(sqlx::Error),

    #[error("Document store error: {0}")]
    Mongo(mongodb::error::Error),

    /// A stored document could not be mapped back to a model.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// PostgreSQL unique violation.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// MongoDB duplicate key.
const MONGO_DUPLICATE_KEY: i32 = 11000;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Duplicate(constraint);
            }
        }
        StoreError::Postgres(err)
    }
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        if let ErrorKind::Write(WriteFailure::WriteError(write_err)) = err.kind.as_ref() {
            if write_err.code == MONGO_DUPLICATE_KEY {
                return StoreError::Duplicate(write_err.message.clone());
            }
        }
        StoreError::Mongo(err)
    }
}
