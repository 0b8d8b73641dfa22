use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl ModelError {
    /// True when the underlying database rejected the write because of a unique index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            ModelError::Db(e) => is_unique_violation(e),
            ModelError::Validation(_) => false,
        }
    }
}

pub fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
