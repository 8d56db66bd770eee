use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Query errors
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum QueryError {
    #[error("Not found")]
    NotFound,
    #[error("Ambiguous results ({0:?}) for query")]
    Ambiguous(usize),
}

/// The id returned by an `INSERT ... RETURNING id`
#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}

/// Take the single result of a query
pub fn single<T>(mut results: Vec<T>) -> Result<T, QueryError> {
    match results.len() {
        0 => Err(QueryError::NotFound),
        1 => Ok(results.remove(0)),
        n => Err(QueryError::Ambiguous(n)),
    }
}
