use thiserror::Error as ThisError;

use cashdesk_db::QueryError;

/// Errors of the cash desk operations
#[derive(ThisError, Debug)]
pub enum Error {
    #[error("database is not initialized")]
    NotInitialized,

    #[error("database is already initialized")]
    AlreadyInitialized,

    #[error("invalid argument: {0}")]
    Validation(String),

    #[error("a member with the last name {0:?} already exists")]
    DuplicateName(String),

    #[error("unknown member number {0}")]
    UnknownMember(u32),

    #[error("member {0} already has an open membership")]
    AlreadyMember(u32),

    #[error("member {0} has no open membership")]
    NoMembership(u32),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Check if a store error is caused by a missing record
pub fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<QueryError>(), Some(QueryError::NotFound))
}
