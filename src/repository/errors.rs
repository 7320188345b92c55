use std::sync::PoisonError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(err: PoisonError<T>) -> Self {
        RepositoryError::Unavailable(format!("Lock poisoned: {err}"))
    }
}
