use answer_kernel::KernelError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

impl From<PersistenceError> for KernelError {
    fn from(e: PersistenceError) -> Self {
        KernelError::Storage(e.to_string())
    }
}
