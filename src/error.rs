// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

/// Every way a command or query can fail.
///
/// All variants are terminal for the current command. Nothing here is
/// fatal to the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Malformed or unbindable input; raised before any storage access.
    #[error("invalid command: {0}")]
    Validation(String),

    /// `create` collided with an active row carrying the same key and value.
    #[error("answer with key already exists")]
    DuplicateKeyValue,

    /// No row matched the lookup.
    #[error("record not found")]
    NotFound,

    /// `delete` matched a row that is already inactive.
    #[error("cannot delete answer")]
    AlreadyDeleted,

    /// Command type outside create/update/delete.
    #[error("event type not implemented: {0}")]
    UnsupportedCommand(String),

    /// Underlying read/write failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl KernelError {
    pub fn is_storage(&self) -> bool {
        matches!(self, KernelError::Storage(_))
    }
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
