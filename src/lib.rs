// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! answer-kernel: a key-addressed answer store with an append-only audit trail.
//!
//! Commands (create / update / delete) are validated against the current rows
//! of a key and applied to the record table and the event log in a single
//! store transaction.

pub mod command;
pub mod error;
pub mod kernel;
pub mod processor;
pub mod query;
pub mod store;
pub mod types;

pub use command::Command;
pub use error::{KernelError, KernelResult};
pub use kernel::AnswerKernel;
pub use store::{AnswerReader, AnswerStore, MemoryStore, StoreTx};
pub use types::{AnswerFilter, AnswerRecord, EventEntry, EventType};
