// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use answer_kernel::{AnswerKernel, AnswerRecord, AnswerStore, Command, EventEntry, KernelError};
use answer_persistence::SqliteStore;
use tokio::sync::Mutex;

use crate::config::NodeConfig;
use crate::errors::EngineError;

/// One engine per node, shared by every handler.
pub type SharedEngine<S> = Arc<Mutex<Engine<S>>>;

/// Transport-facing wrapper around the kernel: parses raw commands and
/// records logs and metrics for every outcome.
pub struct Engine<S: AnswerStore> {
    kernel: AnswerKernel<S>,
}

impl Engine<SqliteStore> {
    pub fn open(cfg: &NodeConfig) -> Result<Self, EngineError> {
        let store = SqliteStore::open(&cfg.db_path)?;
        tracing::info!("Answer store ready at {:?}", cfg.db_path);
        Ok(Self::new(store))
    }
}

impl<S: AnswerStore> Engine<S> {
    pub fn new(store: S) -> Self {
        Self {
            kernel: AnswerKernel::new(store),
        }
    }

    pub fn into_shared(self) -> SharedEngine<S> {
        Arc::new(Mutex::new(self))
    }

    pub fn kernel(&self) -> &AnswerKernel<S> {
        &self.kernel
    }

    /// Parse and apply a raw command (`type` + flat data map).
    pub fn submit(&mut self, kind: &str, data: &HashMap<String, String>) -> Result<EventEntry, KernelError> {
        let start = Instant::now();
        let result = Command::from_parts(kind, data).and_then(|cmd| self.kernel.process(&cmd));
        metrics::histogram!("answers_command_duration_seconds", start.elapsed().as_secs_f64());

        match &result {
            Ok(entry) => {
                metrics::counter!("answers_commands_total", 1, "type" => entry.kind.as_str());
                tracing::debug!("Event committed: {} {:?} (#{})", entry.kind, entry.key, entry.id);
            }
            Err(e) => {
                metrics::counter!("answers_commands_rejected_total", 1, "reason" => reason(e));
                if e.is_storage() {
                    tracing::error!("Command {:?} failed in storage: {}", kind, e);
                } else {
                    tracing::info!("Command {:?} rejected: {}", kind, e);
                }
            }
        }

        result
    }

    pub fn current(&self, key: &str) -> Result<AnswerRecord, KernelError> {
        self.kernel.current(key)
    }

    pub fn history(&self, key: &str) -> Result<Vec<EventEntry>, KernelError> {
        self.kernel.history(key)
    }
}

fn reason(e: &KernelError) -> &'static str {
    match e {
        KernelError::Validation(_) => "validation",
        KernelError::DuplicateKeyValue => "duplicate",
        KernelError::NotFound => "not_found",
        KernelError::AlreadyDeleted => "already_deleted",
        KernelError::UnsupportedCommand(_) => "unsupported",
        KernelError::Storage(_) => "storage",
    }
}
