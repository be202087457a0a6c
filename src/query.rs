// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Query Service. Read-only, no transaction.

use crate::error::{KernelError, KernelResult};
use crate::kernel::AnswerKernel;
use crate::store::AnswerStore;
use crate::types::{AnswerFilter, AnswerRecord, EventEntry};

impl<S: AnswerStore> AnswerKernel<S> {
    /// Latest active answer for `key`. Last write wins when several rows are active.
    pub fn current(&self, key: &str) -> KernelResult<AnswerRecord> {
        self.store
            .find_answer(&AnswerFilter::key(key).active())?
            .ok_or(KernelError::NotFound)
    }

    /// Every stored row for `key`, oldest first, active or not.
    pub fn versions(&self, key: &str) -> KernelResult<Vec<AnswerRecord>> {
        self.store.answers_for(key)
    }

    /// Full event history for `key` in insertion order. Empty if the key was never touched.
    pub fn history(&self, key: &str) -> KernelResult<Vec<EventEntry>> {
        self.store.events_for(key)
    }
}
