// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! AnswerKernel - owner of the store.
//!
//! Mutations live in [`crate::processor`], reads in [`crate::query`].

use crate::store::AnswerStore;

/// The command processor and query service over one injected store.
pub struct AnswerKernel<S: AnswerStore> {
    pub(crate) store: S,
}

impl<S: AnswerStore> AnswerKernel<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
