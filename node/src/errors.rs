// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use answer_kernel::KernelError;
use answer_persistence::PersistenceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// A submitted command was rejected.
    #[error("{0}")]
    Command(KernelError),
    /// A read (current answer or history) failed.
    #[error("{0}")]
    Query(KernelError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Storage unavailable: {0}")]
    Storage(#[from] PersistenceError),
    #[error("Internal server error")]
    Internal,
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::Command(KernelError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            EngineError::Command(_) => StatusCode::BAD_REQUEST,
            EngineError::Query(KernelError::NotFound) => StatusCode::NOT_FOUND,
            EngineError::Query(KernelError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            EngineError::Query(_) => StatusCode::BAD_REQUEST,
            EngineError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EngineError::Storage(_) | EngineError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        let body = Json(json!({
            "exception": self.to_string()
        }));

        (status, body).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
