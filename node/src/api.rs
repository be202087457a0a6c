// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::collections::HashMap;

use answer_kernel::{AnswerRecord, EventEntry};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::EngineError;

pub const SUCCESS: &str = "success";

/// Body of `POST /`.
///
/// `data` stays an open JSON object on the wire; it is narrowed to a
/// string map here and to a typed `Command` by the kernel.
#[derive(Deserialize, Serialize, Debug)]
pub struct EventRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl EventRequest {
    pub fn new(kind: &str, pairs: &[(&str, &str)]) -> Self {
        let data = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        Self { kind: kind.to_string(), data }
    }

    pub fn string_data(&self) -> Result<HashMap<String, String>, EngineError> {
        self.data
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                _ => Err(EngineError::InvalidInput(format!("field `{}` must be a string", k))),
            })
            .collect()
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn success() -> Self {
        Self { message: SUCCESS.to_string() }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AnswerResponse {
    pub message: String,
    pub answer: AnswerRecord,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryResponse {
    pub message: String,
    pub events: Vec<EventEntry>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub exception: String,
}
