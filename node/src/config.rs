// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::ConfigError;

pub const ENV_BIND_ADDR: &str = "ANSWERS_BIND_ADDR";
pub const ENV_DB_PATH: &str = "ANSWERS_DB_PATH";

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// SQLite file holding the `answers` and `events` tables.
    pub db_path: PathBuf,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 1323)),
            db_path: PathBuf::from("events.db"),
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `ANSWERS_BIND_ADDR` / `ANSWERS_DB_PATH`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(raw) = lookup(ENV_BIND_ADDR) {
            cfg.bind_addr = raw.parse().map_err(|_| ConfigError::Invalid {
                name: ENV_BIND_ADDR,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_DB_PATH) {
            if raw.trim().is_empty() {
                return Err(ConfigError::Invalid { name: ENV_DB_PATH, value: raw });
            }
            cfg.db_path = PathBuf::from(raw);
        }

        Ok(cfg)
    }
}
