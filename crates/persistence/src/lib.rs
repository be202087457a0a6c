pub mod error;
pub mod sqlite;
pub mod fixtures;

pub use error::{PersistenceError, Result};
pub use sqlite::{SqliteStore, SqliteTx, StoreStats};
