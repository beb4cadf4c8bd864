//! tablegate: a small table gateway over SQLite.
//!
//! ```no_run
//! use tablegate::{Record, SharedConnection, TableGateway};
//!
//! let conn = SharedConnection::open("app.db")?;
//! let users = TableGateway::with_connection("users", "id", conn);
//! let id = users.create(&Record::new().with("name", "A".to_string()))?;
//! let row = users.find(id)?;
//! # Ok::<(), tablegate::GatewayError>(())
//! ```

// Core infrastructure modules
pub mod core;

// Gateway and its value types
pub mod config;
pub mod gateway;
pub mod identity;
pub mod record;

#[cfg(test)]
mod test_utils;

pub use crate::core::db::{
    clear_shared_connection, connect, set_shared_connection, shared_connection, SharedConnection,
};
pub use crate::core::{GatewayError, Result};
pub use gateway::{Fetched, TableGateway, DEFAULT_ID_FIELD};
pub use identity::Identity;
pub use record::Record;
pub use rusqlite::types::Value;
