/// Connection Management Module
///
/// This module provides the shared connection handle used by table gateways,
/// the process-wide default slot gateways fall back to, and opening of
/// connections from configuration.

use crate::config::DatabaseConfig;
use crate::core::{GatewayError, Result};
use once_cell::sync::OnceCell;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Journal modes accepted from configuration
const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// A cloneable handle to one SQLite connection.
///
/// Every clone refers to the same connection. Statements run while holding
/// the handle's lock, so a handle can be shared across threads.
#[derive(Debug, Clone)]
pub struct SharedConnection {
    inner: Arc<Mutex<Connection>>,
}

impl SharedConnection {
    /// Wraps an already opened connection
    pub fn new(connection: Connection) -> Self {
        SharedConnection {
            inner: Arc::new(Mutex::new(connection)),
        }
    }

    /// Opens a SQLite database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| GatewayError::execution("Failed to open database", e))?;
        Ok(SharedConnection::new(conn))
    }

    /// Opens a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| GatewayError::execution("Failed to open database", e))?;
        Ok(SharedConnection::new(conn))
    }

    /// Locks the connection for the duration of one statement
    ///
    /// # Returns
    ///
    /// The guard on success, `GatewayError::Connection` if a previous holder
    /// panicked while holding the lock.
    pub fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.inner
            .lock()
            .map_err(|_| GatewayError::Connection("Failed to acquire database lock".to_string()))
    }

    /// Whether two handles share the same underlying connection
    pub fn same_as(&self, other: &SharedConnection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Process-wide default connection
///
/// Gateways constructed without an explicit connection clone whatever this
/// slot holds at construction time. Last write wins.
static DEFAULT_CONNECTION: OnceCell<Mutex<Option<SharedConnection>>> = OnceCell::new();

fn default_slot() -> &'static Mutex<Option<SharedConnection>> {
    DEFAULT_CONNECTION.get_or_init(|| Mutex::new(None))
}

/// Publishes `connection` as the process-wide default
pub fn set_shared_connection(connection: SharedConnection) {
    // A poisoned slot still holds a valid Option; take it over.
    let mut guard = default_slot()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(connection);
    info!("Shared connection updated");
}

/// Returns a clone of the process-wide default, if one was set
pub fn shared_connection() -> Option<SharedConnection> {
    default_slot()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Empties the process-wide default
///
/// Gateways already constructed keep their own handle.
pub fn clear_shared_connection() {
    let mut guard = default_slot()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = None;
}

/// Opens a connection as described by `config`
///
/// # Arguments
///
/// * `config` - Database section of the configuration; `path` may be `":memory:"`
///
/// # Returns
///
/// The opened handle, with `PRAGMA foreign_keys` applied and, for file
/// databases, the configured journal mode.
pub fn connect(config: &DatabaseConfig) -> Result<SharedConnection> {
    let in_memory = config.path == ":memory:";
    let conn = if in_memory {
        Connection::open_in_memory()
    } else {
        Connection::open(&config.path)
    }
    .map_err(|e| GatewayError::execution("Failed to open database", e))?;

    conn.pragma_update(None, "foreign_keys", config.foreign_keys)
        .map_err(|e| GatewayError::execution("Failed to apply pragmas", e))?;

    if let (Some(mode), false) = (&config.journal_mode, in_memory) {
        let mode = mode.to_uppercase();
        if !JOURNAL_MODES.contains(&mode.as_str()) {
            return Err(GatewayError::Config(format!("Unknown journal mode: {}", mode)));
        }
        conn.execute_batch(&format!("PRAGMA journal_mode = {};", mode))
            .map_err(|e| GatewayError::execution("Failed to apply pragmas", e))?;
    }

    info!("Opened database {}", config.path);
    Ok(SharedConnection::new(conn))
}
