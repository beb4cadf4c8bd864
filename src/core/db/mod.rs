/// Database Module
///
/// This module provides the SQLite plumbing used by table gateways,
/// organized into focused submodules.
///
/// ## Architecture
///
/// - **Connection Management** (`connection.rs`): shared connection handle, process-wide default, opening from config
/// - **Statement Building** (`statement.rs`): parameterized INSERT/SELECT/UPDATE/DELETE text
/// - **Query Execution** (`query.rs`): binding, execution, and row materialization
///
/// ## Error Handling
///
/// All database operations use the standardized `GatewayError` type for consistent error propagation.
pub mod connection;
pub mod query;
pub mod statement;

pub use connection::*;
