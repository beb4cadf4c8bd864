/// Core Module for tablegate
///
/// Shared infrastructure beneath the table gateway: connection handling,
/// statement building, query execution, and the crate-wide error type.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{GatewayError, Result};
