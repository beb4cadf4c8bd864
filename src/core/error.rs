/// Gateway Error Module
///
/// This module defines the error type shared by every gateway operation.
/// Driver failures keep the underlying `rusqlite::Error` as their source so
/// callers can inspect it, while the `Display` text is what gets recorded as
/// a gateway's last error.
use thiserror::Error;

/// Error type for all table gateway operations.
///
/// - Construction and configuration problems
/// - Driver failures while preparing or executing a statement
/// - Identity values that do not carry the primary-key field
/// - Connection lock and file system problems
#[derive(Error, Debug)]
pub enum GatewayError {
    /// No connection could be resolved, or a configuration file is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any failure reported by SQLite while preparing or running a statement
    #[error("Execution error: {message}")]
    Execution {
        message: String,
        #[source]
        source: rusqlite::Error,
    },

    /// A record identity without the gateway's primary-key field
    #[error("Identity record has no `{field}` field")]
    MissingKey { field: String },

    /// An update without any field to set
    #[error("Nothing to update in table `{table}`")]
    EmptyUpdate { table: String },

    /// Connection lock problems
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GatewayError {
    /// Wraps a driver error with a short description of the failing step.
    pub fn execution(context: &str, source: rusqlite::Error) -> Self {
        GatewayError::Execution {
            message: format!("{}: {}", context, source),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let exec_err = GatewayError::execution(
            "Query execution failed",
            rusqlite::Error::ExecuteReturnedResults,
        );
        assert!(exec_err.to_string().starts_with("Execution error: Query execution failed"));
        assert!(exec_err.source().is_some());

        let config_err = GatewayError::Config("no connection".to_string());
        assert!(config_err.to_string().contains("Configuration error"));

        let key_err = GatewayError::MissingKey { field: "id".to_string() };
        assert_eq!(key_err.to_string(), "Identity record has no `id` field");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let gateway_err: GatewayError = io_err.into();
        match gateway_err {
            GatewayError::Io(_) => {}
            _ => panic!("Expected IO error"),
        }

        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let gateway_err: GatewayError = json_err.into();
        match gateway_err {
            GatewayError::Json(_) => {}
            _ => panic!("Expected JSON error"),
        }
    }
}
