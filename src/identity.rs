//! Identity values accepted by keyed gateway operations.
//!
//! An identity is either the primary-key value itself or a record that
//! carries it under the gateway's id field. Structs can take part by
//! converting themselves into a [`Record`].

use crate::core::{GatewayError, Result};
use crate::record::Record;
use rusqlite::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Identity {
    /// The primary-key value.
    Key(Value),
    /// A record holding the primary-key value under the id field.
    Record(Record),
}

impl Identity {
    /// Resolves the primary-key value for a table keyed on `id_field`.
    pub fn key_for(&self, id_field: &str) -> Result<&Value> {
        match self {
            Identity::Key(value) => Ok(value),
            Identity::Record(record) => {
                record
                    .get_field(id_field)
                    .ok_or_else(|| GatewayError::MissingKey {
                        field: id_field.to_string(),
                    })
            }
        }
    }
}

impl From<Value> for Identity {
    fn from(value: Value) -> Self {
        Identity::Key(value)
    }
}

impl From<Record> for Identity {
    fn from(record: Record) -> Self {
        Identity::Record(record)
    }
}

impl From<&Record> for Identity {
    fn from(record: &Record) -> Self {
        Identity::Record(record.clone())
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Identity::Key(Value::Integer(id))
    }
}

impl From<i32> for Identity {
    fn from(id: i32) -> Self {
        Identity::Key(Value::Integer(i64::from(id)))
    }
}

impl From<&str> for Identity {
    fn from(id: &str) -> Self {
        Identity::Key(Value::Text(id.to_string()))
    }
}

impl From<String> for Identity {
    fn from(id: String) -> Self {
        Identity::Key(Value::Text(id))
    }
}
