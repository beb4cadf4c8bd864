/// Query Execution Module
///
/// This module runs gateway statements against a connection: it prepares the
/// SQL, binds named parameters, and materializes result rows as records.

use crate::core::db::statement::Statement;
use crate::core::{GatewayError, Result};
use crate::record::Record;
use rusqlite::types::{ToSql, Value};
use rusqlite::{Connection, Row};
use tracing::debug;

/// Pairs each placeholder of `stmt` with the value at the same position
fn bind<'a>(stmt: &'a Statement, values: &[&'a Value]) -> Vec<(&'a str, &'a dyn ToSql)> {
    stmt.params
        .iter()
        .map(String::as_str)
        .zip(values.iter().map(|v| *v as &dyn ToSql))
        .collect()
}

/// Executes a statement that returns no rows
///
/// # Arguments
///
/// * `conn` - Connection to run the statement on
/// * `stmt` - Statement built by the `statement` module
/// * `values` - One value per placeholder of `stmt`, in the same order
///
/// # Returns
///
/// The number of rows changed.
pub fn execute(conn: &Connection, stmt: &Statement, values: &[&Value]) -> Result<usize> {
    debug!("execute: {}", stmt.sql);
    let mut prepared = conn
        .prepare(&stmt.sql)
        .map_err(|e| GatewayError::execution("Failed to prepare statement", e))?;
    prepared
        .execute(bind(stmt, values).as_slice())
        .map_err(|e| GatewayError::execution("Statement execution failed", e))
}

fn column_names(prepared: &rusqlite::Statement<'_>) -> Vec<String> {
    prepared.column_names().into_iter().map(String::from).collect()
}

fn row_to_record(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<Record> {
    let mut record = Record::new();
    for (i, column) in columns.iter().enumerate() {
        record.set_field(column, row.get::<_, Value>(i)?);
    }
    Ok(record)
}

/// Executes a query and collects every row
pub fn fetch_all(conn: &Connection, stmt: &Statement, values: &[&Value]) -> Result<Vec<Record>> {
    debug!("fetch_all: {}", stmt.sql);
    let mut prepared = conn
        .prepare(&stmt.sql)
        .map_err(|e| GatewayError::execution("Failed to prepare statement", e))?;
    let columns = column_names(&prepared);

    let rows = prepared
        .query_map(bind(stmt, values).as_slice(), |row| row_to_record(row, &columns))
        .map_err(|e| GatewayError::execution("Query execution failed", e))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| GatewayError::execution("Result processing failed", e))?;

    Ok(rows)
}

/// Executes a query and returns its first row, if any
///
/// Stops stepping after the first row; later rows are never produced.
pub fn fetch_optional(conn: &Connection, stmt: &Statement, values: &[&Value]) -> Result<Option<Record>> {
    debug!("fetch_optional: {}", stmt.sql);
    let mut prepared = conn
        .prepare(&stmt.sql)
        .map_err(|e| GatewayError::execution("Failed to prepare statement", e))?;
    let columns = column_names(&prepared);

    let mut rows = prepared
        .query(bind(stmt, values).as_slice())
        .map_err(|e| GatewayError::execution("Query execution failed", e))?;

    match rows
        .next()
        .map_err(|e| GatewayError::execution("Query execution failed", e))?
    {
        Some(row) => row_to_record(row, &columns)
            .map(Some)
            .map_err(|e| GatewayError::execution("Result processing failed", e)),
        None => Ok(None),
    }
}

/// Rowid generated by the most recent successful insert on `conn`
pub fn last_insert_id(conn: &Connection) -> Value {
    Value::Integer(conn.last_insert_rowid())
}
