//! Table gateway: create/read/update/delete against one table.
//!
//! A [`TableGateway`] is bound to a table and its primary-key column and owns
//! a clone of a [`SharedConnection`]. Every operation issues exactly one
//! parameterized statement, returns a `Result`, and mirrors its failure
//! message into [`TableGateway::last_error`]. The mirror is cleared at the
//! start of every call.

use crate::core::db::{self, query, statement, SharedConnection};
use crate::core::{GatewayError, Result};
use crate::identity::Identity;
use crate::record::Record;
use rusqlite::types::Value;
use std::sync::Mutex;
use tracing::{debug, warn};

/// Primary-key column used when none is given
pub const DEFAULT_ID_FIELD: &str = "id";

/// Outcome of [`TableGateway::read`]
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// Every row of the table, in result order
    All(Vec<Record>),
    /// The row matching a key, if any
    One(Option<Record>),
}

impl Fetched {
    /// Flattens either shape into a list of rows
    pub fn into_rows(self) -> Vec<Record> {
        match self {
            Fetched::All(rows) => rows,
            Fetched::One(row) => row.into_iter().collect(),
        }
    }
}

#[derive(Debug)]
pub struct TableGateway {
    table: String,
    id_field: String,
    connection: SharedConnection,
    last_error: Mutex<Option<String>>,
}

impl TableGateway {
    /// Binds to `table` keyed on `id`, using the process-wide connection
    pub fn new(table: &str) -> Result<Self> {
        Self::open(table, DEFAULT_ID_FIELD, None)
    }

    /// Binds to `table` keyed on `id_field`, using the process-wide connection
    pub fn with_id_field(table: &str, id_field: &str) -> Result<Self> {
        Self::open(table, id_field, None)
    }

    /// Binds to `table` with an explicit connection
    ///
    /// The connection is also published as the process-wide default.
    pub fn with_connection(table: &str, id_field: &str, connection: SharedConnection) -> Self {
        db::set_shared_connection(connection.clone());
        Self::bind(table, id_field, connection)
    }

    /// General constructor
    ///
    /// # Arguments
    ///
    /// * `table` - Table every operation targets
    /// * `id_field` - Primary-key column used by keyed operations
    /// * `connection` - Explicit connection; when `None` the process-wide default is cloned
    ///
    /// # Errors
    ///
    /// `GatewayError::Config` when no connection is given and none was shared.
    pub fn open(table: &str, id_field: &str, connection: Option<SharedConnection>) -> Result<Self> {
        match connection {
            Some(connection) => Ok(Self::with_connection(table, id_field, connection)),
            None => {
                let connection = db::shared_connection().ok_or_else(|| {
                    GatewayError::Config(format!(
                        "No database connection available for table `{}`; pass one or call set_shared_connection first",
                        table
                    ))
                })?;
                Ok(Self::bind(table, id_field, connection))
            }
        }
    }

    fn bind(table: &str, id_field: &str, connection: SharedConnection) -> Self {
        debug!("Gateway bound to {}.{}", table, id_field);
        TableGateway {
            table: table.to_string(),
            id_field: id_field.to_string(),
            connection,
            last_error: Mutex::new(None),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn connection(&self) -> &SharedConnection {
        &self.connection
    }

    /// Message of the most recent failure, if the last call failed
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_last_error(&self, message: Option<String>) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = message;
    }

    /// Clears the last error, runs `op`, and records its failure if any
    fn track<T>(&self, op: &str, f: impl FnOnce() -> Result<T>) -> Result<T> {
        self.set_last_error(None);
        f().map_err(|err| {
            warn!("{} on `{}` failed: {}", op, self.table, err);
            self.set_last_error(Some(err.to_string()));
            err
        })
    }

    /// Inserts `data` as a new row
    ///
    /// # Returns
    ///
    /// The rowid SQLite generated for the new row.
    pub fn create(&self, data: &Record) -> Result<Value> {
        self.track("create", || {
            let stmt = statement::insert(&self.table, data.keys());
            let values: Vec<&Value> = data.values().collect();

            let conn = self.connection.lock()?;
            query::execute(&conn, &stmt, &values)?;
            Ok(query::last_insert_id(&conn))
        })
    }

    /// Reads every row when `identity` is `None`, otherwise the row whose
    /// id field equals the identity's key
    pub fn read(&self, identity: Option<&Identity>) -> Result<Fetched> {
        self.track("read", || match identity {
            None => self.fetch_all().map(Fetched::All),
            Some(identity) => self.fetch_one(identity).map(Fetched::One),
        })
    }

    /// Every row of the table
    pub fn all(&self) -> Result<Vec<Record>> {
        self.track("read", || self.fetch_all())
    }

    /// The row matching `identity`, or `None`
    pub fn find(&self, identity: impl Into<Identity>) -> Result<Option<Record>> {
        let identity = identity.into();
        self.track("read", || self.fetch_one(&identity))
    }

    fn fetch_all(&self) -> Result<Vec<Record>> {
        let conn = self.connection.lock()?;
        query::fetch_all(&conn, &statement::select_all(&self.table), &[])
    }

    fn fetch_one(&self, identity: &Identity) -> Result<Option<Record>> {
        let key = identity.key_for(&self.id_field)?;
        let stmt = statement::select_by_key(&self.table, &self.id_field);

        let conn = self.connection.lock()?;
        query::fetch_optional(&conn, &stmt, &[key])
    }

    /// Sets the fields of `data` on the row matching `identity`
    ///
    /// Returns `true` once the statement ran, whether or not a row matched.
    pub fn update(&self, identity: impl Into<Identity>, data: &Record) -> Result<bool> {
        self.update_counted(identity, data).map(|_| true)
    }

    /// Like [`TableGateway::update`] but returns the number of rows changed
    pub fn update_counted(&self, identity: impl Into<Identity>, data: &Record) -> Result<usize> {
        let identity = identity.into();
        self.track("update", || {
            if data.is_empty() {
                return Err(GatewayError::EmptyUpdate {
                    table: self.table.clone(),
                });
            }
            let key = identity.key_for(&self.id_field)?;
            let stmt = statement::update(&self.table, &self.id_field, data.keys());
            let mut values: Vec<&Value> = data.values().collect();
            values.push(key);

            let conn = self.connection.lock()?;
            query::execute(&conn, &stmt, &values)
        })
    }

    /// Deletes the row matching `identity`
    ///
    /// Returns `true` once the statement ran, so repeating a delete succeeds.
    pub fn delete(&self, identity: impl Into<Identity>) -> Result<bool> {
        let identity = identity.into();
        self.track("delete", || {
            let key = identity.key_for(&self.id_field)?;
            let stmt = statement::delete(&self.table, &self.id_field);

            let conn = self.connection.lock()?;
            query::execute(&conn, &stmt, &[key])?;
            Ok(true)
        })
    }

    /// Reads `related_table` keyed on `foreign_key_field` over this gateway's
    /// connection
    ///
    /// Same result as binding a gateway to `related_table`/`foreign_key_field`
    /// and calling [`TableGateway::read`]. Only the first matching row comes
    /// back for a keyed lookup.
    pub fn refer(
        &self,
        related_table: &str,
        foreign_key_field: &str,
        identity: Option<&Identity>,
    ) -> Result<Fetched> {
        self.track("refer", || {
            let related = TableGateway::bind(related_table, foreign_key_field, self.connection.clone());
            related.read(identity)
        })
    }
}
