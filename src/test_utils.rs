/// # Test Utilities Module
///
/// Fixtures shared by the unit tests: isolated in-memory databases wrapped
/// in a `SharedConnection`, optionally loaded with a small users/posts schema.

use crate::core::db::SharedConnection;
use crate::core::{GatewayError, Result};
use rusqlite::Connection;

/// Isolated database test fixture
pub struct DatabaseFixture {
    pub name: String,
    pub connection: SharedConnection,
}

impl DatabaseFixture {
    /// Create a new, empty in-memory database
    pub fn new(name: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| GatewayError::execution("Failed to open database", e))?;

        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = MEMORY;
        ",
        )
        .map_err(|e| GatewayError::execution("Failed to apply pragmas", e))?;

        Ok(DatabaseFixture {
            name: name.to_string(),
            connection: SharedConnection::new(conn),
        })
    }

    /// Create fixture with sample data schema
    pub fn with_sample_data(name: &str) -> Result<Self> {
        let fixture = Self::new(name)?;
        fixture.setup_standard_schema()?;
        fixture.populate_sample_data()?;
        Ok(fixture)
    }

    /// Set up standard test schema
    pub fn setup_standard_schema(&self) -> Result<()> {
        self.connection
            .lock()?
            .execute_batch(
                "
                CREATE TABLE users (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    username TEXT NOT NULL UNIQUE,
                    email TEXT NOT NULL UNIQUE,
                    active BOOLEAN DEFAULT TRUE
                );

                CREATE TABLE posts (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    user_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    published BOOLEAN DEFAULT FALSE,
                    FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
                );

                CREATE TABLE categories (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL UNIQUE
                );

                CREATE INDEX idx_posts_user_id ON posts (user_id);
            ",
            )
            .map_err(|e| GatewayError::execution("Failed to create schema", e))
    }

    /// Populate with sample data
    ///
    /// Users 1-3 are alice, bob, charlie. Alice owns posts 1 and 3, bob owns post 2.
    pub fn populate_sample_data(&self) -> Result<()> {
        self.connection
            .lock()?
            .execute_batch(
                "
                INSERT INTO users (username, email) VALUES ('alice', 'alice@example.com');
                INSERT INTO users (username, email) VALUES ('bob', 'bob@example.com');
                INSERT INTO users (username, email) VALUES ('charlie', 'charlie@example.com');

                INSERT INTO categories (name) VALUES ('Technology');
                INSERT INTO categories (name) VALUES ('Travel');

                INSERT INTO posts (user_id, title, published) VALUES (1, 'Welcome to Rust', 1);
                INSERT INTO posts (user_id, title, published) VALUES (2, 'My Trip to Paris', 0);
                INSERT INTO posts (user_id, title, published) VALUES (1, 'Building Terminal UIs', 1);
            ",
            )
            .map_err(|e| GatewayError::execution("Failed to load sample data", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_fixture_creation() {
        let fixture = DatabaseFixture::new("test_create").unwrap();
        assert_eq!(fixture.name, "test_create");
    }

    #[test]
    fn test_sample_data_fixture() {
        let fixture = DatabaseFixture::with_sample_data("test_sample").unwrap();

        let count: i64 = fixture
            .connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .expect("Failed to count users");

        assert_eq!(count, 3);
    }
}
