/// Connector Module
///
/// This module defines the capability interface the catalog forwards
/// commands to, plus a SQLite-backed implementation. The catalog never
/// inspects or validates command strings; execution semantics and safety
/// belong entirely to the connector.

use crate::catalog::expand_user;
use crate::config::Config;
use crate::core::{CatalogError, Result};
use rusqlite::{types::ValueRef, Connection};
use std::path::Path;
use tracing::debug;

/// Minimal capability contract for executing a command against a data store.
///
/// Implementations run the command string and return a display-ready string
/// result. Driver failures should surface as `CatalogError::Query` (or
/// `CatalogError::Database`) so that `SchemaCatalog::run_no_throw` can
/// recognize and stringify them.
pub trait Connector {
    /// Executes a command and returns its result as a string.
    fn execute(&self, command: &str) -> Result<String>;
}

/// A connector backed by an in-process SQLite connection.
pub struct SqliteConnector {
    connection: Connection,
}

impl SqliteConnector {
    /// Opens a connector for the SQLite database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Database` if the database cannot be opened.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let connection = Connection::open(db_path)?;
        Ok(SqliteConnector { connection })
    }

    /// Opens a connector over an in-memory database. Mostly useful in tests.
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Ok(SqliteConnector { connection })
    }

    /// Opens a connector from the `[database]` section of a loaded
    /// configuration. A leading `~` in the configured path is expanded;
    /// when no path is configured the connector falls back to an
    /// in-memory database.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.database.as_ref().and_then(|db| db.path.as_deref()) {
            Some(path) => Self::open(expand_user(path)),
            None => Self::open_in_memory(),
        }
    }
}

impl Connector for SqliteConnector {
    /// Executes a SQL command and returns formatted results.
    ///
    /// Result rows are rendered one per line with tab-separated values.
    /// Statements that produce no result columns (INSERT, CREATE, ...)
    /// report the number of affected rows instead.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Query` if the command cannot be prepared or
    /// executed.
    fn execute(&self, command: &str) -> Result<String> {
        debug!("executing command: {}", command);
        let mut stmt = self
            .connection
            .prepare(command)
            .map_err(|e| CatalogError::Query(format!("Failed to prepare statement: {}", e)))?;

        let column_count = stmt.column_count();
        if column_count == 0 {
            let affected = stmt
                .execute([])
                .map_err(|e| CatalogError::Query(format!("Command execution failed: {}", e)))?;
            return Ok(format!("{} row(s) affected", affected));
        }

        let rows = stmt
            .query_map([], |row| {
                let mut values = Vec::new();
                for i in 0..column_count {
                    let value_ref = row.get_ref(i)?;
                    values.push(format_value(value_ref));
                }
                Ok(values.join("\t"))
            })
            .map_err(|e| CatalogError::Query(format!("Query execution failed: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Query(format!("Result processing failed: {}", e)))?;

        Ok(rows.join("\n"))
    }
}

/// Formats a SQLite value for display
fn format_value(value: ValueRef) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(t) => String::from_utf8_lossy(t).to_string(),
        ValueRef::Blob(b) => format!("<BLOB: {} bytes>", b.len()),
    }
}
