/// sqlcat Error Module
///
/// This module defines the error types used across the crate. It provides
/// structured error handling with proper error propagation and
/// user-friendly error messages.
use thiserror::Error;

/// Error type for catalog and connector operations.
///
/// This enum covers the error scenarios that can occur within sqlcat:
/// - Database driver failures surfaced by a connector
/// - Query/programming errors during command execution
/// - Value errors from table-info lookups
/// - Configuration loading and validation
/// - File system operations during discovery and description caching
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Database-related errors from the bundled SQLite connector
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Query/programming errors raised while executing a command
    #[error("Query error: {0}")]
    Query(String),

    /// Value errors from table-info lookups
    #[error("Value error: {0}")]
    Value(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic application errors for unexpected conditions
    #[error("Application error: {0}")]
    App(String),
}

/// Type alias for Result to use CatalogError as the error type.
///
/// This provides a consistent error type across the entire crate
/// instead of using `Result<T, String>` or mixed error types.
pub type Result<T> = std::result::Result<T, CatalogError>;
