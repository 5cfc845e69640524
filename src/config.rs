use crate::core::{CatalogError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub database: Option<DatabaseConfig>,
}

/// Catalog construction settings.
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// Directory holding per-table description files; `~` is expanded.
    pub schema_dir: String,
    /// Optional subset of table names to retain from discovery.
    pub include_tables: Option<Vec<String>>,
    /// Root of the discovery scan; defaults to the working directory.
    pub discovery_root: Option<String>,
}

/// Settings for the bundled SQLite connector.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file; `:memory:` works too.
    pub path: Option<String>,
}

/// Loads configuration from a TOML file at the given path.
///
/// # Arguments
///
/// * `path` - The file path to the TOML configuration file.
///
/// # Errors
///
/// Returns `CatalogError::Config` if the file cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| CatalogError::Config(e.to_string()))?;
    toml::from_str(&content).map_err(|e| CatalogError::Config(e.to_string()))
}
