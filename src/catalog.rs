/// Schema Catalog Module
///
/// This module provides `SchemaCatalog`, a thin wrapper that discovers
/// table names from `*.txt` files on disk, caches per-table description
/// text from a schema directory, and forwards command execution to an
/// externally supplied `Connector`.
///
/// Discovery, filtering, and description caching all happen once at
/// construction; the catalog is read-only afterwards, so sharing `&self`
/// across threads after construction is safe.

use crate::config::Config;
use crate::connector::Connector;
use crate::core::{CatalogError, Result};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// A catalog of table names and their file-backed descriptions.
///
/// Construction eagerly scans a discovery root for `*.txt` files (each base
/// name is a candidate table name), optionally intersects with an explicit
/// include-list, and caches `<schema_dir>/<table>.txt` contents per table.
/// The cache's key set is exactly the retained table-name set and never
/// changes after construction.
pub struct SchemaCatalog {
    connector: Box<dyn Connector>,
    schema_dir: PathBuf,
    dialect: &'static str,
    table_names: BTreeSet<String>,
    table_info_map: HashMap<String, String>,
}

impl SchemaCatalog {
    /// Builds a catalog by scanning the current working directory.
    ///
    /// Equivalent to `with_discovery_root` rooted at `"."`. The discovered
    /// names therefore depend on where the process is run from; prefer the
    /// explicit-root constructor when that ambient state is undesirable.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the scan or a description read fails.
    pub fn new(
        connector: Box<dyn Connector>,
        schema_dir: &str,
        include_tables: Option<&[String]>,
    ) -> Result<Self> {
        Self::with_discovery_root(connector, Path::new("."), schema_dir, include_tables)
    }

    /// Builds a catalog with an explicit discovery root.
    ///
    /// # Arguments
    ///
    /// * `connector` - External command executor; stored as-is.
    /// * `discovery_root` - Directory tree scanned recursively for `*.txt`
    ///   files whose base names become candidate table names.
    /// * `schema_dir` - Directory holding `<table>.txt` description files;
    ///   a leading `~` is expanded to the user's home directory.
    /// * `include_tables` - When present and non-empty, restricts the
    ///   discovered set to this subset (set intersection; order and
    ///   duplicates are dropped). An empty list behaves like no list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if directory traversal fails or a
    /// description file exists but cannot be read.
    pub fn with_discovery_root(
        connector: Box<dyn Connector>,
        discovery_root: &Path,
        schema_dir: &str,
        include_tables: Option<&[String]>,
    ) -> Result<Self> {
        let schema_dir = expand_user(schema_dir);

        let discovered = discover_table_names(discovery_root)?;
        let table_names: BTreeSet<String> = match include_tables {
            Some(include) if !include.is_empty() => {
                let include: BTreeSet<&str> = include.iter().map(String::as_str).collect();
                discovered
                    .into_iter()
                    .filter(|name| include.contains(name.as_str()))
                    .collect()
            }
            _ => discovered,
        };

        let mut table_info_map = HashMap::with_capacity(table_names.len());
        for name in &table_names {
            let path = schema_dir.join(format!("{}.txt", name));
            table_info_map.insert(name.clone(), read_info(&path)?);
        }
        debug!(
            "catalog built: {} tables, schema dir {:?}",
            table_names.len(),
            schema_dir
        );

        Ok(SchemaCatalog {
            connector,
            schema_dir,
            dialect: "MySQL",
            table_names,
            table_info_map,
        })
    }

    /// Builds a catalog from a loaded configuration.
    ///
    /// Uses the configured discovery root when present, otherwise the
    /// current working directory.
    pub fn from_config(connector: Box<dyn Connector>, config: &Config) -> Result<Self> {
        let root = config
            .catalog
            .discovery_root
            .as_deref()
            .map(expand_user)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_discovery_root(
            connector,
            &root,
            &config.catalog.schema_dir,
            config.catalog.include_tables.as_deref(),
        )
    }

    /// The fixed dialect label. Not inferred from the connector.
    pub fn dialect(&self) -> &'static str {
        self.dialect
    }

    /// The home-expanded schema directory configured at construction.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the names of the tables retained at construction.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.table_names.iter().map(String::as_str)
    }

    /// Returns the cached descriptions for the given tables, joined by a
    /// blank line (exactly two newline characters) in the order given.
    ///
    /// Names absent from the cache contribute an empty string at their
    /// position rather than failing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::App` when no table list is supplied. The
    /// parameter is nominally optional but every caller must pass one;
    /// callers wanting "all tables" should pass the result of
    /// `table_names` explicitly.
    pub fn get_table_info(&self, table_names: Option<&[String]>) -> Result<String> {
        let names = table_names.ok_or_else(|| {
            CatalogError::App("get_table_info requires an explicit table list".to_string())
        })?;
        let info: Vec<&str> = names
            .iter()
            .map(|name| {
                self.table_info_map
                    .get(name)
                    .map(String::as_str)
                    .unwrap_or("")
            })
            .collect();
        Ok(info.join("\n\n"))
    }

    /// Information about all tables, property form.
    ///
    /// Delegates to `get_table_info` with no list and therefore always
    /// fails with `CatalogError::App`. Kept for interface compatibility
    /// with the accessor it mirrors; see `get_table_info`.
    pub fn table_info(&self) -> Result<String> {
        self.get_table_info(None)
    }

    /// Forwards `command` to the connector and returns its result verbatim.
    ///
    /// `extra_args` are accepted for call-site compatibility but are never
    /// forwarded to the connector. The command string is not validated or
    /// sanitized here; the connector owns execution semantics.
    pub fn run(&self, command: &str, _extra_args: &[&str]) -> Result<String> {
        debug!("forwarding command to connector: {}", command);
        self.connector.execute(command)
    }

    /// Like `get_table_info`, but converts a value error into an
    /// `"Error: ..."` string instead of propagating it. All other error
    /// kinds (including the missing-list error) propagate unchanged.
    pub fn get_table_info_no_throw(&self, table_names: Option<&[String]>) -> Result<String> {
        match self.get_table_info(table_names) {
            Err(err @ CatalogError::Value(_)) => Ok(format!("Error: {}", err)),
            other => other,
        }
    }

    /// Like `run`, but converts a query/programming error from the
    /// connector into an `"Error: ..."` string instead of propagating it.
    /// All other error kinds propagate unchanged.
    pub fn run_no_throw(&self, command: &str, extra_args: &[&str]) -> Result<String> {
        match self.run(command, extra_args) {
            Err(err @ (CatalogError::Query(_) | CatalogError::Database(_))) => {
                Ok(format!("Error: {}", err))
            }
            other => other,
        }
    }
}

/// Recursively collects the unique base names of `*.txt` files under `root`.
fn discover_table_names(root: &Path) -> Result<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| CatalogError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().map_or(false, |ext| ext == "txt") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }
    }
    Ok(names)
}

/// Reads a description file as UTF-8, or returns an empty string when the
/// file does not exist. Read failures on existing files propagate.
fn read_info(path: &Path) -> Result<String> {
    if path.is_file() {
        Ok(fs::read_to_string(path)?)
    } else {
        Ok(String::new())
    }
}

/// Expands a leading `~` or `~/` to the user's home directory.
///
/// Paths without the shorthand, and `~user` forms, are returned unchanged.
pub(crate) fn expand_user(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}
