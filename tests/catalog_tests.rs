//! Integration tests for catalog construction and command passthrough,
//! exercised end-to-end against on-disk fixtures and the bundled SQLite
//! connector.

use sqlcat::config;
use sqlcat::connector::{Connector, SqliteConnector};
use sqlcat::core::{CatalogError, Result};
use sqlcat::SchemaCatalog;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

/// Schema directory with two described tables, per the canonical scenario:
/// `orders.txt` and `users.txt` holding their table descriptions.
fn schema_fixture() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "orders.txt", "orders table");
    write_file(tmp.path(), "users.txt", "users table");
    tmp
}

fn sqlite() -> Box<dyn Connector> {
    Box::new(SqliteConnector::open_in_memory().unwrap())
}

#[test]
fn include_list_restricts_catalog_to_named_tables() {
    let tmp = schema_fixture();
    let include = vec!["orders".to_string()];
    let catalog = SchemaCatalog::with_discovery_root(
        sqlite(),
        tmp.path(),
        tmp.path().to_str().unwrap(),
        Some(&include),
    )
    .unwrap();

    let names: Vec<&str> = catalog.table_names().collect();
    assert_eq!(names, vec!["orders"]);
    assert_eq!(
        catalog.get_table_info(Some(&include)).unwrap(),
        "orders table"
    );
}

#[test]
fn full_discovery_retains_all_tables() {
    let tmp = schema_fixture();
    let catalog = SchemaCatalog::with_discovery_root(
        sqlite(),
        tmp.path(),
        tmp.path().to_str().unwrap(),
        None,
    )
    .unwrap();

    let names: Vec<&str> = catalog.table_names().collect();
    assert_eq!(names, vec!["orders", "users"]);

    let both = vec!["orders".to_string(), "users".to_string()];
    assert_eq!(
        catalog.get_table_info(Some(&both)).unwrap(),
        "orders table\n\nusers table"
    );
}

#[test]
fn missing_description_file_caches_empty_string() {
    let tmp = TempDir::new().unwrap();
    write_file(tmp.path(), "orders.txt", "orders table");
    // Discovery sees orders.txt, but the schema dir is a different,
    // empty directory, so the cached description is empty.
    let schema_dir = TempDir::new().unwrap();

    let catalog = SchemaCatalog::with_discovery_root(
        sqlite(),
        tmp.path(),
        schema_dir.path().to_str().unwrap(),
        None,
    )
    .unwrap();

    let orders = vec!["orders".to_string()];
    assert_eq!(catalog.get_table_info(Some(&orders)).unwrap(), "");
}

#[test]
fn run_executes_through_sqlite_connector() {
    let tmp = schema_fixture();
    let catalog = SchemaCatalog::with_discovery_root(
        sqlite(),
        tmp.path(),
        tmp.path().to_str().unwrap(),
        None,
    )
    .unwrap();

    assert_eq!(catalog.run("SELECT 1", &[]).unwrap(), "1");
    // Extra positional arguments never reach the connector
    assert_eq!(catalog.run("SELECT 1", &["%s", "extra"]).unwrap(), "1");
}

#[test]
fn run_no_throw_converts_sql_errors_to_strings() {
    let tmp = schema_fixture();
    let catalog = SchemaCatalog::with_discovery_root(
        sqlite(),
        tmp.path(),
        tmp.path().to_str().unwrap(),
        None,
    )
    .unwrap();

    let result = catalog
        .run_no_throw("SELECT * FROM nonexistent_table", &[])
        .unwrap();
    assert!(result.starts_with("Error: "));
    assert!(result.contains("no such table"));

    // Plain run propagates the same failure
    match catalog.run("SELECT * FROM nonexistent_table", &[]) {
        Err(CatalogError::Query(_)) => {}
        other => panic!("Expected Query error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn table_info_property_form_always_errors() {
    let tmp = schema_fixture();
    let catalog = SchemaCatalog::with_discovery_root(
        sqlite(),
        tmp.path(),
        tmp.path().to_str().unwrap(),
        None,
    )
    .unwrap();

    match catalog.table_info() {
        Err(CatalogError::App(_)) => {}
        other => panic!("Expected App error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn catalog_from_config_file() {
    let tmp = schema_fixture();
    let config_path = tmp.path().join("sqlcat.toml");
    fs::write(
        &config_path,
        format!(
            "[catalog]\nschema_dir = {dir:?}\ndiscovery_root = {dir:?}\ninclude_tables = [\"users\"]\n\n[database]\npath = {db:?}\n",
            dir = tmp.path().to_str().unwrap(),
            db = tmp.path().join("app.db").to_str().unwrap()
        ),
    )
    .unwrap();

    let config = config::load_config(&config_path).unwrap();
    let connector = Box::new(SqliteConnector::from_config(&config).unwrap());
    let catalog = SchemaCatalog::from_config(connector, &config).unwrap();

    let names: Vec<&str> = catalog.table_names().collect();
    assert_eq!(names, vec!["users"]);
    let users = vec!["users".to_string()];
    assert_eq!(catalog.get_table_info(Some(&users)).unwrap(), "users table");
    assert_eq!(catalog.run("SELECT 1", &[]).unwrap(), "1");
    assert!(tmp.path().join("app.db").is_file());
}

#[test]
fn connector_errors_other_than_query_propagate_through_run_no_throw() {
    struct IoConnector;
    impl Connector for IoConnector {
        fn execute(&self, _command: &str) -> Result<String> {
            Err(CatalogError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "socket closed",
            )))
        }
    }

    let tmp = schema_fixture();
    let catalog = SchemaCatalog::with_discovery_root(
        Box::new(IoConnector),
        tmp.path(),
        tmp.path().to_str().unwrap(),
        None,
    )
    .unwrap();

    match catalog.run_no_throw("SELECT 1", &[]) {
        Err(CatalogError::Io(_)) => {}
        other => panic!("Expected Io error, got {:?}", other.map(|_| ())),
    }
}
