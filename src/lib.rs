// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod catalog;
pub mod config;
pub mod connector;

pub use catalog::SchemaCatalog;
pub use connector::{Connector, SqliteConnector};
