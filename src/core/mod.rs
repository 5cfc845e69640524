/// Core Module for sqlcat
///
/// This module contains the shared infrastructure for the crate:
/// error handling and the common Result alias used by the catalog,
/// the connector layer, and configuration loading.

pub mod error;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
