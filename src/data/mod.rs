//! Data layer for the board/component catalog.
//!
//! Handles loading the two catalog files and the record types they contain.

mod error;
mod models;
mod storage;

pub use error::{LoadError, MissingFieldError};
pub use models::{BoardRecord, Catalog, CatalogItem, ComponentRecord, ItemKind};
pub use storage::{CatalogPaths, Storage};
