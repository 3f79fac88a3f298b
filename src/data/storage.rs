//! Storage layer for reading the catalog files.
//!
//! Catalog layout on disk:
//! - `<data dir>/boards.json`: JSON array of board objects
//! - `<data dir>/components.json`: JSON array of component objects
//!
//! Both files are read once, in full, and never written.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::LoadError;
use super::models::{BoardRecord, Catalog, ComponentRecord};

pub const BOARDS_FILE: &str = "boards.json";
pub const COMPONENTS_FILE: &str = "components.json";

/// Locations of the two catalog files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPaths {
    pub boards: PathBuf,
    pub components: PathBuf,
}

impl CatalogPaths {
    /// Standard file names inside `data_dir`
    pub fn in_dir(data_dir: &Path) -> Self {
        CatalogPaths {
            boards: data_dir.join(BOARDS_FILE),
            components: data_dir.join(COMPONENTS_FILE),
        }
    }
}

/// Read-only access to the catalog files
pub struct Storage {
    paths: CatalogPaths,
}

impl Storage {
    pub fn new(paths: CatalogPaths) -> Self {
        Storage { paths }
    }

    /// Load both sequences in source order. Any failure aborts the whole load.
    pub fn load_catalog(&self) -> Result<Catalog, LoadError> {
        let boards: Vec<BoardRecord> = read_records(&self.paths.boards)?;
        let components: Vec<ComponentRecord> = read_records(&self.paths.components)?;

        tracing::info!(
            boards = boards.len(),
            components = components.len(),
            "catalog loaded"
        );

        Ok(Catalog::new(boards, components))
    }
}

/// Read a JSON array of records from `path`
fn read_records<T: DeserializeOwned + Default>(path: &Path) -> Result<Vec<T>, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| LoadError::from_io(path, e))?;
    parse_records(path, &contents)
}

/// Only the top-level array is required. An element that is not a record
/// becomes an empty one, so its row still exists and fails when displayed.
fn parse_records<T: DeserializeOwned + Default>(
    path: &Path,
    contents: &str,
) -> Result<Vec<T>, LoadError> {
    let values: Vec<Value> = serde_json::from_str(contents).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), index, %err, "unreadable record");
                T::default()
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ItemKind;

    fn write_catalog(dir: &Path, boards: &str, components: &str) {
        std::fs::write(dir.join(BOARDS_FILE), boards).unwrap();
        std::fs::write(dir.join(COMPONENTS_FILE), components).unwrap();
    }

    #[test]
    fn test_load_preserves_source_order() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"[{"name": "Zeta", "description": "z"}, {"name": "Alpha", "description": "a"}]"#,
            r#"[{"name": "LED", "description": "Light-emitting diode",
                 "wiring_image": "img/led_wire.png", "connections": "Anode to GPIO17"}]"#,
        );

        let catalog = Storage::new(CatalogPaths::in_dir(dir.path()))
            .load_catalog()
            .unwrap();
        assert_eq!(catalog.boards.len(), 2);
        assert_eq!(catalog.boards[0].name.as_deref(), Some("Zeta"));
        assert_eq!(catalog.boards[1].name.as_deref(), Some("Alpha"));
        assert_eq!(
            catalog.components[0].wiring_image.as_deref(),
            Some("img/led_wire.png")
        );
    }

    #[test]
    fn test_missing_fields_load_fine() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), r#"[{"notes": "no name here"}]"#, "[]");

        let catalog = Storage::new(CatalogPaths::in_dir(dir.path()))
            .load_catalog()
            .unwrap();
        assert_eq!(catalog.boards[0].name, None);
        assert!(catalog.components.is_empty());
    }

    #[test]
    fn test_mistyped_field_does_not_block_other_records() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            r#"[{"name":"Uno","description":"ok"},{"name":"Mega","description":"d","notes":42}]"#,
            "[]",
        );

        let catalog = Storage::new(CatalogPaths::in_dir(dir.path()))
            .load_catalog()
            .unwrap();
        assert_eq!(catalog.labels(ItemKind::Board), vec!["Uno", "Mega"]);
        let mega = catalog.item(ItemKind::Board, 1).unwrap();
        assert_eq!(mega.notes(), "42");
    }

    #[test]
    fn test_non_object_record_becomes_empty_row() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            "[]",
            r#"[{"name":"LED","description":"d"}, "not a record", 7]"#,
        );

        let catalog = Storage::new(CatalogPaths::in_dir(dir.path()))
            .load_catalog()
            .unwrap();
        assert_eq!(catalog.components.len(), 3);
        assert_eq!(catalog.components[1], ComponentRecord::default());
        assert_eq!(
            catalog.labels(ItemKind::Component),
            vec!["LED", "(unnamed)", "(unnamed)"]
        );
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(BOARDS_FILE), "[]").unwrap();

        let err = Storage::new(CatalogPaths::in_dir(dir.path()))
            .load_catalog()
            .unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(err.path(), dir.path().join(COMPONENTS_FILE));
    }

    #[test]
    fn test_invalid_json_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), "[{\"name\": ", "[]");

        let err = Storage::new(CatalogPaths::in_dir(dir.path()))
            .load_catalog()
            .unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn test_non_array_document_is_rejected() {
        let path = Path::new("boards.json");
        let result: Result<Vec<BoardRecord>, _> = parse_records(path, r#"{"name": "Uno"}"#);
        assert!(matches!(result, Err(LoadError::Json { .. })));
    }
}
