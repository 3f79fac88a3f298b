//! Data models for the board/component catalog.
//!
//! Every field is optional at the type level: the catalog is not validated
//! on load, so a record without a `name` or `description` only fails when it
//! is displayed (see [`MissingFieldError`]). Text fields accept any JSON
//! value; non-strings are kept as their JSON text.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::MissingFieldError;

/// Label shown in a list for a record that has no `name`
const UNNAMED_LABEL: &str = "(unnamed)";

/// A physical circuit board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
}

/// An electronic part, optionally with a wiring diagram and connection notes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub wiring_image: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub connections: Option<String>,
}

/// Strings as-is, `null` as absent, anything else as its JSON text
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// The two ordered record sequences, immutable after load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub boards: Vec<BoardRecord>,
    pub components: Vec<ComponentRecord>,
}

impl Catalog {
    pub fn new(boards: Vec<BoardRecord>, components: Vec<ComponentRecord>) -> Self {
        Catalog { boards, components }
    }

    /// Record at `index` in the list for `kind`
    pub fn item(&self, kind: ItemKind, index: usize) -> Option<CatalogItem<'_>> {
        match kind {
            ItemKind::Board => self.boards.get(index).map(CatalogItem::Board),
            ItemKind::Component => self.components.get(index).map(CatalogItem::Component),
        }
    }

    /// Number of records in the list for `kind`
    pub fn len(&self, kind: ItemKind) -> usize {
        match kind {
            ItemKind::Board => self.boards.len(),
            ItemKind::Component => self.components.len(),
        }
    }

    /// List labels for `kind`, in source order
    pub fn labels(&self, kind: ItemKind) -> Vec<&str> {
        (0..self.len(kind))
            .filter_map(|i| self.item(kind, i))
            .map(|item| item.label())
            .collect()
    }
}

/// Which list a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Board,
    Component,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Board => "board",
            ItemKind::Component => "component",
        }
    }
}

/// A borrowed record together with its kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogItem<'a> {
    Board(&'a BoardRecord),
    Component(&'a ComponentRecord),
}

impl<'a> CatalogItem<'a> {
    pub fn kind(&self) -> ItemKind {
        match self {
            CatalogItem::Board(_) => ItemKind::Board,
            CatalogItem::Component(_) => ItemKind::Component,
        }
    }

    pub fn name(&self) -> Result<&'a str, MissingFieldError> {
        let name = match self {
            CatalogItem::Board(b) => b.name.as_deref(),
            CatalogItem::Component(c) => c.name.as_deref(),
        };
        name.ok_or(MissingFieldError { field: "name" })
    }

    pub fn description(&self) -> Result<&'a str, MissingFieldError> {
        let description = match self {
            CatalogItem::Board(b) => b.description.as_deref(),
            CatalogItem::Component(c) => c.description.as_deref(),
        };
        description.ok_or(MissingFieldError {
            field: "description",
        })
    }

    /// Notes, empty when absent
    pub fn notes(&self) -> &'a str {
        match self {
            CatalogItem::Board(b) => b.notes.as_deref(),
            CatalogItem::Component(c) => c.notes.as_deref(),
        }
        .unwrap_or_default()
    }

    /// Image path to display. Components prefer a non-empty `wiring_image`
    /// over `image`; an empty string counts as absent.
    pub fn image_path(&self) -> Option<&'a str> {
        let path = match self {
            CatalogItem::Board(b) => b.image.as_deref(),
            CatalogItem::Component(c) => non_empty(c.wiring_image.as_deref())
                .or(c.image.as_deref()),
        };
        non_empty(path)
    }

    /// Connection notes, `None` when absent or empty
    pub fn connections(&self) -> Option<&'a str> {
        match self {
            CatalogItem::Board(_) => None,
            CatalogItem::Component(c) => non_empty(c.connections.as_deref()),
        }
    }

    /// Label used in the list panels
    pub fn label(&self) -> &'a str {
        self.name().unwrap_or(UNNAMED_LABEL)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(wiring_image: Option<&str>, image: Option<&str>) -> ComponentRecord {
        ComponentRecord {
            name: Some("LED".to_string()),
            wiring_image: wiring_image.map(str::to_string),
            image: image.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_board_uses_image_field() {
        let board = BoardRecord {
            image: Some("img/uno.png".to_string()),
            ..Default::default()
        };
        assert_eq!(CatalogItem::Board(&board).image_path(), Some("img/uno.png"));
    }

    #[test]
    fn test_component_prefers_wiring_image() {
        let c = component(Some("img/led_wire.png"), Some("img/led.png"));
        assert_eq!(
            CatalogItem::Component(&c).image_path(),
            Some("img/led_wire.png")
        );
    }

    #[test]
    fn test_component_empty_wiring_image_falls_back() {
        let c = component(Some(""), Some("img/led.png"));
        assert_eq!(CatalogItem::Component(&c).image_path(), Some("img/led.png"));

        let c = component(None, Some("img/led.png"));
        assert_eq!(CatalogItem::Component(&c).image_path(), Some("img/led.png"));

        let c = component(Some(""), Some(""));
        assert_eq!(CatalogItem::Component(&c).image_path(), None);
    }

    #[test]
    fn test_missing_name_fails_late() {
        let board = BoardRecord::default();
        let item = CatalogItem::Board(&board);
        assert_eq!(item.name(), Err(MissingFieldError { field: "name" }));
        assert_eq!(item.label(), UNNAMED_LABEL);
        assert_eq!(item.notes(), "");
    }

    #[test]
    fn test_empty_connections_are_absent() {
        let mut c = component(None, None);
        c.connections = Some(String::new());
        assert_eq!(CatalogItem::Component(&c).connections(), None);
        c.connections = Some("Anode to GPIO17".to_string());
        assert_eq!(
            CatalogItem::Component(&c).connections(),
            Some("Anode to GPIO17")
        );
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{"name": "LED", "description": "d", "pins": 2, "connections": "x"}"#;
        let c: ComponentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(c.name.as_deref(), Some("LED"));
        assert_eq!(c.connections.as_deref(), Some("x"));
        assert_eq!(c.notes, None);
    }

    #[test]
    fn test_non_string_fields_are_kept_as_text() {
        let json = r#"{"name": "Mega", "description": null, "notes": 42, "connections": ["5V", "GND"]}"#;
        let c: ComponentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(c.name.as_deref(), Some("Mega"));
        assert_eq!(c.description, None);
        assert_eq!(c.notes.as_deref(), Some("42"));
        assert_eq!(c.connections.as_deref(), Some(r#"["5V","GND"]"#));
    }

    #[test]
    fn test_catalog_item_lookup() {
        let catalog = Catalog::new(
            vec![BoardRecord {
                name: Some("Uno".to_string()),
                ..Default::default()
            }],
            vec![],
        );
        assert_eq!(catalog.item(ItemKind::Board, 0).unwrap().kind(), ItemKind::Board);
        assert!(catalog.item(ItemKind::Board, 1).is_none());
        assert!(catalog.item(ItemKind::Component, 0).is_none());
        assert_eq!(catalog.labels(ItemKind::Board), vec!["Uno"]);
    }
}
