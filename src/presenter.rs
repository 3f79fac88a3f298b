//! Selection state and the record → display payload mapping.
//!
//! Nothing in here touches the terminal: the UI layer asks the
//! [`SelectionPresenter`] for the current [`DisplayPayload`] and paints it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::{Catalog, CatalogItem, ItemKind};

/// Fixed display height, in pixels, that images are scaled to
pub const DISPLAY_IMAGE_HEIGHT: u32 = 300;

/// Shown in the image panel when a record has no usable image
pub const NO_IMAGE_TEXT: &str = "No image";

/// Shown in the image panel before anything has been selected
pub const SELECT_PROMPT: &str = "Select a board or component";

/// Why a record's image could not be shown. Always recovered by showing
/// [`NO_IMAGE_TEXT`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageResolutionFailure {
    #[error("record has no image path")]
    NoPath,

    #[error("image file does not exist: {0:?}")]
    NotFound(PathBuf),

    #[error("image {path:?} could not be decoded: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// What the image panel should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayImage {
    /// An existing file, to be scaled to [`DISPLAY_IMAGE_HEIGHT`]
    Path(PathBuf),
    /// The [`NO_IMAGE_TEXT`] placeholder
    NoImage,
}

/// Everything the detail pane needs to render one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPayload {
    pub kind: ItemKind,
    pub image: DisplayImage,
    pub title: String,
    pub body: String,
}

/// Resolve the image path for `item` and check that the file exists.
pub fn locate_image(item: &CatalogItem<'_>) -> Result<PathBuf, ImageResolutionFailure> {
    let path = item.image_path().ok_or(ImageResolutionFailure::NoPath)?;
    let path = Path::new(path);
    if path.exists() {
        Ok(path.to_path_buf())
    } else {
        Err(ImageResolutionFailure::NotFound(path.to_path_buf()))
    }
}

/// Format the details text for `item`.
///
/// Missing `name`/`description` are rendered as empty text.
pub fn format_body(item: &CatalogItem<'_>) -> String {
    let mut text = format!(
        "### {}\n\n{}\n\nNotes: {}",
        display_field(item, item.name()),
        display_field(item, item.description()),
        item.notes(),
    );

    if let Some(connections) = item.connections() {
        text.push_str("\n\n---\n\n🔗 Connections:\n");
        text.push_str(connections);
    }

    text
}

/// Build the full payload for `item`.
pub fn build_payload(item: &CatalogItem<'_>) -> DisplayPayload {
    let image = match locate_image(item) {
        Ok(path) => DisplayImage::Path(path),
        Err(reason) => {
            tracing::debug!(kind = item.kind().label(), %reason, "showing placeholder image");
            DisplayImage::NoImage
        }
    };

    DisplayPayload {
        kind: item.kind(),
        image,
        title: display_field(item, item.name()).to_string(),
        body: format_body(item),
    }
}

fn display_field<'a>(
    item: &CatalogItem<'_>,
    field: Result<&'a str, crate::data::MissingFieldError>,
) -> &'a str {
    field.unwrap_or_else(|e| {
        tracing::debug!(kind = item.kind().label(), error = %e, "substituting empty text");
        ""
    })
}

/// Owns the catalog, the two list selections and the shared detail payload.
///
/// Each list keeps its own index; both write to the same payload, so the
/// payload always reflects whichever list was selected most recently.
#[derive(Debug)]
pub struct SelectionPresenter {
    catalog: Catalog,
    board_index: Option<usize>,
    component_index: Option<usize>,
    payload: Option<DisplayPayload>,
}

impl SelectionPresenter {
    /// Take ownership of a freshly loaded catalog and select row 0 of each
    /// non-empty list. Boards are applied last, so `boards[0]` is on display
    /// whenever the board list is non-empty.
    pub fn new(catalog: Catalog) -> Self {
        let mut presenter = SelectionPresenter {
            catalog,
            board_index: None,
            component_index: None,
            payload: None,
        };

        if presenter.catalog.len(ItemKind::Component) > 0 {
            presenter.select(ItemKind::Component, Some(0));
        }
        if presenter.catalog.len(ItemKind::Board) > 0 {
            presenter.select(ItemKind::Board, Some(0));
        }

        presenter
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Currently selected row in the list for `kind`
    pub fn selected(&self, kind: ItemKind) -> Option<usize> {
        match kind {
            ItemKind::Board => self.board_index,
            ItemKind::Component => self.component_index,
        }
    }

    /// The payload on display, `None` until something has been selected
    pub fn payload(&self) -> Option<&DisplayPayload> {
        self.payload.as_ref()
    }

    pub fn select_board(&mut self, row: Option<usize>) -> bool {
        self.select(ItemKind::Board, row)
    }

    pub fn select_component(&mut self, row: Option<usize>) -> bool {
        self.select(ItemKind::Component, row)
    }

    /// Select `row` in the list for `kind` and recompute the payload.
    ///
    /// `None` (no current row) and out-of-range rows leave everything
    /// unchanged. Returns whether the payload was recomputed.
    pub fn select(&mut self, kind: ItemKind, row: Option<usize>) -> bool {
        let Some(row) = row else {
            return false;
        };
        let Some(item) = self.catalog.item(kind, row) else {
            tracing::debug!(kind = kind.label(), row, "ignoring out-of-range selection");
            return false;
        };

        let payload = build_payload(&item);
        match kind {
            ItemKind::Board => self.board_index = Some(row),
            ItemKind::Component => self.component_index = Some(row),
        }
        self.payload = Some(payload);
        true
    }
}
