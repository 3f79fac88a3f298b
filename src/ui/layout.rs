//! Layout helpers: split the terminal area into panels.
//!
//! Shared by rendering and mouse hit-testing so both agree on where each
//! panel is.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the image panel in terminal rows, borders included
pub const IMAGE_PANEL_ROWS: u16 = 18;

/// Primary screen layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub boards_area: Rect,
    pub components_area: Rect,
    pub image_area: Rect,
    pub details_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the area inside the outer window frame.
    pub fn from_area(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Body
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        // Lists take one quarter, the detail pane the rest
        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4), Constraint::Ratio(3, 4)])
            .split(main_chunks[0]);

        let list_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(body_chunks[0]);

        let detail_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(IMAGE_PANEL_ROWS),
                Constraint::Min(3),
            ])
            .split(body_chunks[1]);

        AppLayout {
            boards_area: list_chunks[0],
            components_area: list_chunks[1],
            image_area: detail_chunks[0],
            details_area: detail_chunks[1],
            status_area: main_chunks[1],
        }
    }
}

/// Whether (`col`, `row`) falls inside `area`
pub fn contains(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_left_of_detail_pane() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.boards_area.x, 0);
        assert_eq!(layout.boards_area.width, 30);
        assert_eq!(layout.image_area.x, 30);
        assert_eq!(layout.image_area.height, IMAGE_PANEL_ROWS);
        assert_eq!(layout.details_area.y, IMAGE_PANEL_ROWS);
        assert_eq!(layout.status_area.y, 39);
        assert_eq!(
            layout.components_area.y,
            layout.boards_area.y + layout.boards_area.height
        );
    }

    #[test]
    fn test_contains() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 4));
        assert!(!contains(area, 6, 4));
        assert!(!contains(area, 2, 5));
    }
}
