//! Terminal User Interface components for board-viewer.

mod help;
pub mod layout;
pub mod preview;
mod theme;
pub mod widgets;

pub use help::HelpOverlay;
pub use theme::Theme;
