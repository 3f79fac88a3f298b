//! Colours and text styles shared by every panel.

use ratatui::style::{Color, Modifier, Style, Stylize};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub background: Color,
    pub selection_fg: Color,
    pub selection_bg: Color,
    pub frame: Color,
    pub frame_focused: Color,
    pub title: Color,
    pub heading: Color,
    pub placeholder: Color,
    pub status_fg: Color,
    pub status_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text: Color::Gray,
            background: Color::Reset,
            selection_fg: Color::Black,
            selection_bg: Color::LightCyan,
            frame: Color::DarkGray,
            frame_focused: Color::LightYellow,
            title: Color::LightBlue,
            heading: Color::LightGreen,
            placeholder: Color::DarkGray,
            status_fg: Color::White,
            status_bg: Color::Rgb(40, 44, 52),
        }
    }
}

impl Theme {
    /// Plain text on the panel background
    pub fn surface_style(&self) -> Style {
        Style::new().fg(self.text).bg(self.background)
    }

    /// (border, title) styles for a list panel
    pub fn panel_styles(&self, focused: bool) -> (Style, Style) {
        if focused {
            let style = self.focused_border_style();
            (style, style)
        } else {
            (self.border_style(), self.title_style())
        }
    }

    pub fn highlight_style(&self) -> Style {
        Style::new().fg(self.selection_fg).bg(self.selection_bg).bold()
    }

    pub fn border_style(&self) -> Style {
        Style::new().fg(self.frame)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::new().fg(self.frame_focused).bold()
    }

    pub fn title_style(&self) -> Style {
        Style::new().fg(self.title).bold()
    }

    /// The `### name` line of the details text
    pub fn heading_style(&self) -> Style {
        Style::new().fg(self.heading).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// "No image", "(empty)" and similar stand-ins
    pub fn placeholder_style(&self) -> Style {
        Style::new().fg(self.placeholder).italic()
    }

    pub fn status_bar_style(&self) -> Style {
        Style::new().fg(self.status_fg).bg(self.status_bg)
    }
}
