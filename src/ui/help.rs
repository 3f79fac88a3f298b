//! Keyboard/mouse reference shown on `?`.

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;

const INTRO: &str = "Pick a row in either list to show its image and details.";

/// (section, [(keys, action)])
const SHORTCUTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Lists",
        &[
            ("j / ↓", "Next row (wraps)"),
            ("k / ↑", "Previous row (wraps)"),
            ("Home / End", "First / last row"),
            ("Enter", "Show highlighted row again"),
            ("Tab", "Switch Boards / Components"),
            ("Click", "Select a row"),
        ],
    ),
    (
        "Details",
        &[
            ("PgUp / PgDn", "Scroll text"),
            ("Wheel", "Scroll text"),
        ],
    ),
    (
        "General",
        &[
            ("? / h / F1", "Toggle this help"),
            ("Esc", "Close help"),
            ("q / Ctrl+C", "Quit"),
        ],
    ),
];

pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        HelpOverlay { theme }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(INTRO, self.theme.placeholder_style())),
            Line::default(),
        ];

        for (section, keys) in SHORTCUTS {
            lines.push(Line::styled(*section, self.theme.heading_style()));
            lines.extend(keys.iter().map(|(key, action)| {
                Line::from(vec![
                    Span::styled(format!("  {key:<13}"), self.theme.title_style()),
                    Span::raw(*action),
                ])
            }));
            lines.push(Line::default());
        }
        lines
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = popup_area(area, 60, 70);
        let block = Block::bordered()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .title_style(self.theme.title_style())
            .border_style(self.theme.focused_border_style())
            .style(self.theme.surface_style());

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(block)
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}

/// Centre a `percent_x` by `percent_y` rectangle inside `area`
fn popup_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_popup_is_centred() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = popup_area(area, 60, 70);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.x, 20);
        assert!(popup.y > 0);
        assert!(popup.bottom() <= area.bottom());
    }

    #[test]
    fn test_overlay_lists_quit_key() {
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        terminal
            .draw(|f| HelpOverlay::new(&theme).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Help"));
        assert!(text.contains("q / Ctrl+C"));
    }
}
