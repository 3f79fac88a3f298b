//! UI widgets for the catalog viewer.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use super::theme::Theme;
use crate::presenter::DisplayPayload;

/// One of the two catalog list panels ("📋 Boards" / "📋 Components")
pub struct CatalogList<'a> {
    title: &'a str,
    labels: Vec<&'a str>,
    theme: &'a Theme,
}

impl<'a> CatalogList<'a> {
    pub fn new(title: &'a str, labels: Vec<&'a str>, theme: &'a Theme) -> Self {
        CatalogList {
            title,
            labels,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut ListState, focused: bool) {
        let (border_style, title_style) = self.theme.panel_styles(focused);
        let block = Block::default()
            .title(format!(" {} ({}) ", self.title, self.labels.len()))
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_type(if focused {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(border_style);

        if self.labels.is_empty() {
            let empty = Paragraph::new(Line::styled("(empty)", self.theme.placeholder_style()))
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .labels
            .iter()
            .map(|label| ListItem::new(*label))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(self.theme.highlight_style())
            .highlight_symbol("> ");

        frame.render_stateful_widget(list, area, state);
    }
}

/// Read-only text panel with the formatted record details
pub struct DetailsPanel<'a> {
    payload: Option<&'a DisplayPayload>,
    scroll: u16,
    theme: &'a Theme,
}

impl<'a> DetailsPanel<'a> {
    pub fn new(payload: Option<&'a DisplayPayload>, scroll: u16, theme: &'a Theme) -> Self {
        DetailsPanel {
            payload,
            scroll,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let title = match self.payload {
            Some(p) if !p.title.is_empty() => format!(" {} · {} ", p.title, p.kind.label()),
            _ => " Details ".to_string(),
        };

        let block = Block::default()
            .title(title)
            .title_style(self.theme.title_style())
            .borders(Borders::ALL)
            .border_style(self.theme.border_style());

        let lines = match self.payload {
            Some(p) => body_lines(&p.body, self.theme),
            None => Vec::new(),
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .style(self.theme.surface_style())
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));

        frame.render_widget(paragraph, area);
    }
}

/// Split the body text into lines, highlighting the `###` heading.
///
/// The text itself is rendered exactly as formatted by the presenter.
pub fn body_lines<'a>(body: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    body.split('\n')
        .map(|line| {
            if line.starts_with("### ") {
                Line::from(Span::styled(line, theme.heading_style()))
            } else {
                Line::from(line)
            }
        })
        .collect()
}

/// Status bar widget
pub struct StatusBar<'a> {
    selection: Option<&'a str>,
    data_dir: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(selection: Option<&'a str>, data_dir: &'a str, theme: &'a Theme) -> Self {
        StatusBar {
            selection,
            data_dir,
            theme,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = match self.selection {
            Some(s) if !s.is_empty() => format!(
                " {s} | {} | [Tab] Switch list [?] Help [q] Quit",
                self.data_dir
            ),
            _ => format!(" {} | [Tab] Switch list [?] Help [q] Quit", self.data_dir),
        };

        let paragraph = Paragraph::new(text).style(self.theme.status_bar_style());
        frame.render_widget(paragraph, area);
    }
}
