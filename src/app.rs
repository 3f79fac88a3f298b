//! Main application logic and TUI event loop.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, ListState},
    Terminal,
};

use crate::cli::AppConfig;
use crate::data::{Catalog, ItemKind, Storage};
use crate::presenter::SelectionPresenter;
use crate::ui::{
    layout::{contains, AppLayout},
    preview::{ImageCache, ImagePanel},
    widgets::{CatalogList, DetailsPanel, StatusBar},
    HelpOverlay, Theme,
};

const WINDOW_TITLE: &str = " Board Simulator (alpha) ";
const BOARDS_TITLE: &str = "📋 Boards";
const COMPONENTS_TITLE: &str = "📋 Components";

/// Rows scrolled by PgUp/PgDn in the details panel
const PAGE_SCROLL: u16 = 10;

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Which list is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPanel {
    Boards,
    Components,
}

impl FocusedPanel {
    fn toggle(self) -> Self {
        match self {
            FocusedPanel::Boards => FocusedPanel::Components,
            FocusedPanel::Components => FocusedPanel::Boards,
        }
    }

    fn kind(self) -> ItemKind {
        match self {
            FocusedPanel::Boards => ItemKind::Board,
            FocusedPanel::Components => ItemKind::Component,
        }
    }
}

/// Application state
pub struct App {
    // Configuration
    config: AppConfig,
    theme: Theme,

    // Data + selection
    presenter: SelectionPresenter,
    images: ImageCache,

    // UI State
    focused: FocusedPanel,
    board_list: ListState,
    component_list: ListState,
    details_scroll: u16,
    show_help: bool,

    // Exit flag
    should_quit: bool,
}

impl App {
    /// Load the catalog and create a new App instance
    pub fn new(config: AppConfig) -> Result<Self> {
        let catalog = load_catalog(&config)?;
        Ok(Self::with_catalog(config, catalog))
    }

    /// Create an App over an already loaded catalog
    pub fn with_catalog(config: AppConfig, catalog: Catalog) -> Self {
        let presenter = SelectionPresenter::new(catalog);

        let mut board_list = ListState::default();
        board_list.select(presenter.selected(ItemKind::Board));
        let mut component_list = ListState::default();
        component_list.select(presenter.selected(ItemKind::Component));

        let mut images = ImageCache::new();
        if let Some(payload) = presenter.payload() {
            images.prepare(payload);
        }

        App {
            config,
            theme: Theme::default(),
            presenter,
            images,
            focused: FocusedPanel::Boards,
            board_list,
            component_list,
            details_scroll: 0,
            show_help: false,
            should_quit: false,
        }
    }

    fn list_state_mut(&mut self, kind: ItemKind) -> &mut ListState {
        match kind {
            ItemKind::Board => &mut self.board_list,
            ItemKind::Component => &mut self.component_list,
        }
    }

    /// Select `row` in the list for `kind`.
    ///
    /// Re-selecting the current row is ignored unless `force` is set, so
    /// moving within a one-item list does not steal the detail pane.
    fn select_row(&mut self, kind: ItemKind, row: usize, force: bool) {
        if !force && self.presenter.selected(kind) == Some(row) {
            return;
        }
        let changed = match kind {
            ItemKind::Board => self.presenter.select_board(Some(row)),
            ItemKind::Component => self.presenter.select_component(Some(row)),
        };
        if !changed {
            return;
        }

        self.list_state_mut(kind).select(Some(row));
        self.details_scroll = 0;
        if let Some(payload) = self.presenter.payload() {
            self.images.prepare(payload);
        }
    }

    /// Handle keyboard input
    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global shortcuts
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => {
                self.show_help = !self.show_help;
                return;
            }
            KeyCode::Esc if self.show_help => {
                self.show_help = false;
                return;
            }
            _ => {}
        }

        // If help is shown, don't process other keys
        if self.show_help {
            return;
        }

        match key {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused = self.focused.toggle();
            }
            KeyCode::PageDown => {
                self.details_scroll = self.details_scroll.saturating_add(PAGE_SCROLL);
            }
            KeyCode::PageUp => {
                self.details_scroll = self.details_scroll.saturating_sub(PAGE_SCROLL);
            }
            _ => self.handle_list_navigation(key),
        }
    }

    fn handle_list_navigation(&mut self, key: KeyCode) {
        let kind = self.focused.kind();
        let len = self.presenter.catalog().len(kind);
        if len == 0 {
            return;
        }
        let current = self.presenter.selected(kind).unwrap_or(0);

        match key {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_row(kind, (current + 1) % len, false);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = current.checked_sub(1).unwrap_or(len - 1);
                self.select_row(kind, prev, false);
            }
            KeyCode::Home => self.select_row(kind, 0, false),
            KeyCode::End => self.select_row(kind, len - 1, false),
            KeyCode::Enter => self.select_row(kind, current, true),
            _ => {}
        }
    }

    /// Handle mouse input. `screen` is the full terminal area.
    fn handle_mouse(&mut self, mouse: MouseEvent, screen: Rect) {
        if self.show_help {
            return;
        }
        let layout = screen_layout(screen);
        let (col, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = if contains(layout.boards_area, col, row) {
                    Some((FocusedPanel::Boards, layout.boards_area))
                } else if contains(layout.components_area, col, row) {
                    Some((FocusedPanel::Components, layout.components_area))
                } else {
                    None
                };
                let Some((panel, area)) = target else {
                    return;
                };

                self.focused = panel;
                // First row sits just below the top border
                if row <= area.y || row + 1 >= area.y + area.height {
                    return;
                }
                let kind = panel.kind();
                let offset = self.list_state_mut(kind).offset();
                let index = offset + usize::from(row - area.y - 1);
                if index < self.presenter.catalog().len(kind) {
                    self.select_row(kind, index, true);
                }
            }
            MouseEventKind::ScrollDown if contains(layout.details_area, col, row) => {
                self.details_scroll = self.details_scroll.saturating_add(1);
            }
            MouseEventKind::ScrollUp if contains(layout.details_area, col, row) => {
                self.details_scroll = self.details_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut ratatui::Frame) {
        let size = frame.area();

        let window = window_block(&self.theme);
        let layout = AppLayout::from_area(window.inner(size));
        frame.render_widget(window, size);

        let catalog = self.presenter.catalog();
        CatalogList::new(BOARDS_TITLE, catalog.labels(ItemKind::Board), &self.theme).render(
            frame,
            layout.boards_area,
            &mut self.board_list,
            self.focused == FocusedPanel::Boards,
        );
        CatalogList::new(
            COMPONENTS_TITLE,
            catalog.labels(ItemKind::Component),
            &self.theme,
        )
        .render(
            frame,
            layout.components_area,
            &mut self.component_list,
            self.focused == FocusedPanel::Components,
        );

        let payload = self.presenter.payload();
        frame.render_widget(
            ImagePanel::new(payload, &mut self.images, &self.theme),
            layout.image_area,
        );
        DetailsPanel::new(payload, self.details_scroll, &self.theme)
            .render(frame, layout.details_area);

        let data_dir = self.config.data_dir.display().to_string();
        let selection = payload.map(|p| p.title.as_str());
        StatusBar::new(selection, &data_dir, &self.theme).render(frame, layout.status_area);

        if self.show_help {
            HelpOverlay::new(&self.theme).render(frame, size);
        }
    }
}

fn window_block(theme: &Theme) -> Block<'static> {
    Block::bordered()
        .title(WINDOW_TITLE)
        .title_style(theme.title_style())
        .border_style(theme.border_style())
}

/// Panel layout for a terminal of size `screen`
fn screen_layout(screen: Rect) -> AppLayout {
    AppLayout::from_area(Block::bordered().inner(screen))
}

/// Restore terminal to normal state
fn restore_terminal() {
    // Best effort cleanup - ignore errors since we may be in a panic
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Read both catalog files named by `config`. Any failure is fatal.
pub fn load_catalog(config: &AppConfig) -> Result<Catalog> {
    Storage::new(config.paths.clone())
        .load_catalog()
        .map_err(|err| {
            tracing::error!(path = %err.path().display(), "catalog load failed: {err}");
            err
        })
        .context("Failed to load the board/component catalog")
}

/// Run the TUI application
pub fn run(config: AppConfig) -> Result<()> {
    // Load before touching the terminal so load errors print normally
    let mut app = App::new(config)?;

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        restore_terminal();
        return Err(e).context("Failed to setup terminal");
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            restore_terminal();
            return Err(e).context("Failed to create terminal");
        }
    };

    let result = run_main_loop(&mut terminal, &mut app);

    // Always restore terminal, regardless of result
    restore_terminal();
    terminal.show_cursor().ok();

    result
}

/// Main application loop
fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key.code, key.modifiers);
                }
                Event::Mouse(mouse) => {
                    let size = terminal.size()?;
                    app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                }
                _ => {}
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
