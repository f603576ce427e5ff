//! Main application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the selected manufacturer and the
//! [`DataManager`].  Changing the selection only switches which slice of the
//! cached views is drawn; `r` reloads the dataset through the manager.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use sales_core::models::Manufacturer;
use sales_data::analysis::DashboardViews;
use sales_runtime::data_manager::DataManager;

use crate::components::Header;
use crate::themes::Theme;
use crate::{genre_view, region_view, top_rated_view, trend_view};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Height of the header block in rows.
const HEADER_HEIGHT: u16 = 4;

// ── App ───────────────────────────────────────────────────────────────────────

/// Dashboard application state.
pub struct App {
    pub theme: Theme,
    /// Manufacturer whose slice of every view is drawn.
    pub manufacturer: Manufacturer,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    manager: DataManager,
    /// Views for the manager's current dataset, `None` until a load succeeds.
    views: Option<Arc<DashboardViews>>,
    /// Message shown in the footer, e.g. a failed reload.
    status: Option<String>,
}

impl App {
    /// Construct the application and fetch the initial views.
    ///
    /// A load failure is not fatal here: the dashboard shows a placeholder
    /// and the error, and `r` retries.
    pub fn new(theme_name: &str, manufacturer: Manufacturer, mut manager: DataManager) -> Self {
        let (views, status) = match manager.views() {
            Ok(v) => (Some(v), None),
            Err(e) => (None, Some(format!("Failed to load data: {e}"))),
        };
        Self {
            theme: Theme::from_name(theme_name),
            manufacturer,
            should_quit: false,
            manager,
            views,
            status,
        }
    }

    pub fn views(&self) -> Option<&DashboardViews> {
        self.views.as_deref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn manager(&self) -> &DataManager {
        &self.manager
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Q` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// on the current thread.  The terminal is restored even when drawing or
    /// reading events fails.
    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Right | KeyCode::Tab => self.select(self.manufacturer.next()),
            KeyCode::Left | KeyCode::BackTab => self.select(self.manufacturer.previous()),
            KeyCode::Char(c @ '1'..='7') => {
                let index = c as usize - '1' as usize;
                self.select(Manufacturer::ALL[index]);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reload(),
            _ => {}
        }
    }

    fn select(&mut self, manufacturer: Manufacturer) {
        if manufacturer != self.manufacturer {
            tracing::debug!(manufacturer = %manufacturer, "manufacturer selected");
            self.manufacturer = manufacturer;
        }
    }

    /// Reload the dataset.  On failure the previous views stay on screen and
    /// the error is shown in the footer.
    pub fn reload(&mut self) {
        match self.manager.reload().and_then(|_| self.manager.views()) {
            Ok(views) => {
                self.views = Some(views);
                self.status = Some("Dataset reloaded".to_string());
            }
            Err(e) => {
                self.status = Some(format!("Reload failed: {e}"));
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let source = self.manager.source().describe();
        let records = self.manager.dataset().map_or(0, |d| d.len());
        let header = Header::new(self.manufacturer, &source, records, &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        match self.views.as_deref() {
            Some(views) => self.render_dashboard(frame, body_area, views),
            None => render_no_data(frame, body_area, &self.theme),
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer_area);
    }

    fn render_dashboard(&self, frame: &mut Frame, area: Rect, views: &DashboardViews) {
        let [trend_area, panels_area] =
            Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)])
                .areas(area);
        let [genre_area, region_area, top_area] = Layout::horizontal([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .areas(panels_area);

        let m = self.manufacturer;
        trend_view::render_release_trend(frame, trend_area, views, m, &self.theme);
        genre_view::render_genre_view(frame, genre_area, views, m, &self.theme);
        region_view::render_region_view(frame, region_area, views, m, &self.theme);
        top_rated_view::render_top_rated(frame, top_area, views, m, &self.theme);
    }

    fn footer_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "←/→ manufacturer · 1-7 select · r reload · q quit",
            self.theme.dim,
        )];
        if let Some(status) = &self.status {
            let style = if self.manager.last_error().is_some() || self.views.is_none() {
                self.theme.error
            } else {
                self.theme.info
            };
            spans.push(Span::raw("  "));
            spans.push(Span::styled(status.clone(), style));
        }
        Line::from(spans)
    }
}

/// Render a "no data" placeholder when no dataset could be loaded.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No sales data loaded", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the --data path, then press 'r' to retry.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Game Sales Dashboard "),
        ),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
