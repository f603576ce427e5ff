//! Terminal UI layer for the game sales dashboard.
//!
//! Provides themes, the header and share-bar components, the four chart
//! panels, and the main application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod genre_view;
pub mod region_view;
pub mod themes;
pub mod top_rated_view;
pub mod trend_view;

pub use sales_core as core;

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::backend::TestBackend;
    use ratatui::{Frame, Terminal};

    /// Draw once into a `width`×`height` test terminal and return the buffer
    /// contents row by row.
    pub fn render_to_string(width: u16, height: u16, draw: impl FnOnce(&mut Frame)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(draw).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }
}
