use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use sales_core::formatting::percentage;

/// Configuration controlling visual appearance of a share bar.
pub struct ShareBarConfig {
    /// Total width in terminal columns of the bar portion (excluding label).
    pub width: u16,
    pub filled_char: char,
    pub empty_char: char,
}

impl Default for ShareBarConfig {
    fn default() -> Self {
        Self {
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── ShareBar ─────────────────────────────────────────────────────────────────

/// Horizontal bar showing one part's share of a whole, followed by the share
/// as a percentage.
pub struct ShareBar<'a> {
    /// Share of the whole, clamped to `[0.0, 100.0]`.  Non-finite inputs
    /// produce `0.0`.
    pub percentage: f64,
    /// Style of the filled portion.
    pub fill: Style,
    pub theme: &'a Theme,
    pub config: ShareBarConfig,
}

impl<'a> ShareBar<'a> {
    /// Construct a new bar, computing the share of `part` in `whole`.
    pub fn new(part: f64, whole: f64, fill: Style, theme: &'a Theme) -> Self {
        let share = percentage(part, whole, 1);
        let percentage = if share.is_finite() {
            share.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            percentage,
            fill,
            theme,
            config: ShareBarConfig::default(),
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.config.width = width;
        self
    }

    /// Render the bar as a [`Line`]: filled span, empty span, percentage label.
    pub fn to_line(&self) -> Line<'a> {
        let filled = ((self.percentage / 100.0) * self.config.width as f64).round() as u16;
        let filled = filled.min(self.config.width);
        let empty = self.config.width - filled;

        let filled_str = self.config.filled_char.to_string().repeat(filled as usize);
        let empty_str = self.config.empty_char.to_string().repeat(empty as usize);

        Line::from(vec![
            Span::styled(filled_str, self.fill),
            Span::styled(empty_str, self.theme.share_empty),
            Span::styled(format!(" {:.1}%", self.percentage), self.theme.label),
        ])
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
