use crate::themes::Theme;
use ratatui::text::{Line, Span};
use sales_core::models::Manufacturer;

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. The manufacturer filter, one numbered entry per manufacturer with the
///    current selection highlighted.
/// 4. Dataset information in `[ source | N records ]` format.
pub struct Header<'a> {
    /// Currently selected manufacturer.
    pub selected: Manufacturer,
    /// Human-readable dataset source, e.g. "bundled dataset".
    pub source: &'a str,
    /// Number of normalized records in the current dataset.
    pub records: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(selected: Manufacturer, source: &'a str, records: usize, theme: &'a Theme) -> Self {
        Self {
            selected,
            source,
            records,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" VIDEO GAME SALES DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            self.filter_line(),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(format!("{} records", self.records), self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }

    fn filter_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(Manufacturer::ALL.len() * 2);
        for (i, manufacturer) in Manufacturer::ALL.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!(" {} {} ", i + 1, manufacturer.filter_label()),
                self.theme.filter_style(*manufacturer, self.selected),
            ));
        }
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
