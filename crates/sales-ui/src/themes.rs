use ratatui::style::{Color, Modifier, Style};
use sales_core::models::{Manufacturer, Region};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        return background_from_colorfgbg(&val);
    }
    BackgroundType::Dark
}

fn background_from_colorfgbg(val: &str) -> BackgroundType {
    match val.split(';').next_back().map(str::parse::<u8>) {
        Some(Ok(bg)) if bg <= 6 => BackgroundType::Dark,
        Some(Ok(_)) => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Complete theme definition carrying all styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Manufacturer filter ──────────────────────────────────────────────────
    /// The currently selected manufacturer in the filter line.
    pub filter_selected: Style,
    /// Every other manufacturer in the filter line.
    pub filter_idle: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_border: Style,
    pub chart_title: Style,
    pub bar: Style,
    pub bar_value: Style,
    pub bar_label: Style,
    /// Unfilled portion of a share bar.
    pub share_empty: Style,
    /// Share bar colours in region order (NA, EU, JP, Others).
    pub region: [Style; 4],

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub score_high: Style,
    pub score_medium: Style,
    pub score_low: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            filter_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            filter_idle: Style::default().fg(Color::Gray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            bar: Style::default().fg(Color::Cyan),
            bar_value: Style::default().fg(Color::Black).bg(Color::Cyan),
            bar_label: Style::default().fg(Color::Gray),
            share_empty: Style::default().fg(Color::DarkGray),
            region: [
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Magenta),
            ],

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            score_high: Style::default().fg(Color::Green),
            score_medium: Style::default().fg(Color::Yellow),
            score_low: Style::default().fg(Color::Red),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and saturated accents so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            filter_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            filter_idle: Style::default().fg(Color::DarkGray),

            chart_border: Style::default().fg(Color::Gray),
            chart_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            bar: Style::default().fg(Color::Blue),
            bar_value: Style::default().fg(Color::White).bg(Color::Blue),
            bar_label: Style::default().fg(Color::DarkGray),
            share_empty: Style::default().fg(Color::Gray),
            region: [
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Magenta),
            ],

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            score_high: Style::default().fg(Color::Green),
            score_medium: Style::default().fg(Color::Magenta),
            score_low: Style::default().fg(Color::Red),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// No bold modifiers, for compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            filter_selected: Style::default().fg(Color::Black).bg(Color::White),
            filter_idle: Style::default().fg(Color::Gray),

            chart_border: Style::default().fg(Color::DarkGray),
            chart_title: Style::default().fg(Color::Cyan),
            bar: Style::default().fg(Color::Green),
            bar_value: Style::default().fg(Color::Black).bg(Color::Green),
            bar_label: Style::default().fg(Color::White),
            share_empty: Style::default().fg(Color::DarkGray),
            region: [
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Cyan),
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Yellow),
            ],

            table_header: Style::default().fg(Color::Cyan),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            score_high: Style::default().fg(Color::Green),
            score_medium: Style::default().fg(Color::Yellow),
            score_low: Style::default().fg(Color::Red),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Share bar colour for `region`.
    pub fn region_style(&self, region: Region) -> Style {
        self.region[region.index()]
    }

    /// Filter-line style for `manufacturer` given the current selection.
    pub fn filter_style(&self, manufacturer: Manufacturer, selected: Manufacturer) -> Style {
        if manufacturer == selected {
            self.filter_selected
        } else {
            self.filter_idle
        }
    }

    /// Colour for a critic score.
    ///
    /// * `≥ 90` → `score_high`
    /// * `75–90` → `score_medium`
    /// * `< 75` → `score_low`
    pub fn score_style(&self, score: f64) -> Style {
        if score >= 90.0 {
            self.score_high
        } else if score >= 75.0 {
            self.score_medium
        } else {
            self.score_low
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
