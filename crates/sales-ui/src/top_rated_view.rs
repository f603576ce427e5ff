//! Top-rated games panel: the manufacturer's best critic scores as a table.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use sales_core::formatting::format_number;
use sales_core::models::Manufacturer;
use sales_data::analysis::DashboardViews;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::themes::Theme;

const RANK_WIDTH: u16 = 3;
const PLATFORM_WIDTH: u16 = 6;
const SCORE_WIDTH: u16 = 5;

/// Truncate `text` to at most `max_width` terminal columns, ending with `…`
/// when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_top_rated(
    frame: &mut Frame,
    area: Rect,
    views: &DashboardViews,
    manufacturer: Manufacturer,
    theme: &Theme,
) {
    let games = views.top_rated.get(manufacturer);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(" Top Rated Games ", theme.chart_title));

    if games.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("No rated games", theme.dim))).block(block),
            area,
        );
        return;
    }

    // Borders plus three column gaps.
    let fixed = RANK_WIDTH + PLATFORM_WIDTH + SCORE_WIDTH + 2 + 3;
    let name_width = area.width.saturating_sub(fixed).max(1);

    let header = Row::new(
        ["#", "Name", "Plat.", "Score"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = games
        .iter()
        .enumerate()
        .map(|(i, game)| {
            let style = if i % 2 == 0 {
                theme.table_row
            } else {
                theme.table_row_alt
            };
            let score = game.critic_score.unwrap_or(0.0);
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(truncate_to_width(game.display_name(), name_width as usize)),
                Cell::from(game.platform.code().to_string()),
                Cell::from(format_number(score, 0)).style(theme.score_style(score)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(RANK_WIDTH),
        Constraint::Min(name_width),
        Constraint::Length(PLATFORM_WIDTH),
        Constraint::Length(SCORE_WIDTH),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .style(theme.text);

    frame.render_widget(table, area);
}
