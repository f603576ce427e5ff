//! Genre popularity panel: release counts per genre as horizontal bars, most
//! popular first.

use ratatui::{
    layout::{Direction, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};
use sales_core::models::Manufacturer;
use sales_data::analysis::DashboardViews;

use crate::themes::Theme;

pub fn render_genre_view(
    frame: &mut Frame,
    area: Rect,
    views: &DashboardViews,
    manufacturer: Manufacturer,
    theme: &Theme,
) {
    let bars: Vec<Bar> = views
        .releases_by_genre
        .get(manufacturer)
        .iter()
        .map(|row| {
            Bar::default()
                .value(u64::from(row.releases))
                .label(Line::from(row.genre.as_str()))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(Span::styled(" Genre Popularity ", theme.chart_title)),
        )
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.bar_label);

    frame.render_widget(chart, area);
}
