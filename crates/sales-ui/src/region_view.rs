//! Regional distribution panel: each region's share of total sales.

use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sales_core::formatting::{format_number, format_sales};
use sales_core::models::{Manufacturer, Region};
use sales_data::analysis::DashboardViews;

use crate::components::ShareBar;
use crate::themes::Theme;

/// Columns reserved beside the bar for the region tag and percentage.
const BAR_RESERVED: u16 = 16;

/// Tooltip-style caption for one region, e.g. `"360.04 millions in NA"`.
pub fn region_caption(sales: f64, region: Region) -> String {
    format!("{} millions in {}", format_number(sales, 2), region.label())
}

pub fn render_region_view(
    frame: &mut Frame,
    area: Rect,
    views: &DashboardViews,
    manufacturer: Manufacturer,
    theme: &Theme,
) {
    let rows = views.sales_by_region.get(manufacturer);
    let total = views.total_sales(manufacturer);
    let bar_width = area.width.saturating_sub(BAR_RESERVED).max(1);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total ", theme.label),
            Span::styled(format_sales(total), theme.value),
        ]),
        Line::from(""),
    ];

    for row in rows {
        let mut spans = vec![Span::styled(
            format!("{:<7}", row.region.label()),
            theme.bold,
        )];
        let bar = ShareBar::new(row.sales, total, theme.region_style(row.region), theme)
            .width(bar_width)
            .to_line();
        spans.extend(bar.spans);
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(
            format!("       {}", region_caption(row.sales, row.region)),
            theme.dim,
        )));
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(Span::styled(" Regional Distribution ", theme.chart_title)),
        ),
        area,
    );
}
