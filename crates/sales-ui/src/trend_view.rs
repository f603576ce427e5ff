//! Release trend panel: releases per year as a vertical bar chart.
//!
//! The year axis is the `All` view's years sorted ascending, so the axis stays
//! put while the manufacturer filter changes; years the selected manufacturer
//! has no releases in show as empty bars.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders},
    Frame,
};
use sales_core::models::Manufacturer;
use sales_data::analysis::DashboardViews;

use crate::themes::Theme;

const MAX_BAR_WIDTH: u16 = 5;

/// `(year, releases)` pairs for `manufacturer` over the `All` year domain,
/// ascending by year.
pub fn trend_points(views: &DashboardViews, manufacturer: Manufacturer) -> Vec<(i32, u32)> {
    let mut years: Vec<i32> = views
        .releases_by_year
        .get(Manufacturer::All)
        .iter()
        .map(|r| r.year)
        .collect();
    years.sort_unstable();

    let selected = views.releases_by_year.get(manufacturer);
    years
        .into_iter()
        .map(|year| {
            let releases = selected
                .iter()
                .find(|r| r.year == year)
                .map_or(0, |r| r.releases);
            (year, releases)
        })
        .collect()
}

/// Widest bar that lets `count` bars plus one-column gaps fit in `inner_width`.
fn bar_width(inner_width: u16, count: usize) -> u16 {
    if count == 0 {
        return 1;
    }
    let slot = (inner_width as usize + 1) / count;
    (slot.saturating_sub(1) as u16).clamp(1, MAX_BAR_WIDTH)
}

pub fn render_release_trend(
    frame: &mut Frame,
    area: Rect,
    views: &DashboardViews,
    manufacturer: Manufacturer,
    theme: &Theme,
) {
    let points = trend_points(views, manufacturer);
    let width = bar_width(area.width.saturating_sub(2), points.len());

    let bars: Vec<Bar> = points
        .iter()
        .map(|(year, releases)| {
            let label = if width >= 4 {
                year.to_string()
            } else {
                format!("{:02}", year.rem_euclid(100))
            };
            Bar::default()
                .value(u64::from(*releases))
                .label(Line::from(label))
        })
        .collect();

    let title = format!(" Release Trend · {} ", manufacturer.filter_label());
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.chart_border)
                .title(Span::styled(title, theme.chart_title)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(1)
        .bar_style(theme.bar)
        .value_style(theme.bar_value)
        .label_style(theme.bar_label);

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::render_to_string;
    use sales_core::models::{Game, RawRecord};
    use sales_core::platform::Platform;
    use sales_data::analysis::build_views;
    use sales_data::normalizer::normalize;

    fn game(platform: &str, year: f64) -> RawRecord {
        RawRecord {
            name: Some(format!("{platform}-{year}")),
            platform: Platform::from_code(platform),
            year_of_release: Some(year),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Game> {
        normalize(vec![
            game("PS2", 2004.0),
            game("Wii", 2001.0),
            game("PS2", 2001.0),
            game("Wii", 2009.0),
        ])
    }

    #[test]
    fn test_trend_points_sorted_over_all_domain() {
        let views = build_views(&sample());
        let all = trend_points(&views, Manufacturer::All);
        assert_eq!(all, vec![(2001, 2), (2004, 1), (2009, 1)]);
    }

    #[test]
    fn test_trend_points_zero_fill_for_manufacturer() {
        let views = build_views(&sample());
        assert_eq!(
            trend_points(&views, Manufacturer::Sony),
            vec![(2001, 1), (2004, 1), (2009, 0)]
        );
        assert_eq!(
            trend_points(&views, Manufacturer::Sega),
            vec![(2001, 0), (2004, 0), (2009, 0)]
        );
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(100, 3), MAX_BAR_WIDTH);
        assert_eq!(bar_width(20, 10), 1);
        assert_eq!(bar_width(29, 10), 2);
        assert_eq!(bar_width(5, 40), 1);
        assert_eq!(bar_width(10, 0), 1);
    }

    #[test]
    fn test_render_release_trend() {
        let views = build_views(&sample());
        let text = render_to_string(60, 12, |frame| {
            let area = frame.area();
            render_release_trend(frame, area, &views, Manufacturer::Nintendo, &Theme::dark())
        });
        assert!(text.contains("Release Trend"));
        assert!(text.contains("Nintendo"));
        assert!(text.contains("2009"));
    }

    #[test]
    fn test_render_release_trend_empty() {
        let views = build_views(&[]);
        let text = render_to_string(40, 8, |frame| {
            let area = frame.area();
            render_release_trend(frame, area, &views, Manufacturer::All, &Theme::dark())
        });
        assert!(text.contains("All manufacturers"));
    }
}
