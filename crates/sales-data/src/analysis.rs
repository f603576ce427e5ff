//! Dashboard analysis pipeline.
//!
//! Chains loading, normalization and the four aggregators, returning a
//! [`DashboardViews`] bundle ready for the UI layer or for JSON export.

use chrono::Utc;
use sales_core::error::Result;
use sales_core::models::{Game, Manufacturer};
use serde::Serialize;

use crate::aggregator::{
    ManufacturerView, ReleasesPerGenre, ReleasesPerYear, SalesAggregator, SalesPerRegion,
};
use crate::normalizer::normalize;
use crate::reader::{load_records, DataSource};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    /// RFC 3339 timestamp when the views were built.
    pub generated_at: String,
    /// Number of normalized records the views were built from.
    pub records: usize,
    /// Records with a non-zero release year.
    pub dated_records: usize,
    /// Records with one of the twelve known genres.
    pub genre_records: usize,
    /// Records with a usable critic score.
    pub rated_records: usize,
    /// Wall-clock seconds spent aggregating.
    pub build_time_seconds: f64,
}

/// All four manufacturer-keyed views for one dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardViews {
    pub metadata: AnalysisMetadata,
    pub releases_by_year: ManufacturerView<ReleasesPerYear>,
    pub releases_by_genre: ManufacturerView<ReleasesPerGenre>,
    pub sales_by_region: ManufacturerView<SalesPerRegion>,
    pub top_rated: ManufacturerView<Game>,
}

impl DashboardViews {
    /// Total sales across all regions for `manufacturer`.
    pub fn total_sales(&self, manufacturer: Manufacturer) -> f64 {
        self.sales_by_region
            .get(manufacturer)
            .iter()
            .map(|r| r.sales)
            .sum()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Read and normalize the records from `source`.
pub fn load_games(source: &DataSource) -> Result<Vec<Game>> {
    let records = load_records(source)?;
    Ok(normalize(records))
}

/// Run every aggregator over `games`.
pub fn build_views(games: &[Game]) -> DashboardViews {
    let start = std::time::Instant::now();

    let releases_by_year = SalesAggregator::releases_by_year(games);
    let releases_by_genre = SalesAggregator::releases_by_genre(games);
    let sales_by_region = SalesAggregator::sales_by_region(games);
    let top_rated = SalesAggregator::top_rated(games);

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records: games.len(),
        dated_records: games.iter().filter(|g| g.has_release_year()).count(),
        genre_records: games.iter().filter(|g| g.known_genre().is_some()).count(),
        rated_records: games.iter().filter(|g| g.rated_score().is_some()).count(),
        build_time_seconds: start.elapsed().as_secs_f64(),
    };

    tracing::debug!(
        records = metadata.records,
        elapsed = metadata.build_time_seconds,
        "dashboard views built"
    );

    DashboardViews {
        metadata,
        releases_by_year,
        releases_by_genre,
        sales_by_region,
        top_rated,
    }
}

/// Load `source` and build its views in one step.
pub fn analyze(source: &DataSource) -> Result<DashboardViews> {
    let games = load_games(source)?;
    Ok(build_views(&games))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
