//! Raw record → [`Game`] normalization.
//!
//! Attaches the derived manufacturer and truncates the release year.  Nothing
//! is filtered here: missing or invalid fields pass through untouched and are
//! dealt with by each aggregator.

use sales_core::models::{Game, RawRecord, Region};
use tracing::{debug, warn};

const TWO_POW_32: f64 = 4_294_967_296.0;

/// Truncate a number to a signed 32-bit integer with ECMAScript `ToInt32`
/// semantics.
///
/// The fractional part is dropped toward zero.  `NaN` and infinities become
/// `0`; finite values outside the `i32` range wrap modulo 2^32.
pub fn to_int32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let wrapped = value.trunc().rem_euclid(TWO_POW_32);
    wrapped as u32 as i32
}

/// Integer release year; missing years become `0`.
pub fn truncate_year(year: Option<f64>) -> i32 {
    year.map(to_int32).unwrap_or(0)
}

/// Normalize a single record.
pub fn normalize_record(raw: RawRecord) -> Game {
    let manufacturer = raw.platform.manufacturer();
    Game {
        name: raw.name,
        platform: raw.platform,
        year_of_release: truncate_year(raw.year_of_release),
        genre: raw.genre,
        publisher: raw.publisher,
        na_sales: raw.na_sales,
        eu_sales: raw.eu_sales,
        jp_sales: raw.jp_sales,
        other_sales: raw.other_sales,
        global_sales: raw.global_sales,
        critic_score: raw.critic_score,
        critic_count: raw.critic_count,
        user_score: raw.user_score,
        user_count: raw.user_count,
        developer: raw.developer,
        rating: raw.rating,
        manufacturer,
    }
}

/// Normalize every record, preserving order one-to-one.
pub fn normalize(records: Vec<RawRecord>) -> Vec<Game> {
    let games: Vec<Game> = records.into_iter().map(normalize_record).collect();

    let unrecognized = games.iter().filter(|g| g.platform.is_unrecognized()).count();
    if unrecognized > 0 {
        debug!("{} records have an unrecognized platform code", unrecognized);
    }

    let corrupt_sales = games
        .iter()
        .filter(|g| Region::ALL.iter().any(|r| g.sales(*r).is_nan()))
        .count();
    if corrupt_sales > 0 {
        warn!(
            "{} records carry non-numeric regional sales; region totals will be NaN",
            corrupt_sales
        );
    }

    debug!("Normalized {} records", games.len());
    games
}

// ── Tests ─────────────────────────────────────────────────────────────────────
