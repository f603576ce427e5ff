//! Per-manufacturer aggregation views over the normalized game list.
//!
//! Every view is keyed by all seven [`Manufacturer`] values.  The `All`
//! bucket folds over the whole slice; each real manufacturer only sees its
//! own records.  All functions are pure: the same slice always yields an
//! equal view.

use std::collections::{BTreeMap, HashMap, HashSet};

use sales_core::models::{Game, Genre, Manufacturer, Region};
use serde::Serialize;

/// How many top-scored records are considered before de-duplicating by name.
pub const TOP_RATED_POOL: usize = 100;

/// Maximum number of games in each top-rated list.
pub const TOP_RATED_LIMIT: usize = 20;

// ── Row types ─────────────────────────────────────────────────────────────────

/// Number of releases in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReleasesPerYear {
    pub year: i32,
    pub releases: u32,
}

/// Number of releases in one genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReleasesPerGenre {
    pub genre: Genre,
    pub releases: u32,
}

/// Summed sales in one region, millions of units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesPerRegion {
    pub region: Region,
    pub sales: f64,
}

// ── ManufacturerView ──────────────────────────────────────────────────────────

/// One list per manufacturer, with every manufacturer key present.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ManufacturerView<T> {
    lists: BTreeMap<Manufacturer, Vec<T>>,
}

impl<T> ManufacturerView<T> {
    /// Build a view by computing the list for each manufacturer.
    pub fn from_fn(mut build: impl FnMut(Manufacturer) -> Vec<T>) -> Self {
        Self {
            lists: Manufacturer::ALL.iter().map(|&m| (m, build(m))).collect(),
        }
    }

    /// The list for `manufacturer`.
    pub fn get(&self, manufacturer: Manufacturer) -> &[T] {
        self.lists
            .get(&manufacturer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate `(manufacturer, list)` pairs with `All` first.
    pub fn iter(&self) -> impl Iterator<Item = (Manufacturer, &[T])> {
        self.lists.iter().map(|(m, list)| (*m, list.as_slice()))
    }
}

// ── Year tally ────────────────────────────────────────────────────────────────

/// Per-year counts in first-encounter order.
#[derive(Debug, Default)]
struct YearTally {
    rows: Vec<ReleasesPerYear>,
    index: HashMap<i32, usize>,
}

impl YearTally {
    fn increment(&mut self, year: i32) {
        match self.index.get(&year) {
            Some(&i) => self.rows[i].releases += 1,
            None => {
                self.index.insert(year, self.rows.len());
                self.rows.push(ReleasesPerYear { year, releases: 1 });
            }
        }
    }
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper producing the four dashboard views.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Release counts per year.
    ///
    /// Records with year `0` are skipped everywhere, including `All`.  Years
    /// appear in the order they are first met; a manufacturer without dated
    /// records gets an empty list.
    pub fn releases_by_year(games: &[Game]) -> ManufacturerView<ReleasesPerYear> {
        let mut tallies: BTreeMap<Manufacturer, YearTally> = Manufacturer::ALL
            .iter()
            .map(|&m| (m, YearTally::default()))
            .collect();

        for game in games.iter().filter(|g| g.has_release_year()) {
            for bucket in buckets(game.manufacturer) {
                if let Some(tally) = tallies.get_mut(&bucket) {
                    tally.increment(game.year_of_release);
                }
            }
        }

        ManufacturerView::from_fn(|m| tallies.remove(&m).map(|t| t.rows).unwrap_or_default())
    }

    /// Release counts per genre.
    ///
    /// Every list holds all twelve genres sorted by descending count, ties in
    /// declaration order.  Records without a known genre are skipped
    /// everywhere, including `All`.
    pub fn releases_by_genre(games: &[Game]) -> ManufacturerView<ReleasesPerGenre> {
        let mut counts: BTreeMap<Manufacturer, [u32; Genre::ALL.len()]> = Manufacturer::ALL
            .iter()
            .map(|&m| (m, [0; Genre::ALL.len()]))
            .collect();

        for game in games {
            let Some(genre) = game.known_genre() else {
                continue;
            };
            for bucket in buckets(game.manufacturer) {
                if let Some(row) = counts.get_mut(&bucket) {
                    row[genre.index()] += 1;
                }
            }
        }

        ManufacturerView::from_fn(|m| {
            let row = counts.get(&m).copied().unwrap_or_default();
            let mut list: Vec<ReleasesPerGenre> = Genre::ALL
                .iter()
                .map(|&genre| ReleasesPerGenre {
                    genre,
                    releases: row[genre.index()],
                })
                .collect();
            // Stable: equal counts keep declaration order.
            list.sort_by(|a, b| b.releases.cmp(&a.releases));
            list
        })
    }

    /// Summed regional sales, always the four regions in fixed order.
    ///
    /// No record is skipped; a `NaN` sales figure propagates into the sum.
    pub fn sales_by_region(games: &[Game]) -> ManufacturerView<SalesPerRegion> {
        let mut totals: BTreeMap<Manufacturer, [f64; Region::ALL.len()]> = Manufacturer::ALL
            .iter()
            .map(|&m| (m, [0.0; Region::ALL.len()]))
            .collect();

        for game in games {
            for bucket in buckets(game.manufacturer) {
                if let Some(row) = totals.get_mut(&bucket) {
                    for region in Region::ALL {
                        row[region.index()] += game.sales(region);
                    }
                }
            }
        }

        ManufacturerView::from_fn(|m| {
            let row = totals.get(&m).copied().unwrap_or_default();
            Region::ALL
                .iter()
                .map(|&region| SalesPerRegion {
                    region,
                    sales: row[region.index()],
                })
                .collect()
        })
    }

    /// Up to [`TOP_RATED_LIMIT`] best critic-scored games per manufacturer.
    ///
    /// Unscored records are dropped, the rest sorted by descending score
    /// (stable), cut to [`TOP_RATED_POOL`], de-duplicated by name keeping the
    /// first occurrence, then cut to [`TOP_RATED_LIMIT`].  The list can be
    /// shorter than the limit when many pooled entries share a name.
    pub fn top_rated(games: &[Game]) -> ManufacturerView<Game> {
        ManufacturerView::from_fn(|m| {
            let subset = games
                .iter()
                .filter(|g| m == Manufacturer::All || g.manufacturer == m);
            top_rated_in(subset)
        })
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// The buckets a record contributes to: `All`, then its own manufacturer.
fn buckets(manufacturer: Manufacturer) -> impl Iterator<Item = Manufacturer> {
    std::iter::once(Manufacturer::All)
        .chain(Some(manufacturer).filter(|m| *m != Manufacturer::All))
}

fn top_rated_in<'a>(games: impl Iterator<Item = &'a Game>) -> Vec<Game> {
    let mut scored: Vec<(f64, &Game)> = games
        .filter_map(|g| g.rated_score().map(|score| (score, g)))
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut seen: HashSet<Option<&str>> = HashSet::new();
    let mut top = Vec::with_capacity(TOP_RATED_LIMIT);
    for (_, game) in scored.into_iter().take(TOP_RATED_POOL) {
        if top.len() == TOP_RATED_LIMIT {
            break;
        }
        // Unnamed records share the `None` key.
        if seen.insert(game.name.as_deref()) {
            top.push(game.clone());
        }
    }
    top
}

// ── Tests ─────────────────────────────────────────────────────────────────────
