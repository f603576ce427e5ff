//! Identity-keyed view cache for the dashboard runtime.
//!
//! The four aggregations are pure functions of the record set, so they only
//! need recomputing when the records change.  [`DataManager`] tags every
//! loaded [`Dataset`] with a process-unique [`DatasetId`] and keeps a single
//! cached [`DashboardViews`] bundle keyed by that id.  Switching manufacturer
//! in the UI never touches the cache; only [`DataManager::reload`] (a new
//! identity) or [`DataManager::invalidate_cache`] cause a recompute.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use sales_core::error::Result;
use sales_core::models::Game;
use sales_data::analysis::{build_views, load_games, DashboardViews};
use sales_data::reader::DataSource;

static NEXT_DATASET_ID: AtomicU64 = AtomicU64::new(1);

// ── Dataset ───────────────────────────────────────────────────────────────────

/// Identity of one loaded record set.  Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatasetId(u64);

impl DatasetId {
    fn next() -> Self {
        Self(NEXT_DATASET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An immutable, shareable set of normalized records.
#[derive(Debug, Clone)]
pub struct Dataset {
    id: DatasetId,
    games: Arc<[Game]>,
}

impl Dataset {
    /// Wrap `games` under a fresh identity.
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            id: DatasetId::next(),
            games: games.into(),
        }
    }

    pub fn id(&self) -> DatasetId {
        self.id
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

// ── CacheStats ────────────────────────────────────────────────────────────────

/// Hit/miss counters for the view cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Owns the dataset source, the current dataset and its cached views.
///
/// # Example
/// ```no_run
/// use sales_runtime::data_manager::DataManager;
/// use sales_runtime::data::reader::DataSource;
/// use sales_runtime::core::models::Manufacturer;
///
/// let mut mgr = DataManager::new(DataSource::Bundled);
/// let views = mgr.views().expect("bundled data");
/// println!("{} genres", views.releases_by_genre.get(Manufacturer::All).len());
/// ```
pub struct DataManager {
    /// Where records are read from.
    source: DataSource,
    /// Most recently loaded record set.
    dataset: Option<Dataset>,
    /// Views for the dataset whose id is stored alongside them.
    cache: Option<(DatasetId, Arc<DashboardViews>)>,
    stats: CacheStats,
    /// Human-readable description of the last load error.
    last_error: Option<String>,
}

impl DataManager {
    /// Create a manager for `source`.  Nothing is read until [`load`] or
    /// [`views`] is called.
    ///
    /// [`load`]: DataManager::load
    /// [`views`]: DataManager::views
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            dataset: None,
            cache: None,
            stats: CacheStats::default(),
            last_error: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Read and normalize the source, replacing the current dataset.
    ///
    /// On failure the previous dataset (if any) stays in place and the error
    /// is recorded in [`last_error`](DataManager::last_error).
    pub fn load(&mut self) -> Result<&Dataset> {
        match load_games(&self.source) {
            Ok(games) => {
                let dataset = Dataset::new(games);
                tracing::debug!(
                    id = %dataset.id(),
                    records = dataset.len(),
                    source = %self.source.describe(),
                    "dataset loaded"
                );
                self.last_error = None;
                Ok(self.dataset.insert(dataset))
            }
            Err(e) => {
                tracing::warn!(error = %e, "dataset load failed; keeping previous data");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Re-read the source.  A successful reload yields a new dataset identity,
    /// so the next [`views`](DataManager::views) call recomputes.
    pub fn reload(&mut self) -> Result<DatasetId> {
        tracing::info!(source = %self.source.describe(), "reloading dataset");
        self.load().map(Dataset::id)
    }

    /// Views for the current dataset, loading it first if necessary.
    ///
    /// Returns the cached bundle when it was built from the current dataset
    /// identity; otherwise runs the aggregators and caches the result.
    pub fn views(&mut self) -> Result<Arc<DashboardViews>> {
        let dataset = match &self.dataset {
            Some(dataset) => dataset.clone(),
            None => self.load()?.clone(),
        };

        if let Some((id, views)) = &self.cache {
            if *id == dataset.id() {
                self.stats.hits += 1;
                tracing::debug!(
                    id = %id,
                    hits = self.stats.hits,
                    misses = self.stats.misses,
                    "view cache hit"
                );
                return Ok(Arc::clone(views));
            }
        }

        self.stats.misses += 1;
        let views = Arc::new(build_views(dataset.games()));
        tracing::debug!(
            id = %dataset.id(),
            hits = self.stats.hits,
            misses = self.stats.misses,
            "view cache miss; views rebuilt"
        );
        self.cache = Some((dataset.id(), Arc::clone(&views)));
        Ok(views)
    }

    /// Drop the cached views, forcing the next [`views`](DataManager::views)
    /// call to recompute from the current dataset.
    pub fn invalidate_cache(&mut self) {
        self.cache = None;
        tracing::debug!("view cache invalidated");
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.stats
    }

    /// Human-readable description of the last load error, or `None`.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use sales_core::error::SalesError;
    use sales_core::models::Manufacturer;
    use std::path::Path;

    fn write_records(path: &Path, records: &[(&str, &str, f64)]) {
        let rows: Vec<serde_json::Value> = records
            .iter()
            .map(|(name, platform, na)| {
                serde_json::json!({
                    "name": name,
                    "platform": platform,
                    "yearOfRelease": 2010,
                    "genre": "Action",
                    "naSales": na,
                    "criticScore": 80
                })
            })
            .collect();
        std::fs::write(path, serde_json::to_string(&rows).unwrap()).unwrap();
    }

    fn manager_with_file(records: &[(&str, &str, f64)]) -> (DataManager, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("games.json");
        write_records(&path, records);
        (DataManager::new(DataSource::Path(path)), dir)
    }

    // ── identity ──────────────────────────────────────────────────────────

    #[test]
    fn test_dataset_ids_are_unique() {
        let a = Dataset::new(Vec::new());
        let b = Dataset::new(Vec::new());
        assert_ne!(a.id(), b.id());
        assert!(a.is_empty());
    }

    #[test]
    fn test_cloned_dataset_keeps_identity() {
        let a = Dataset::new(Vec::new());
        let b = a.clone();
        assert_eq!(a.id(), b.id());
    }

    // ── caching ───────────────────────────────────────────────────────────

    #[test]
    fn test_views_loads_lazily_then_hits_cache() {
        let (mut mgr, _dir) = manager_with_file(&[("A", "PS4", 1.0)]);
        assert!(mgr.dataset().is_none());

        let first = mgr.views().unwrap();
        let second = mgr.views().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(mgr.cache_stats(), CacheStats { hits: 1, misses: 1 });
        assert_eq!(mgr.dataset().map(Dataset::len), Some(1));
    }

    #[test]
    fn test_invalidate_cache_forces_recompute() {
        let (mut mgr, _dir) = manager_with_file(&[("A", "PS4", 1.0)]);
        let first = mgr.views().unwrap();
        mgr.invalidate_cache();
        let second = mgr.views().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(mgr.cache_stats().misses, 2);
        assert_eq!(first.releases_by_genre, second.releases_by_genre);
    }

    #[test]
    fn test_reload_picks_up_new_records() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        write_records(&path, &[("A", "PS4", 1.0)]);
        let mut mgr = DataManager::new(DataSource::Path(path.clone()));

        let before = mgr.views().unwrap();
        let first_id = mgr.dataset().unwrap().id();

        write_records(&path, &[("A", "PS4", 1.0), ("B", "XOne", 2.0)]);
        let new_id = mgr.reload().unwrap();
        assert_ne!(first_id, new_id);

        let after = mgr.views().unwrap();
        assert_eq!(before.metadata.records, 1);
        assert_eq!(after.metadata.records, 2);
        assert_eq!(after.releases_by_year.get(Manufacturer::Microsoft).len(), 1);
        assert_eq!(mgr.cache_stats().misses, 2);
    }

    #[test]
    fn test_reload_failure_keeps_previous_data() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        write_records(&path, &[("A", "PS4", 1.0)]);
        let mut mgr = DataManager::new(DataSource::Path(path.clone()));

        let before = mgr.views().unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(mgr.reload().is_err());
        assert!(mgr.last_error().is_some());

        let after = mgr.views().unwrap();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(mgr.cache_stats().hits, 1);
    }

    #[test]
    fn test_successful_reload_clears_last_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        let mut mgr = DataManager::new(DataSource::Path(path.clone()));

        assert!(mgr.load().is_err());
        assert!(mgr.last_error().is_some());
        assert!(mgr.dataset().is_none());

        write_records(&path, &[("A", "PS4", 1.0)]);
        mgr.reload().unwrap();
        assert!(mgr.last_error().is_none());
        assert_eq!(mgr.dataset().map(Dataset::len), Some(1));
    }

    #[test]
    fn test_views_after_failed_first_load_retries_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("games.json");
        let mut mgr = DataManager::new(DataSource::Path(path.clone()));

        let err = mgr.views().unwrap_err();
        assert!(matches!(err, SalesError::DataPathNotFound(_)));

        write_records(&path, &[("A", "PS4", 1.0), ("B", "Wii", 2.0)]);
        let views = mgr.views().unwrap();
        assert_eq!(views.metadata.records, 2);
        assert_eq!(mgr.cache_stats(), CacheStats { hits: 0, misses: 1 });
    }

    #[test]
    fn test_views_error_without_any_data() {
        let mut mgr = DataManager::new(DataSource::Path("/nonexistent/games.json".into()));
        assert!(mgr.views().is_err());
        assert_eq!(mgr.cache_stats(), CacheStats::default());
    }

    #[test]
    fn test_bundled_source() {
        let mut mgr = DataManager::new(DataSource::Bundled);
        let views = mgr.views().unwrap();
        assert_eq!(views.metadata.records, 49);
        assert_eq!(mgr.source(), &DataSource::Bundled);
    }
}
