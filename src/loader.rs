use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::{ExplorerError, Result};
use crate::models::CollisionTable;
use crate::readers::CollisionReader;

/// Memoizing loader for the collision dataset.
///
/// The first `load` per distinct row limit reads and normalizes the source
/// file; subsequent calls with the same limit return the cached table without
/// touching the source. The source file is assumed immutable for the process
/// lifetime, so entries are never invalidated or evicted.
///
/// Cached tables are shared behind `Arc`, which settles the aliasing question
/// for cached results: callers get an immutable view and cannot mutate the
/// entry out from under the cache. Pass the loader to whatever needs data
/// rather than reaching for a global.
pub struct DatasetLoader {
    source: PathBuf,
    reader: CollisionReader,
    cache: Mutex<HashMap<usize, Arc<CollisionTable>>>,
    source_reads: AtomicUsize,
}

impl DatasetLoader {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            reader: CollisionReader::new(),
            cache: Mutex::new(HashMap::new()),
            source_reads: AtomicUsize::new(0),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Load at most `row_limit` normalized rows, memoized per limit.
    ///
    /// `row_limit` must be positive; zero is rejected with
    /// `ExplorerError::InvalidRowLimit` (the unsigned type already rules out
    /// negative limits).
    pub fn load(&self, row_limit: usize) -> Result<Arc<CollisionTable>> {
        if row_limit == 0 {
            return Err(ExplorerError::InvalidRowLimit(row_limit));
        }

        // One lock over check-and-populate: the key space is tiny and holding
        // it across the miss gives at-most-once parsing per limit under
        // concurrent callers.
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(table) = cache.get(&row_limit) {
            debug!(rows = row_limit, "cache hit, skipping source read");
            return Ok(Arc::clone(table));
        }

        info!(
            rows = row_limit,
            source = %self.source.display(),
            "loading collision data"
        );
        self.source_reads.fetch_add(1, Ordering::Relaxed);

        let table = Arc::new(self.reader.read_collisions(&self.source, row_limit)?);
        cache.insert(row_limit, Arc::clone(&table));

        Ok(table)
    }

    /// Number of times the source file has been read. Stays flat across
    /// repeated loads with the same row limit.
    pub fn source_reads(&self) -> usize {
        self.source_reads.load(Ordering::Relaxed)
    }
}
