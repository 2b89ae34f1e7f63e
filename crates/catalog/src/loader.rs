use crate::chunk::ChunkedParser;
use crate::named::southern_cross;
use crate::record::{MagnitudeRange, StarRecord};

/// Default batch size; large enough to amortize per-batch overhead, small
/// enough that a yield between batches keeps the UI responsive.
pub const DEFAULT_CHUNK_ROWS: usize = 1000;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LoaderConfig {
    pub range: MagnitudeRange,
    pub chunk_rows: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            range: MagnitudeRange::default(),
            chunk_rows: DEFAULT_CHUNK_ROWS,
        }
    }
}

/// Result of a full catalog load, bulk rows plus the named highlight stars.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCatalog {
    pub records: Vec<StarRecord>,
    pub rows_scanned: usize,
    pub rows_skipped: usize,
}

impl LoadedCatalog {
    /// Valid bulk rows, excluding the appended highlight stars.
    pub fn bulk_len(&self) -> usize {
        self.records.len() - self.highlight_len()
    }

    pub fn highlight_len(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.highlight.is_some())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Network or transport failure fetching the catalog text.
    Fetch(String),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Fetch(msg) => write!(f, "catalog fetch failed: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// One-pass load: parses every row and appends the Southern Cross stars.
///
/// Never fails on content — a catalog where every row is malformed still
/// yields the highlight stars. Whether that outcome warrants a fallback is
/// the caller's decision.
pub fn load_catalog(text: &str, config: &LoaderConfig) -> LoadedCatalog {
    let mut records = Vec::new();
    let mut rows_scanned = 0usize;

    for batch in ChunkedParser::new(text, config.range, config.chunk_rows) {
        rows_scanned = batch.rows_scanned;
        records.extend(batch.records);
    }

    let rows_skipped = rows_scanned - records.len();
    records.extend(southern_cross());

    LoadedCatalog {
        records,
        rows_scanned,
        rows_skipped,
    }
}
