use crate::parse::parse_row;
use crate::record::{MagnitudeRange, StarRecord};

/// One parsed batch of catalog rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub records: Vec<StarRecord>,
    /// Data rows consumed so far, valid or not.
    pub rows_scanned: usize,
    /// 0–100, suitable for a host loading indicator.
    pub progress_pct: f32,
}

/// Batch iterator over a catalog text.
///
/// Processing tens of thousands of rows in one go would block the UI thread,
/// so the caller consumes batches and yields to its scheduler between them.
/// Chunking is purely cooperative: any chunk size produces the same set of
/// valid records as a single pass.
#[derive(Debug, Clone)]
pub struct ChunkedParser<'a> {
    lines: std::str::Lines<'a>,
    range: MagnitudeRange,
    chunk_rows: usize,
    data_rows: usize,
    scanned: usize,
}

impl<'a> ChunkedParser<'a> {
    /// The first line is the header and is discarded.
    pub fn new(text: &'a str, range: MagnitudeRange, chunk_rows: usize) -> Self {
        let mut lines = text.lines();
        let _header = lines.next();
        let data_rows = lines.clone().count();

        Self {
            lines,
            range,
            chunk_rows: chunk_rows.max(1),
            data_rows,
            scanned: 0,
        }
    }

    pub fn data_rows(&self) -> usize {
        self.data_rows
    }
}

impl Iterator for ChunkedParser<'_> {
    type Item = Batch;

    fn next(&mut self) -> Option<Batch> {
        let mut records = Vec::new();
        let mut consumed = 0usize;

        while consumed < self.chunk_rows {
            let Some(line) = self.lines.next() else {
                break;
            };
            consumed += 1;
            if let Some(rec) = parse_row(line, &self.range) {
                records.push(rec);
            }
        }

        if consumed == 0 {
            return None;
        }

        self.scanned += consumed;
        let progress_pct = if self.data_rows == 0 {
            100.0
        } else {
            (self.scanned as f32 / self.data_rows as f32 * 100.0).min(100.0)
        };

        Some(Batch {
            records,
            rows_scanned: self.scanned,
            progress_pct,
        })
    }
}
