//! Grid source abstraction over the host spreadsheet's read surface.
//!
//! The evaluation logic never talks to a spreadsheet host directly; it
//! reads through [`GridSource`]. The host-side trigger exports a JSON
//! snapshot of values and backgrounds at event time, and
//! [`JsonSnapshot`] serves that document back through the trait.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use sheetwatch_core::Grid;

/// Failures reading the grid or its backgrounds from the host.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("row {row} is outside the snapshot's used range (last row {last_row})")]
    RowOutOfRange { row: u32, last_row: usize },
}

/// Read surface the host spreadsheet platform supplies.
///
/// Mirrors the host calls one-to-one: used-range extent, the value
/// grid, and per-row background colors. `row` is 1-based throughout,
/// matching spreadsheet conventions.
pub trait GridSource {
    /// Number of rows in the used range, header included.
    fn last_row(&self) -> Result<usize, SourceError>;

    /// The full value grid for the used range.
    fn data_range(&self) -> Result<Grid, SourceError>;

    /// Background color tokens for `num_cols` cells of a row, starting
    /// at 1-based column `start_col`. Un-colored cells are reported as
    /// empty strings.
    fn backgrounds(
        &self,
        row: u32,
        start_col: usize,
        num_cols: usize,
    ) -> Result<Vec<String>, SourceError>;
}

// ── JSON snapshot source ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SnapshotDoc {
    values: Vec<Vec<sheetwatch_core::CellValue>>,
    #[serde(default)]
    backgrounds: Vec<Vec<String>>,
}

/// A [`GridSource`] backed by a snapshot document exported from the
/// host at trigger time: `{"values": [[...]], "backgrounds": [[...]]}`.
///
/// `backgrounds` is row-aligned with `values`; rows the exporter left
/// out read as un-colored.
#[derive(Debug)]
pub struct JsonSnapshot {
    grid: Grid,
    backgrounds: Vec<Vec<String>>,
}

impl JsonSnapshot {
    /// Parse a snapshot from its JSON text.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let doc: SnapshotDoc = serde_json::from_str(json)?;
        Ok(Self {
            grid: Grid::new(doc.values),
            backgrounds: doc.backgrounds,
        })
    }

    /// Read and parse a snapshot file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl GridSource for JsonSnapshot {
    fn last_row(&self) -> Result<usize, SourceError> {
        Ok(self.grid.last_row())
    }

    fn data_range(&self) -> Result<Grid, SourceError> {
        Ok(self.grid.clone())
    }

    fn backgrounds(
        &self,
        row: u32,
        start_col: usize,
        num_cols: usize,
    ) -> Result<Vec<String>, SourceError> {
        let last_row = self.grid.last_row();
        let idx = (row as usize)
            .checked_sub(1)
            .filter(|i| *i < last_row)
            .ok_or(SourceError::RowOutOfRange { row, last_row })?;

        let row_colors: &[String] = self
            .backgrounds
            .get(idx)
            .map(|r| r.as_slice())
            .unwrap_or(&[]);

        let start = start_col.saturating_sub(1);
        let mut colors: Vec<String> = row_colors
            .iter()
            .skip(start)
            .take(num_cols)
            .cloned()
            .collect();

        // Pad to the requested width so callers see one token per cell.
        colors.resize(num_cols, String::new());
        Ok(colors)
    }
}
