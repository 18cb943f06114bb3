//! Separator scan primitives.
//!
//! A "separator row" is a fully empty row used by convention to delimit
//! groups of records. Detection is a single top-to-bottom pass; the
//! header row (index 0) is never a candidate.

use sheetwatch_core::{Grid, RedSet};

/// Only the first 10 columns of a candidate row are inspected for
/// background color. Upstream constraint: a red marker beyond column 10
/// is not observed.
pub const COLOR_SCAN_COLUMNS: usize = 10;

/// Find the first fully-empty row below the header.
///
/// Returns the 1-based row number, or `None` when every data row has at
/// least one non-empty cell. Single pass, no side effects.
pub fn find_first_empty_row(grid: &Grid) -> Option<u32> {
    for (idx, row) in grid.rows().iter().enumerate().skip(1) {
        if row.iter().all(|cell| cell.is_empty()) {
            return Some(idx as u32 + 1);
        }
    }
    None
}

/// True iff at least one color token in the row belongs to the red set.
///
/// Callers pass the already-truncated color row (first
/// [`COLOR_SCAN_COLUMNS`] columns). Un-colored cells come through as
/// empty strings or `#ffffff` and never match.
pub fn is_row_red(colors: &[String], red: &RedSet) -> bool {
    colors.iter().any(|c| red.contains(c))
}
