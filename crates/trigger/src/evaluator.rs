//! Decision procedure: does this grid state warrant a notification?
//!
//! Pure given its inputs. Dispatching the notification (and logging the
//! outcome) is the notify crate's concern; this module only decides.

use std::fmt;

use serde::Serialize;

use sheetwatch_core::RedSet;

use crate::separator::{find_first_empty_row, is_row_red, COLOR_SCAN_COLUMNS};
use crate::source::{GridSource, SourceError};

/// Outcome of evaluating one grid snapshot. Row numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Every data row has content; nothing to do.
    NoSeparatorFound,
    /// A separator row exists but its background is not red.
    SeparatorNotRed { row: u32 },
    /// A red separator row: the one condition that fires the webhook.
    SeparatorRed { row: u32 },
}

impl Decision {
    pub fn should_notify(&self) -> bool {
        matches!(self, Decision::SeparatorRed { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::NoSeparatorFound => write!(f, "no separator row found"),
            Decision::SeparatorNotRed { row } => {
                write!(f, "separator at row {row} is not red")
            }
            Decision::SeparatorRed { row } => write!(f, "red separator at row {row}"),
        }
    }
}

/// Evaluate one snapshot: locate the first separator row, fetch its
/// backgrounds (first [`COLOR_SCAN_COLUMNS`] columns, fewer on narrow
/// grids), and test them against the red set.
///
/// Errors only surface from the grid source itself; the decision logic
/// cannot fail.
pub fn evaluate<S: GridSource>(source: &S, red: &RedSet) -> Result<Decision, SourceError> {
    let grid = source.data_range()?;

    let Some(row) = find_first_empty_row(&grid) else {
        tracing::debug!(last_row = grid.last_row(), "no separator row in used range");
        return Ok(Decision::NoSeparatorFound);
    };

    let num_cols = grid.width().min(COLOR_SCAN_COLUMNS);
    let colors = source.backgrounds(row, 1, num_cols)?;

    let decision = if is_row_red(&colors, red) {
        Decision::SeparatorRed { row }
    } else {
        Decision::SeparatorNotRed { row }
    };

    tracing::debug!(row, %decision, "separator evaluation complete");
    Ok(decision)
}
