use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as captured in a snapshot.
///
/// Source data arrives as JSON, so the variants mirror JSON scalars.
/// `Empty` covers JSON `null` (a cell the host never wrote).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// True for the empty-string and null markers the separator scan
    /// treats as "no content". Numbers and booleans always count as
    /// content, including `0` and `false`.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) => false,
        }
    }
}

/// A rectangular grid of cell values. Row 0 is the header row and is
/// never inspected for emptiness.
///
/// Rows are 0-indexed internally; every externally reported row number
/// is 1-based to match spreadsheet conventions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    /// Number of rows in the used range, header included.
    pub fn last_row(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Fetch a row by 1-based row number.
    pub fn row(&self, row_number: u32) -> Option<&[CellValue]> {
        let idx = (row_number as usize).checked_sub(1)?;
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// Width of the widest row. Snapshots from ragged sources may have
    /// rows of differing lengths.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }
}

impl From<Vec<Vec<CellValue>>> for Grid {
    fn from(rows: Vec<Vec<CellValue>>) -> Self {
        Self::new(rows)
    }
}
