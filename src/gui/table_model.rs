// src/gui/table_model.rs
//! TableData: flattened rows of one report, ready for the table widget.
//!
//! The records stay the source of truth; this is rebuilt whenever the tab,
//! the loaded records, or the "collapse sub-items" toggle change.

use crate::data::{to_rows, ReportRecord, TABLE_HEADERS};

/// Column holding the sub-item name; non-empty marks a child row.
pub const SUBITEM_COL: usize = 1;

/// Columns rendered right-aligned.
pub const NUMERIC_COLS: [usize; 2] = [2, 3];

#[derive(Clone, Debug, Default)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn empty() -> Self {
        Self {
            headers: TABLE_HEADERS.iter().map(|h| s!(*h)).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_records(records: &[ReportRecord], collapse_subitems: bool) -> Self {
        let mut rows = to_rows(records);
        if collapse_subitems {
            rows.retain(|r| !is_subitem_row(r));
        }
        Self { rows, ..Self::empty() }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn ncols(&self) -> usize {
        self.headers.len()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }
}

pub fn is_subitem_row(row: &[String]) -> bool {
    row.get(SUBITEM_COL).is_some_and(|c| !c.is_empty())
}
