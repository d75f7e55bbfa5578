// src/specs/layout.rs

use crate::report::ReportKind::{self, *};

/// Markers shared by every tab.
pub const TABLE_SELECTOR: &str = "table.tb_base.tb_dados";
pub const BODY_ROW_SELECTOR: &str = "tbody > tr";
pub const FOOTER_SELECTOR: &str = "tfoot.tb_total";
pub const PARENT_CLASS: &str = "tb_item";
pub const CHILD_CLASS: &str = "tb_subitem";

/// Per-report parsing rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableLayout {
    /// Cells a data row must have; anything else is skipped.
    pub columns: usize,
    /// Rows only open a parent when marked `tb_item`. Flat layouts treat every
    /// unmarked row as its own parent.
    pub hierarchical: bool,
    /// Normalize `1.234,56` style cells to numbers and drop all-placeholder rows.
    pub numeric: bool,
}

impl TableLayout {
    /// Third column ("value") present.
    pub fn has_value(&self) -> bool {
        self.columns == 3
    }
}

const HIERARCHICAL: TableLayout = TableLayout { columns: 2, hierarchical: true, numeric: false };
const TRADE: TableLayout = TableLayout { columns: 3, hierarchical: false, numeric: true };

pub fn layout_for(kind: ReportKind) -> &'static TableLayout {
    match kind {
        Production | Processing | Commercialization => &HIERARCHICAL,
        Import | Export => &TRADE,
    }
}
