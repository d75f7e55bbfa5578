// src/data.rs
//
// Parsed report records.
//
// - Quantity: a cell value, either kept verbatim (hierarchical reports) or
//             normalized to a number (import/export).
// - ReportRecord: Item (with ordered sub-items) or the single trailing Total.
//
// Records are built fresh per request and never mutated after they are
// handed back to the caller.

use serde::Serialize;

use crate::config::consts::PLACEHOLDER;

/// A numeric cell as the report exposes it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    /// Source formatting kept as-is (`"1.234.567"`, `"-"`, ...).
    Text(String),
    /// Locale-normalized number; `None` for the placeholder.
    Number(Option<f64>),
}

impl Quantity {
    /// True when the cell carried the "no value" placeholder.
    pub fn is_placeholder(&self) -> bool {
        match self {
            Quantity::Text(t)   => t == PLACEHOLDER,
            Quantity::Number(n) => n.is_none(),
        }
    }

    /// Display/export text. Placeholders render as `-`.
    pub fn display(&self) -> String {
        match self {
            Quantity::Text(t)         => t.clone(),
            Quantity::Number(Some(n)) => n.to_string(),
            Quantity::Number(None)    => s!(PLACEHOLDER),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Subitem {
    #[serde(rename = "product")]
    pub name: String,
    pub quantity: Quantity,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Item {
    #[serde(rename = "product")]
    pub name: String,
    pub quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Quantity>,
    #[serde(rename = "subproducts")]
    pub subitems: Vec<Subitem>,
}

impl Item {
    pub fn new(name: String, quantity: Quantity, value: Option<Quantity>) -> Self {
        Self { name, quantity, value, subitems: Vec::new() }
    }

    /// Every cell of this item (and its sub-items) is the placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.quantity.is_placeholder()
            && self.value.as_ref().is_none_or(Quantity::is_placeholder)
            && self.subitems.iter().all(|s| s.quantity.is_placeholder())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Total {
    pub total_overall: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Quantity>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRecord {
    Item(Item),
    Total(Total),
}

impl ReportRecord {
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            ReportRecord::Item(it) => Some(it),
            ReportRecord::Total(_) => None,
        }
    }

    pub fn as_total(&self) -> Option<&Total> {
        match self {
            ReportRecord::Total(t) => Some(t),
            ReportRecord::Item(_)  => None,
        }
    }
}

/// Column names of the flattened table view (GUI + CSV/TSV export).
pub const TABLE_HEADERS: [&str; 4] = ["Product", "Subproduct", "Quantity", "Value"];

/// Flatten records into display rows: one row per item, one per sub-item
/// (repeating the parent name), and a final `Total` row.
pub fn to_rows(records: &[ReportRecord]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for rec in records {
        match rec {
            ReportRecord::Item(it) => {
                let value = it.value.as_ref().map(Quantity::display).unwrap_or_default();
                rows.push(vec![it.name.clone(), s!(), it.quantity.display(), value]);
                for sub in &it.subitems {
                    rows.push(vec![it.name.clone(), sub.name.clone(), sub.quantity.display(), s!()]);
                }
            }
            ReportRecord::Total(t) => {
                let value = t.total_value.as_ref().map(Quantity::display).unwrap_or_default();
                rows.push(vec![s!("Total"), s!(), t.total_overall.display(), value]);
            }
        }
    }
    rows
}
