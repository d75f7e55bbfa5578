// src/specs/table.rs
//! The table walk shared by all report kinds.
//!
//! Single pass over the body rows with an explicit accumulator: the items
//! finished so far plus the parent currently collecting sub-items. A parent
//! row flushes the pending parent and opens a new one; a child row attaches to
//! the pending parent or is dropped when there is none.

use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::core::html::{cell_text, has_class};
use crate::core::sanitize::{normalize_ws, parse_locale_number};
use crate::data::{Item, Quantity, ReportRecord, Subitem, Total};

use super::layout::*;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("data table `{0}` not found")]
    TableMissing(&'static str),

    #[error("cell {text:?} in row {row:?} is not a number")]
    BadNumber { row: String, text: String },

    #[error("invalid selector {0}")]
    Selector(String),
}

/// Result of reading a well-formed page.
#[derive(Clone, Debug, PartialEq)]
pub enum TableOutcome {
    /// Items in document order, optionally followed by one Total.
    Data(Vec<ReportRecord>),
    /// The table exists but holds nothing but placeholders (or no rows).
    NoData,
}

struct Selectors {
    table: Selector,
    row: Selector,
    cell: Selector,
    footer: Selector,
}

impl Selectors {
    fn new() -> Result<Self, ParseError> {
        Ok(Self {
            table: selector(TABLE_SELECTOR)?,
            row: selector(BODY_ROW_SELECTOR)?,
            cell: selector("td")?,
            footer: selector(FOOTER_SELECTOR)?,
        })
    }
}

fn selector(css: &str) -> Result<Selector, ParseError> {
    Selector::parse(css).map_err(|e| ParseError::Selector(format!("{css}: {e:?}")))
}

enum RowRole {
    Parent,
    Child,
}

/// Accumulator threaded through the row fold.
#[derive(Default)]
struct RowFold {
    items: Vec<Item>,
    current: Option<Item>,
}

impl RowFold {
    fn open(&mut self, item: Item) {
        if let Some(done) = self.current.replace(item) {
            self.items.push(done);
        }
    }

    fn finish(mut self) -> Vec<Item> {
        if let Some(done) = self.current.take() {
            self.items.push(done);
        }
        self.items
    }
}

pub fn parse_table(html: &str, layout: &TableLayout) -> Result<TableOutcome, ParseError> {
    let sel = Selectors::new()?;
    let doc = Html::parse_document(html);

    let table = doc
        .select(&sel.table)
        .next()
        .ok_or(ParseError::TableMissing(TABLE_SELECTOR))?;

    let items = table
        .select(&sel.row)
        .try_fold(RowFold::default(), |fold, row| step(fold, row, &sel, layout))?
        .finish();

    // Footer does not count towards "has data".
    if items.iter().all(Item::is_placeholder) {
        logd!("Table: {} item(s), all placeholders", items.len());
        return Ok(TableOutcome::NoData);
    }

    let mut records: Vec<ReportRecord> = items.into_iter().map(ReportRecord::Item).collect();
    if let Some(total) = read_footer(table, &sel, layout)? {
        records.push(ReportRecord::Total(total));
    }

    logd!("Table: {} record(s)", records.len());
    Ok(TableOutcome::Data(records))
}

fn step(mut fold: RowFold, row: ElementRef<'_>, sel: &Selectors, layout: &TableLayout) -> Result<RowFold, ParseError> {
    let cells: Vec<ElementRef<'_>> = row.select(&sel.cell).collect();
    if cells.len() != layout.columns {
        return Ok(fold);
    }

    let texts: Vec<String> = cells.iter().map(|c| cell_text(*c)).collect();
    if layout.numeric && texts[1..].iter().all(|t| is_placeholder(t)) {
        return Ok(fold);
    }

    let role = if has_class(cells[0], CHILD_CLASS) {
        RowRole::Child
    } else if has_class(cells[0], PARENT_CLASS) || !layout.hierarchical {
        RowRole::Parent
    } else {
        return Ok(fold);
    };

    let name = normalize_ws(&texts[0]);
    let quantity = to_quantity(&texts[1], &name, layout)?;

    match role {
        RowRole::Parent => {
            let value = if layout.has_value() {
                Some(to_quantity(&texts[2], &name, layout)?)
            } else {
                None
            };
            fold.open(Item::new(name, quantity, value));
        }
        RowRole::Child => match fold.current.as_mut() {
            Some(parent) => parent.subitems.push(Subitem { name, quantity }),
            None => logd!("Table: dropping sub-item {:?} with no parent row", name),
        },
    }

    Ok(fold)
}

fn read_footer(table: ElementRef<'_>, sel: &Selectors, layout: &TableLayout) -> Result<Option<Total>, ParseError> {
    let Some(tfoot) = table.select(&sel.footer).next() else {
        return Ok(None);
    };
    let Some(tr) = tfoot.children().filter_map(ElementRef::wrap).find(|e| e.value().name() == "tr") else {
        return Ok(None);
    };

    let texts: Vec<String> = tr.select(&sel.cell).map(cell_text).collect();
    if texts.len() != layout.columns {
        return Ok(None);
    }

    let total_overall = to_quantity(&texts[1], "Total", layout)?;
    let total_value = if layout.has_value() {
        Some(to_quantity(&texts[2], "Total", layout)?)
    } else {
        None
    };
    Ok(Some(Total { total_overall, total_value }))
}

fn to_quantity(text: &str, row: &str, layout: &TableLayout) -> Result<Quantity, ParseError> {
    if !layout.numeric {
        return Ok(Quantity::Text(s!(text)));
    }
    parse_locale_number(text)
        .map(Quantity::Number)
        .map_err(|text| ParseError::BadNumber { row: s!(row), text })
}

fn is_placeholder(text: &str) -> bool {
    text == crate::config::consts::PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportKind;

    fn page(body: &str, footer: &str) -> String {
        format!(
            "<html><body><table class=\"tb_base tb_dados\">\
             <thead><tr><th>Produto</th><th>Quantidade</th></tr></thead>\
             <tbody>{body}</tbody>{footer}</table></body></html>"
        )
    }

    fn item(name: &str, qty: &str) -> String {
        format!("<tr><td class=\"tb_item\">{name}</td><td class=\"tb_item\">{qty}</td></tr>")
    }

    fn sub(name: &str, qty: &str) -> String {
        format!("<tr><td class=\"tb_subitem\">{name}</td><td class=\"tb_subitem\">{qty}</td></tr>")
    }

    fn total(qty: &str) -> String {
        format!("<tfoot class=\"tb_total\"><tr><td>Total</td><td>{qty}</td></tr></tfoot>")
    }

    fn records(outcome: TableOutcome) -> Vec<ReportRecord> {
        match outcome {
            TableOutcome::Data(r) => r,
            TableOutcome::NoData => panic!("expected data"),
        }
    }

    fn hierarchical() -> &'static TableLayout {
        layout_for(ReportKind::Production)
    }

    #[test]
    fn groups_children_under_parents_and_appends_total() {
        let body = [
            item("VINHO DE MESA", "169.762.429"),
            sub("Tinto", "139.320.884"),
            sub("Branco", "27.910.299"),
            item("SUCO", "1.000"),
            item("DERIVADOS", "-"),
            sub("Bagaceira", "-"),
        ]
        .concat();
        let recs = records(parse_table(&page(&body, &total("170.763.429")), hierarchical()).unwrap());

        assert_eq!(recs.len(), 4);
        let first = recs[0].as_item().unwrap();
        assert_eq!(first.name, "VINHO DE MESA");
        assert_eq!(first.quantity, Quantity::Text("169.762.429".into()));
        assert_eq!(first.subitems.len(), 2);
        assert_eq!(first.subitems[1].name, "Branco");
        assert!(recs[1].as_item().unwrap().subitems.is_empty());
        assert_eq!(recs[2].as_item().unwrap().subitems.len(), 1);
        assert_eq!(
            recs[3].as_total().unwrap().total_overall,
            Quantity::Text("170.763.429".into())
        );
    }

    #[test]
    fn child_before_any_parent_is_dropped() {
        let body = [sub("Orphan", "5"), item("VINHO", "10"), sub("Tinto", "10")].concat();
        let recs = records(parse_table(&page(&body, ""), hierarchical()).unwrap());
        assert_eq!(recs.len(), 1);
        let it = recs[0].as_item().unwrap();
        assert_eq!(it.subitems.len(), 1);
        assert_eq!(it.subitems[0].name, "Tinto");
    }

    #[test]
    fn rows_with_wrong_cell_count_or_no_marker_are_skipped() {
        let body = [
            s!("<tr><td class=\"tb_item\">Broken</td></tr>"),
            s!("<tr><td>Unmarked</td><td>3</td></tr>"),
            item("VINHO", "10"),
        ]
        .concat();
        let recs = records(parse_table(&page(&body, ""), hierarchical()).unwrap());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].as_item().unwrap().name, "VINHO");
    }

    #[test]
    fn all_placeholders_is_no_data_even_with_numeric_total() {
        let body = [item("VINHO", "-"), sub("Tinto", "-"), item("SUCO", "-")].concat();
        let out = parse_table(&page(&body, &total("1.234")), hierarchical()).unwrap();
        assert_eq!(out, TableOutcome::NoData);
    }

    #[test]
    fn empty_body_is_no_data() {
        let out = parse_table(&page("", &total("0")), hierarchical()).unwrap();
        assert_eq!(out, TableOutcome::NoData);
    }

    #[test]
    fn n_parents_and_footer_give_n_items_then_total() {
        let body: String = (0..7).map(|i| item(&format!("P{i}"), &i.to_string())).collect();
        let recs = records(parse_table(&page(&body, &total("21")), hierarchical()).unwrap());
        assert_eq!(recs.len(), 8);
        for (i, r) in recs[..7].iter().enumerate() {
            assert_eq!(r.as_item().unwrap().name, format!("P{i}"));
        }
        assert!(recs[7].as_total().is_some());
    }

    #[test]
    fn missing_table_is_malformed() {
        let err = parse_table("<html><table class=\"tb_base\"></table></html>", hierarchical()).unwrap_err();
        assert!(matches!(err, ParseError::TableMissing(_)));
    }

    #[test]
    fn footer_with_wrong_width_is_ignored() {
        let body = item("VINHO", "10");
        let footer = "<tfoot class=\"tb_total\"><tr><td>Total</td></tr></tfoot>";
        let recs = records(parse_table(&page(&body, footer), hierarchical()).unwrap());
        assert_eq!(recs.len(), 1);
    }

    fn trade_row(country: &str, qty: &str, value: &str) -> String {
        format!("<tr><td>{country}</td><td>{qty}</td><td>{value}</td></tr>")
    }

    #[test]
    fn trade_rows_are_normalized_and_dash_rows_skipped() {
        let layout = layout_for(ReportKind::Import);
        let body = [
            trade_row("Africa do Sul", "-", "-"),
            trade_row("Alemanha", "1.234,56", "5.000"),
            trade_row("Argentina", "-", "12"),
        ]
        .concat();
        let footer = "<tfoot class=\"tb_total\"><tr><td>Total</td><td>1.234,56</td><td>5.012</td></tr></tfoot>";
        let recs = records(parse_table(&page(&body, footer), layout).unwrap());

        assert_eq!(recs.len(), 3);
        let de = recs[0].as_item().unwrap();
        assert_eq!(de.name, "Alemanha");
        assert_eq!(de.quantity, Quantity::Number(Some(1234.56)));
        assert_eq!(de.value, Some(Quantity::Number(Some(5000.0))));
        let ar = recs[1].as_item().unwrap();
        assert_eq!(ar.quantity, Quantity::Number(None));
        let t = recs[2].as_total().unwrap();
        assert_eq!(t.total_value, Some(Quantity::Number(Some(5012.0))));
    }

    #[test]
    fn trade_table_of_only_dashes_is_no_data() {
        let layout = layout_for(ReportKind::Export);
        let body = [trade_row("A", "-", "-"), trade_row("B", "-", "-")].concat();
        let footer = "<tfoot class=\"tb_total\"><tr><td>Total</td><td>0</td><td>0</td></tr></tfoot>";
        assert_eq!(parse_table(&page(&body, footer), layout).unwrap(), TableOutcome::NoData);
    }

    #[test]
    fn trade_footer_rows_are_not_items() {
        let layout = layout_for(ReportKind::Export);
        let footer = "<tfoot class=\"tb_total\"><tr><td>Total</td><td>10</td><td>20</td></tr></tfoot>";
        let recs = records(parse_table(&page(&trade_row("Chile", "10", "20"), footer), layout).unwrap());
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].as_item().unwrap().name, "Chile");
    }

    #[test]
    fn garbage_number_is_an_error() {
        let layout = layout_for(ReportKind::Import);
        let err = parse_table(&page(&trade_row("Chile", "n/d", "1"), ""), layout).unwrap_err();
        assert!(matches!(err, ParseError::BadNumber { .. }));
    }
}
