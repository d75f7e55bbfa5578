// src/export.rs
//
// Records → CSV / TSV / JSON text.
//
// Delimited output is the flattened table view (`data::to_rows`); JSON is the
// record sequence itself. Multi-year output adds a leading `Year` column or,
// for JSON, an object keyed by year.

use csv::{QuoteStyle, WriterBuilder};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::options::ExportFormat;
use crate::data::{to_rows, ReportRecord, TABLE_HEADERS};
use crate::report::ReportKind;
use crate::specs::layout_for;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export buffer: {0}")]
    Buffer(String),
}

/// Write rows with the given delimiter; fields are quoted only when needed.
pub fn to_delimited_string(
    headers: Option<&[&str]>,
    rows: &[Vec<String>],
    delimiter: u8,
) -> Result<String, ExportError> {
    let mut w = WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Necessary)
        .flexible(true)
        .from_writer(Vec::new());

    if let Some(h) = headers {
        w.write_record(h)?;
    }
    for r in rows {
        w.write_record(r)?;
    }

    let buf = w.into_inner().map_err(|e| ExportError::Buffer(e.to_string()))?;
    Ok(String::from_utf8(buf).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

/// JSON view of one record list. Trade reports name their rows by country.
pub fn to_json_value(kind: ReportKind, records: &[ReportRecord]) -> Result<Value, ExportError> {
    let mut value = serde_json::to_value(records)?;
    if layout_for(kind).numeric {
        if let Value::Array(items) = &mut value {
            for obj in items.iter_mut().filter_map(Value::as_object_mut) {
                if let Some(name) = obj.remove("product") {
                    obj.insert(s!("country"), name);
                }
                // Trade tables never carry sub-items.
                obj.remove("subproducts");
            }
        }
    }
    Ok(value)
}

/// Render one year's records.
pub fn render(
    kind: ReportKind,
    records: &[ReportRecord],
    format: ExportFormat,
    include_headers: bool,
) -> Result<String, ExportError> {
    match format.delimiter() {
        Some(delim) => {
            let headers = include_headers.then_some(&TABLE_HEADERS[..]);
            to_delimited_string(headers, &to_rows(records), delim)
        }
        None => Ok(serde_json::to_string_pretty(&to_json_value(kind, records)?)?),
    }
}

/// Render several years in one document.
pub fn render_batch(
    kind: ReportKind,
    years: &[(i32, Vec<ReportRecord>)],
    format: ExportFormat,
    include_headers: bool,
) -> Result<String, ExportError> {
    match format.delimiter() {
        Some(delim) => {
            let mut rows = Vec::new();
            for (year, records) in years {
                let y = year.to_string();
                rows.extend(to_rows(records).into_iter().map(|mut r| {
                    r.insert(0, y.clone());
                    r
                }));
            }
            let mut headers = vec!["Year"];
            headers.extend_from_slice(&TABLE_HEADERS);
            to_delimited_string(include_headers.then_some(&headers[..]), &rows, delim)
        }
        None => {
            let mut map = Map::new();
            for (year, records) in years {
                map.insert(year.to_string(), to_json_value(kind, records)?);
            }
            Ok(serde_json::to_string_pretty(&Value::Object(map))?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Item, Quantity, Subitem, Total};

    fn wine() -> Vec<ReportRecord> {
        let mut it = Item::new(s!("Vinho de Mesa"), Quantity::Text(s!("1.000")), None);
        it.subitems.push(Subitem { name: s!("Tinto, seco"), quantity: Quantity::Text(s!("600")) });
        vec![
            ReportRecord::Item(it),
            ReportRecord::Total(Total { total_overall: Quantity::Text(s!("1.000")), total_value: None }),
        ]
    }

    #[test]
    fn csv_quotes_only_when_needed() {
        let out = render(ReportKind::Production, &wine(), ExportFormat::Csv, true).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Product,Subproduct,Quantity,Value");
        assert_eq!(lines[1], "Vinho de Mesa,,1.000,");
        assert_eq!(lines[2], "Vinho de Mesa,\"Tinto, seco\",600,");
        assert_eq!(lines[3], "Total,,1.000,");
    }

    #[test]
    fn tsv_without_headers() {
        let out = render(ReportKind::Production, &wine(), ExportFormat::Tsv, false).unwrap();
        assert!(out.starts_with("Vinho de Mesa\t\t1.000\t\n"));
    }

    #[test]
    fn trade_json_uses_country() {
        let recs = vec![ReportRecord::Item(Item::new(
            s!("Chile"),
            Quantity::Number(Some(10.0)),
            Some(Quantity::Number(Some(25.5))),
        ))];
        let v = to_json_value(ReportKind::Import, &recs).unwrap();
        assert_eq!(v[0]["country"], "Chile");
        assert!(v[0].get("product").is_none());
        assert!(v[0].get("subproducts").is_none());
        assert_eq!(v[0]["value"], 25.5);
    }

    #[test]
    fn batch_prefixes_year() {
        let out = render_batch(
            ReportKind::Production,
            &[(2021, wine()), (2022, wine())],
            ExportFormat::Csv,
            true,
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Year,Product,Subproduct,Quantity,Value");
        assert_eq!(lines[1], "2021,Vinho de Mesa,,1.000,");
        assert_eq!(lines[4], "2022,Vinho de Mesa,,1.000,");
        assert_eq!(lines.len(), 7);

        let json = render_batch(ReportKind::Production, &[(2021, wine())], ExportFormat::Json, true).unwrap();
        let v: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["2021"][0]["product"], "Vinho de Mesa");
        assert_eq!(v["2021"][0]["subproducts"][0]["product"], "Tinto, seco");
    }
}
