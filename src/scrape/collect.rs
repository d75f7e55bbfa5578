// src/scrape/collect.rs
use crate::{
    core::Fetch,
    data::ReportRecord,
    progress::Progress,
    report::ReportKind,
};

use super::resolve::{plan, ReportError, Resolver};

/// Result of a multi-year run. Years are resolved one after another, in the
/// order given; a failing year does not stop the rest.
#[derive(Debug, Default)]
pub struct Batch {
    pub done: Vec<(i32, Vec<ReportRecord>)>,
    pub failed: Vec<(i32, ReportError)>,
}

impl Batch {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Resolve the same report for several years.
///
/// The category is validated once up front, so an invalid category fails the
/// whole batch before any page is read.
pub fn collect_years<F: Fetch>(
    resolver: &Resolver<F>,
    kind: ReportKind,
    years: &[i32],
    category: Option<&str>,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Batch, ReportError> {
    let first = years.first().copied().unwrap_or_default();
    plan(resolver.base_url(), kind, first, category)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(years.len());
    }

    let mut batch = Batch::default();
    for &year in years {
        match resolver.resolve(kind, year, category) {
            Ok(records) => {
                batch.done.push((year, records));
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(year);
                }
            }
            Err(e) => {
                loge!("Batch: {} {}: {}", kind, year, e);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(year, &e.to_string());
                }
                batch.failed.push((year, e));
            }
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(batch)
}
