// src/scrape/mod.rs
mod collect;
mod resolve;

pub use collect::{collect_years, Batch};
pub use resolve::{plan, Planned, ReportError, Resolver};
