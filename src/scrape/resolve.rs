// src/scrape/resolve.rs
//! Report resolver: (kind, year, category?) → records.
//!
//! Validates the category before any I/O, builds the locator and cache key,
//! goes through the content store, parses with the kind's table layout, and
//! maps every failure onto one of four caller-facing conditions.

use thiserror::Error;

use crate::config::options::Settings;
use crate::core::{html, Fetch, FetchError, HttpFetcher};
use crate::data::ReportRecord;
use crate::report::{CacheKey, ReportKind, SourceLocator};
use crate::specs::{layout_for, parse_table, ParseError, TableOutcome};
use crate::store::{ContentStore, StoreError};

#[derive(Debug, Error)]
pub enum ReportError {
    /// Client input error; raised before touching cache or network.
    #[error("invalid category {category:?} for {kind}; {}", category_hint(.kind))]
    InvalidCategory { kind: ReportKind, category: String },

    /// Portal unreachable, bad status, timeout, or cache I/O failure.
    #[error("unable to access the portal or the cache for {kind}: {source}")]
    Unavailable {
        kind: ReportKind,
        #[source]
        source: StoreError,
    },

    /// The page no longer has the expected structure.
    #[error("unexpected {kind} page layout for {year}: {source}")]
    MalformedSource {
        kind: ReportKind,
        year: i32,
        #[source]
        source: ParseError,
    },

    /// Well-formed page, nothing but placeholders.
    #[error("no {kind} data found for year {year}{}", category_suffix(.category))]
    NotFound {
        kind: ReportKind,
        year: i32,
        category: Option<String>,
    },
}

impl ReportError {
    /// HTTP-style status a route layer would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::InvalidCategory { .. } => 400,
            ReportError::NotFound { .. }        => 404,
            ReportError::MalformedSource { .. } => 502,
            ReportError::Unavailable { .. }     => 503,
        }
    }
}

fn category_hint(kind: &ReportKind) -> String {
    let cats = kind.categories();
    if cats.is_empty() {
        s!("this report takes no category")
    } else {
        format!("choose one of: {}", cats.join(", "))
    }
}

fn category_suffix(category: &Option<String>) -> String {
    category
        .as_deref()
        .map(|c| format!(" in category '{c}'"))
        .unwrap_or_default()
}

/// A validated request: everything needed to fetch and parse one page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Planned {
    pub kind: ReportKind,
    pub year: i32,
    pub category: Option<&'static str>,
    pub locator: SourceLocator,
    pub key: CacheKey,
}

/// Validate the category and derive locator + cache key. No I/O.
///
/// Kinds with categories fall back to their first category when none is
/// given; kinds without categories reject any category.
pub fn plan(base_url: &str, kind: ReportKind, year: i32, category: Option<&str>) -> Result<Planned, ReportError> {
    let invalid = |c: &str| ReportError::InvalidCategory { kind, category: s!(c) };

    let category: Option<&'static str> = match (kind.requires_category(), category) {
        (false, None) => None,
        (false, Some(c)) => return Err(invalid(c)),
        (true, None) => kind.default_category(),
        (true, Some(c)) => match kind.categories().iter().find(|k| **k == c) {
            Some(k) => Some(*k),
            None => return Err(invalid(c)),
        },
    };

    let suboption = category.and_then(|c| kind.suboption_code(c));
    Ok(Planned {
        kind,
        year,
        category,
        locator: SourceLocator::new(base_url, kind, year, suboption),
        key: CacheKey::new(kind, category, year),
    })
}

pub struct Resolver<F> {
    base_url: String,
    store: ContentStore<F>,
}

impl Resolver<HttpFetcher> {
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(settings.timeout)?;
        Ok(Self::new(&settings.base_url, ContentStore::new(&settings.cache_dir, fetcher)))
    }
}

impl<F: Fetch> Resolver<F> {
    pub fn new(base_url: &str, store: ContentStore<F>) -> Self {
        Self { base_url: s!(base_url), store }
    }

    pub fn store(&self) -> &ContentStore<F> {
        &self.store
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, kind: ReportKind, year: i32, category: Option<&str>) -> Result<Vec<ReportRecord>, ReportError> {
        let planned = plan(&self.base_url, kind, year, category)?;
        self.resolve_planned(&planned)
    }

    pub fn resolve_planned(&self, p: &Planned) -> Result<Vec<ReportRecord>, ReportError> {
        logd!("Resolve: {} year={} category={:?}", p.kind, p.year, p.category);

        let bytes = self.store.fetch_or_cache(&p.locator, &p.key).map_err(|source| {
            loge!("Resolve: {} {} unavailable: {}", p.kind, p.year, source);
            ReportError::Unavailable { kind: p.kind, source }
        })?;

        let text = html::decode(&bytes);
        let outcome = parse_table(&text, layout_for(p.kind)).map_err(|source| {
            loge!("Resolve: {} {} malformed: {}", p.kind, p.year, source);
            ReportError::MalformedSource { kind: p.kind, year: p.year, source }
        })?;

        match outcome {
            TableOutcome::Data(records) => {
                logf!("Resolve: {} {} → {} record(s)", p.kind, p.year, records.len());
                Ok(records)
            }
            TableOutcome::NoData => {
                logf!("Resolve: {} {} has no data", p.kind, p.year);
                Err(ReportError::NotFound {
                    kind: p.kind,
                    year: p.year,
                    category: p.category.map(String::from),
                })
            }
        }
    }

    pub fn production(&self, year: i32) -> Result<Vec<ReportRecord>, ReportError> {
        self.resolve(ReportKind::Production, year, None)
    }

    pub fn processing(&self, year: i32, category: &str) -> Result<Vec<ReportRecord>, ReportError> {
        self.resolve(ReportKind::Processing, year, Some(category))
    }

    pub fn commercialization(&self, year: i32) -> Result<Vec<ReportRecord>, ReportError> {
        self.resolve(ReportKind::Commercialization, year, None)
    }

    pub fn import(&self, year: i32, category: &str) -> Result<Vec<ReportRecord>, ReportError> {
        self.resolve(ReportKind::Import, year, Some(category))
    }

    pub fn export(&self, year: i32, category: &str) -> Result<Vec<ReportRecord>, ReportError> {
        self.resolve(ReportKind::Export, year, Some(category))
    }
}
