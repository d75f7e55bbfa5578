// src/report.rs
//! Report kinds, their categories, and how a (kind, year, category) request
//! maps onto the portal's query string and the local cache file name.
//!
//! Everything here is pure and deterministic: the same request always yields
//! the same `SourceLocator` and the same `CacheKey`.

use std::fmt;

use serde::Serialize;

/// The five tabs of the portal this crate knows how to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Production,
    Processing,
    Commercialization,
    Import,
    Export,
}

use ReportKind::*;

const PROCESSING_CATEGORIES: &[&str] = &[
    "viniferas",
    "americanas_hibridas",
    "uvas_de_mesa",
    "sem_classificacao",
];

const IMPORT_CATEGORIES: &[&str] = &[
    "vinhos_de_mesa",
    "espumantes",
    "uvas_frescas",
    "uvas_passas",
    "suco_de_uva",
];

const EXPORT_CATEGORIES: &[&str] = &[
    "vinhos_de_mesa",
    "espumantes",
    "uvas_frescas",
    "suco_de_uva",
];

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [Production, Processing, Commercialization, Import, Export];

    /// Slug used in cache file names (the portal's own tab names).
    pub fn slug(self) -> &'static str {
        match self {
            Production        => "producao",
            Processing        => "processamento",
            Commercialization => "comercializacao",
            Import            => "importacao",
            Export            => "exportacao",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Production        => "Production",
            Processing        => "Processing",
            Commercialization => "Commercialization",
            Import            => "Import",
            Export            => "Export",
        }
    }

    /// `opcao` query value selecting the tab.
    pub fn option_code(self) -> &'static str {
        match self {
            Production        => "opt_02",
            Processing        => "opt_03",
            Commercialization => "opt_04",
            Import            => "opt_05",
            Export            => "opt_06",
        }
    }

    /// Accepted categories, in suboption order. Empty when the tab has a
    /// single table per year.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Production | Commercialization => &[],
            Processing => PROCESSING_CATEGORIES,
            Import     => IMPORT_CATEGORIES,
            Export     => EXPORT_CATEGORIES,
        }
    }

    pub fn requires_category(self) -> bool {
        !self.categories().is_empty()
    }

    /// Category used when the caller does not name one.
    pub fn default_category(self) -> Option<&'static str> {
        self.categories().first().copied()
    }

    /// `subopt_NN` for a category; `None` if the category is not in this
    /// kind's table. Keys are case-sensitive.
    pub fn suboption_code(self, category: &str) -> Option<String> {
        self.categories()
            .iter()
            .position(|c| *c == category)
            .map(|ix| format!("subopt_{:02}", ix + 1))
    }

    /// Accepts English names and the portal slugs, case-insensitively.
    pub fn from_name(name: &str) -> Option<ReportKind> {
        let lc = name.trim().to_ascii_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|k| lc == k.slug() || lc == k.label().to_ascii_lowercase())
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Fully determines the remote page for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocator {
    pub base_url: String,
    pub year: i32,
    pub option_code: &'static str,
    pub suboption_code: Option<String>,
}

impl SourceLocator {
    pub fn new(base_url: &str, kind: ReportKind, year: i32, suboption_code: Option<String>) -> Self {
        Self {
            base_url: s!(base_url),
            year,
            option_code: kind.option_code(),
            suboption_code,
        }
    }

    pub fn url(&self) -> String {
        let mut url = format!("{}?ano={}&opcao={}", self.base_url, self.year, self.option_code);
        if let Some(sub) = &self.suboption_code {
            url.push_str("&subopcao=");
            url.push_str(sub);
        }
        url
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

/// One cache entry per distinct (kind, category, year).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: ReportKind,
    pub category: Option<String>,
    pub year: i32,
}

impl CacheKey {
    pub fn new(kind: ReportKind, category: Option<&str>, year: i32) -> Self {
        Self { kind, category: category.map(String::from), year }
    }

    /// `{kind}_{category}_{year}.html`, or `{kind}_{year}.html` without a category.
    pub fn file_name(&self) -> String {
        let year = self.year.to_string();
        match &self.category {
            Some(cat) => join!(self.kind.slug(), "_", cat, "_", &year, ".html"),
            None      => join!(self.kind.slug(), "_", &year, ".html"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suboption_codes_follow_table_order() {
        assert_eq!(Processing.suboption_code("viniferas").as_deref(), Some("subopt_01"));
        assert_eq!(Processing.suboption_code("sem_classificacao").as_deref(), Some("subopt_04"));
        assert_eq!(Import.suboption_code("suco_de_uva").as_deref(), Some("subopt_05"));
        assert_eq!(Export.suboption_code("suco_de_uva").as_deref(), Some("subopt_04"));
        assert_eq!(Export.suboption_code("uvas_passas"), None);
        assert_eq!(Processing.suboption_code("Viniferas"), None);
        assert_eq!(Production.suboption_code("viniferas"), None);
    }

    #[test]
    fn locator_renders_portal_query() {
        let loc = SourceLocator::new("http://host/index.php", Import, 2021, Import.suboption_code("espumantes"));
        assert_eq!(loc.url(), "http://host/index.php?ano=2021&opcao=opt_05&subopcao=subopt_02");

        let loc = SourceLocator::new("http://host/index.php", Production, -5, None);
        assert_eq!(loc.url(), "http://host/index.php?ano=-5&opcao=opt_02");
    }

    #[test]
    fn cache_file_names() {
        assert_eq!(CacheKey::new(Production, None, 2023).file_name(), "producao_2023.html");
        assert_eq!(
            CacheKey::new(Export, Some("espumantes"), 2019).file_name(),
            "exportacao_espumantes_2019.html"
        );
    }

    #[test]
    fn kind_names_accept_both_languages() {
        assert_eq!(ReportKind::from_name("Production"), Some(Production));
        assert_eq!(ReportKind::from_name("comercializacao"), Some(Commercialization));
        assert_eq!(ReportKind::from_name("IMPORT"), Some(Import));
        assert_eq!(ReportKind::from_name("wine"), None);
    }
}
