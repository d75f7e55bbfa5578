// src/config/options.rs
use std::ffi::OsString;
use std::path::{ Path, PathBuf };
use std::time::Duration;

use crate::report::ReportKind;
use super::consts::*;

/// Where pages come from and where they are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub cache_dir: PathBuf,
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            cache_dir: PathBuf::from(CACHE_DIR),
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }
}

impl Settings {
    /// Defaults overridden by `VITIBRASIL_BASE_URL` / `VITIBRASIL_CACHE_DIR`.
    pub fn from_env() -> Self {
        let mut s = Self::default();
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            if !url.trim().is_empty() { s.base_url = s!(url.trim()); }
        }
        if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
            if !dir.trim().is_empty() { s.cache_dir = PathBuf::from(dir.trim()); }
        }
        s
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub settings: Settings,
    pub report: ReportOptions,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            settings: Settings::from_env(),
            report: ReportOptions::default(),
            export: ExportOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    pub kind: ReportKind,
    pub year: i32,
    pub category: Option<String>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            kind: ReportKind::Production,
            year: DEFAULT_YEAR,
            category: None,
        }
    }
}

impl ReportOptions {
    /// Switch report kind, resetting the category to the kind's default.
    pub fn set_kind(&mut self, kind: ReportKind) {
        if self.kind != kind {
            self.kind = kind;
            self.category = kind.default_category().map(String::from);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Tsv, ExportFormat::Json];

    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv  => "csv",
            ExportFormat::Tsv  => "tsv",
            ExportFormat::Json => "json",
        }
    }

    /// Field separator for the delimited formats.
    pub fn delimiter(&self) -> Option<u8> {
        match self {
            ExportFormat::Csv  => Some(b','),
            ExportFormat::Tsv  => Some(b'\t'),
            ExportFormat::Json => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv"  => Some(ExportFormat::Csv),
            "tsv"  => Some(ExportFormat::Tsv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    out_path: OutputPath,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out_path: OutputPath::default(),
            include_headers: true,
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the extension always follows the format.
    pub fn out_path(&self) -> PathBuf {
        let stem = self.out_path.file_stem.to_string_lossy();
        self.out_path.dir.join(join!(stem, ".", self.format.ext()))
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_path.dir
    }

    /// Parse GUI text into dir + stem. Ignores pasted extension; format controls it.
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
    }

    pub fn set_stem(&mut self, stem: &str) {
        self.out_path.file_stem = OsString::from(stem);
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pasted_extension_is_replaced_by_format() {
        let mut ex = ExportOptions::default();
        ex.set_path("reports/producao_2023.txt");
        ex.format = ExportFormat::Tsv;
        assert_eq!(ex.out_path(), Path::new("reports").join("producao_2023.tsv"));
    }

    #[test]
    fn kind_switch_resets_category() {
        let mut r = ReportOptions { category: Some(s!("viniferas")), ..Default::default() };
        r.set_kind(ReportKind::Import);
        assert_eq!(r.category.as_deref(), Some("vinhos_de_mesa"));
        r.set_kind(ReportKind::Commercialization);
        assert_eq!(r.category, None);
    }

    #[test]
    fn format_names() {
        assert_eq!(ExportFormat::from_name(" JSON "), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_name("xml"), None);
        assert_eq!(ExportFormat::Tsv.delimiter(), Some(b'\t'));
    }
}
