// src/cli.rs
use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;
use thiserror::Error;

use crate::config::consts::DEFAULT_YEAR;
use crate::config::options::{ExportFormat, Settings};
use crate::core::{Fetch, FetchError};
use crate::export::{render, render_batch, ExportError};
use crate::file::{default_file_stem, resolve_single_out_path, write_export};
use crate::progress::Progress;
use crate::report::ReportKind;
use crate::scrape::{collect_years, ReportError, Resolver};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Client(#[from] FetchError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no year produced data ({failed} failed)")]
    NothingCollected { failed: usize },
}

/// Comma separated years and inclusive ranges, e.g. `2019-2021,2023`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearList(pub Vec<i32>);

#[derive(Debug, Parser)]
#[command(name = "cli", version, about = "Fetch Embrapa Vitivinicultura reports as CSV, TSV or JSON")]
pub struct Args {
    /// production | processing | commercialization | import | export (or the Portuguese tab name)
    #[arg(short, long, value_parser = parse_kind, default_value = "production")]
    pub report: ReportKind,

    #[arg(short, long, conflicts_with = "years", allow_negative_numbers = true)]
    pub year: Option<i32>,

    /// Several years, resolved one after another
    #[arg(long, value_parser = parse_years)]
    pub years: Option<YearList>,

    /// Sub-table for processing / import / export; defaults to the first one
    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long, value_parser = parse_format, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file or directory (trailing `/`); stdout when omitted
    #[arg(short, long)]
    pub out: Option<String>,

    #[arg(long)]
    pub no_headers: bool,

    #[arg(long, env = "VITIBRASIL_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, env = "VITIBRASIL_BASE_URL")]
    pub base_url: Option<String>,

    /// Print the categories of every report and exit
    #[arg(long)]
    pub list_categories: bool,
}

impl Args {
    pub fn settings(&self) -> Settings {
        let mut s = Settings::default();
        if let Some(url) = &self.base_url { s.base_url = url.clone(); }
        if let Some(dir) = &self.cache_dir { s.cache_dir = dir.clone(); }
        s
    }

    pub fn year_list(&self) -> Vec<i32> {
        match (&self.years, self.year) {
            (Some(YearList(ys)), _) => ys.clone(),
            (None, Some(y)) => vec![y],
            (None, None) => vec![DEFAULT_YEAR],
        }
    }
}

fn parse_kind(s: &str) -> Result<ReportKind, String> {
    ReportKind::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = ReportKind::ALL.iter().map(|k| k.label()).collect();
        format!("unknown report '{s}'; expected one of: {}", names.join(", "))
    })
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_name(s).ok_or_else(|| format!("unknown format '{s}'; expected csv, tsv or json"))
}

pub fn parse_years(s: &str) -> Result<YearList, String> {
    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let a: i32 = a.trim().parse().map_err(|_| format!("bad year in '{part}'"))?;
            let b: i32 = b.trim().parse().map_err(|_| format!("bad year in '{part}'"))?;
            if a > b { return Err(format!("Invalid range: {part}")); }
            out.extend(a..=b);
        } else {
            out.push(part.parse().map_err(|_| format!("bad year '{part}'"))?);
        }
    }
    out.sort_unstable();
    out.dedup();
    if out.is_empty() { return Err(s!("no years given")); }
    Ok(YearList(out))
}

/// Multi-year progress on stderr.
struct StderrProgress {
    total: usize,
    seen: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.seen = 0;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, year: i32) {
        self.seen += 1;
        eprintln!("[{}/{}] {year} ok", self.seen, self.total);
    }

    fn item_failed(&mut self, year: i32, reason: &str) {
        self.seen += 1;
        eprintln!("[{}/{}] {year} failed: {reason}", self.seen, self.total);
    }
}

pub fn list_categories<W: Write>(out: &mut W) -> io::Result<()> {
    for kind in ReportKind::ALL {
        let cats = kind.categories();
        if cats.is_empty() {
            writeln!(out, "{}: (none)", kind.label())?;
        } else {
            writeln!(out, "{}: {}", kind.label(), cats.join(", "))?;
        }
    }
    Ok(())
}

pub fn run() -> Result<(), CliError> {
    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list_categories {
        return list_categories(&mut out).map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source });
    }

    let resolver = Resolver::from_settings(&args.settings())?;
    if let Some(path) = execute(&args, &resolver, &mut out)? {
        eprintln!("Wrote {}", path.display());
    }
    Ok(())
}

/// Resolve what `args` asks for and write it to `-o` or `out`.
/// Returns the file written, if any.
pub fn execute<F: Fetch, W: Write>(
    args: &Args,
    resolver: &Resolver<F>,
    out: &mut W,
) -> Result<Option<PathBuf>, CliError> {
    let kind = args.report;
    let years = args.year_list();
    let category = args.category.as_deref().or(kind.default_category());
    let include_headers = !args.no_headers;

    logf!("CLI: {} {:?} category={:?} format={}", kind, years, category, args.format.ext());

    let text = if let [year] = years[..] {
        let records = resolver.resolve(kind, year, args.category.as_deref())?;
        render(kind, &records, args.format, include_headers)?
    } else {
        let mut progress = StderrProgress { total: 0, seen: 0 };
        let batch = collect_years(resolver, kind, &years, args.category.as_deref(), Some(&mut progress))?;
        if batch.done.is_empty() {
            return Err(CliError::NothingCollected { failed: batch.failed.len() });
        }
        for (year, e) in &batch.failed {
            progress.log(&format!("skipped {year}: {e}"));
        }
        render_batch(kind, &batch.done, args.format, include_headers)?
    };

    match &args.out {
        Some(o) => {
            let default_name = join!(&default_file_stem(kind, category, &years), ".", args.format.ext());
            let path = resolve_single_out_path(o, &default_name)
                .map_err(|source| CliError::Io { path: PathBuf::from(o), source })?;
            write_export(&path, &text).map_err(|source| CliError::Io { path: path.clone(), source })?;
            Ok(Some(path))
        }
        None => {
            out.write_all(text.as_bytes())
                .map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source })?;
            Ok(None)
        }
    }
}
