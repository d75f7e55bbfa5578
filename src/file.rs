// src/file.rs

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::core::sanitize::sanitize_filename;
use crate::report::ReportKind;

/// Create `dir` (and parents) unless it already exists as a directory.
pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/// Write an export file, creating its parent directory first.
pub fn write_export(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)
}

/// `-o` handling: empty → default file name in the working dir; a directory
/// (existing, or hinted by a trailing separator) → default name inside it.
pub fn resolve_single_out_path(user_o: &str, default_filename: &str) -> io::Result<PathBuf> {
    if user_o.is_empty() { return Ok(PathBuf::from(default_filename)); }
    let p = PathBuf::from(normalize_separators(user_o));
    if looks_like_dir_hint(user_o) || p.is_dir() {
        ensure_directory(&p)?;
        Ok(p.join(default_filename))
    } else {
        Ok(p)
    }
}

pub fn normalize_separators(p: &str) -> String {
    let sep = std::path::MAIN_SEPARATOR;
    p.chars().map(|c| if c=='/'||c=='\\' { sep } else { c }).collect()
}

pub fn looks_like_dir_hint(p: &str) -> bool {
    p.ends_with('/') || p.ends_with('\\')
}

/// `{kind}[_{category}]_{years}` without extension, e.g.
/// `importacao_espumantes_2019-2021`.
pub fn default_file_stem(kind: ReportKind, category: Option<&str>, years: &[i32]) -> String {
    let span = match (years.first(), years.last()) {
        (Some(a), Some(b)) if a != b => format!("{a}-{b}"),
        (Some(a), _) => a.to_string(),
        _ => s!(),
    };
    let raw = match category {
        Some(c) => join!(kind.slug(), "_", c, "_", &span),
        None    => join!(kind.slug(), "_", &span),
    };
    sanitize_filename(&raw)
}
