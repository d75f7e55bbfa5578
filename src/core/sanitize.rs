// src/core/sanitize.rs

use crate::config::consts::PLACEHOLDER;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Portal numbers use `.` for thousands and `,` for decimals.
/// `"1.234,56"` → `Some(1234.56)`, placeholder → `None`.
/// Returns `Err` with the offending text when the cell is neither.
pub fn parse_locale_number(s: &str) -> Result<Option<f64>, String> {
    let s = s.trim();
    if s == PLACEHOLDER {
        return Ok(None);
    }
    let normalized: String = s
        .chars()
        .filter(|&c| c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    normalized.parse::<f64>().map(Some).map_err(|_| s!(s))
}

/// Keep only characters safe in a file name; runs of anything else become `_`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    out.trim_matches('_').to_string()
}
