// src/core/html.rs
//
// Small helpers over `scraper` so the table specs read like the page does.

use std::borrow::Cow;

use scraper::ElementRef;

/// Cached pages are stored byte-for-byte. The portal serves UTF-8 on some
/// tabs and ISO-8859-1 on others; anything that isn't valid UTF-8 is read
/// as Latin-1 (every byte maps to the same code point).
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Visible text of a cell: each text node trimmed, then concatenated.
pub fn cell_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn decode_falls_back_to_latin1() {
        assert_eq!(decode("Exportação".as_bytes()), "Exportação");
        // "Açúcar" in ISO-8859-1
        let latin1 = [0x41, 0xE7, 0xFA, 0x63, 0x61, 0x72];
        assert_eq!(decode(&latin1), "Açúcar");
    }

    #[test]
    fn cell_text_trims_each_fragment() {
        let doc = Html::parse_fragment("<table><tr><td class=\"tb_item a\">\n  Vinho <b> Tinto </b>\n</td></tr></table>");
        let td = Selector::parse("td").unwrap();
        let cell = doc.select(&td).next().unwrap();
        assert_eq!(cell_text(cell), "VinhoTinto");
        assert!(has_class(cell, "tb_item"));
        assert!(!has_class(cell, "tb_subitem"));
    }
}
