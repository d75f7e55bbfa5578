// src/specs/mod.rs
//! # Table specs
//!
//! Every report tab on the portal renders the same kind of table:
//!
//! ```text
//! <table class="tb_base tb_dados">
//!   <thead> column titles </thead>
//!   <tbody>
//!     <tr><td class="tb_item">VINHO DE MESA</td><td class="tb_item">169.762.429</td></tr>
//!     <tr><td class="tb_subitem">Tinto</td><td class="tb_subitem">139.320.884</td></tr>
//!     ...
//!   </tbody>
//!   <tfoot class="tb_total"><tr><td>Total</td><td>...</td></tr></tfoot>
//! </table>
//! ```
//!
//! The five tabs differ only in column count (2 or 3), whether rows form a
//! parent/child hierarchy, and whether cells are normalized to numbers. Those
//! differences live in a [`TableLayout`] descriptor; [`parse_table`] is the one
//! parser that reads any of them.
//!
//! ## What does **not** live here
//! - Fetching and caching (`store`).
//! - Deciding which page to read, or mapping outcomes to caller errors (`scrape`).
//!
//! Specs are pure: HTML in, records out. They are testable offline against
//! saved pages.

mod layout;
mod table;

pub use layout::{layout_for, TableLayout};
pub use table::{parse_table, ParseError, TableOutcome};
