// src/gui/actions/mod.rs
//
// Folder module facade: re-export public entrypoints.
// Submodules stay private; consumers only see actions::{copy,export,fetch}.

mod copy;    // src/gui/actions/copy.rs
mod export;  // src/gui/actions/export.rs
mod fetch;   // src/gui/actions/fetch.rs

pub use copy::copy;
pub use export::export;
pub use fetch::fetch;

use crate::{export::render, gui::app::App};

/// Current tab's records rendered with the export options, or a status
/// message explaining why there is nothing to render.
pub(super) fn current_text(app: &App) -> Result<String, String> {
    let Some(loaded) = app.current_loaded() else {
        return Err(s!("Nothing loaded for this tab"));
    };
    let export = &app.state.options.export;
    render(app.current_kind(), &loaded.records, export.format, export.include_headers)
        .map_err(|e| format!("Export error: {e}"))
}
