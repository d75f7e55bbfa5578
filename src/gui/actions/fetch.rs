// src/gui/actions/fetch.rs
use std::{sync::Arc, thread};

use eframe::egui;
use crate::gui::app::{App, FetchOutcome};

/// Resolve the current request on a worker thread; the result is picked up
/// by `App::update` on a later frame.
pub fn fetch(app: &mut App, ctx: &egui::Context) {
    if app.running { return; }
    let Some(resolver) = app.resolver.as_ref().map(Arc::clone) else {
        app.status("No HTTP client available");
        return;
    };

    let kind = app.current_kind();
    let year = app.state.options.report.year;
    let category = app.state.options.report.category.clone();

    logf!("Fetch: Begin {} {} category={:?}", kind, year, category);
    app.running = true;
    app.status(format!("Fetching {} {}…", kind.label(), year));

    let pending = Arc::clone(&app.pending);
    let ctx = ctx.clone();

    thread::spawn(move || {
        let result = resolver.resolve(kind, year, category.as_deref());
        let category = category.or_else(|| kind.default_category().map(String::from));
        let outcome = FetchOutcome { kind, year, category, result };
        *pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(outcome);
        ctx.request_repaint();
    });
}
