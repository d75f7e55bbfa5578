// src/gui/app.rs
use std::{
    collections::HashMap,
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use eframe::egui;

use crate::{
    config::state::AppState,
    core::HttpFetcher,
    data::ReportRecord,
    file::default_file_stem,
    report::ReportKind,
    scrape::{ReportError, Resolver},
};

use super::table_model::TableData;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Vitibrasil Scrape",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::default())))),
    )?;
    Ok(())
}

/// Records last fetched for one tab.
#[derive(Clone, Debug)]
pub struct Loaded {
    pub year: i32,
    pub category: Option<String>,
    pub records: Vec<ReportRecord>,
}

/// What the worker thread hands back.
pub struct FetchOutcome {
    pub kind: ReportKind,
    pub year: i32,
    pub category: Option<String>,
    pub result: Result<Vec<ReportRecord>, ReportError>,
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    pub resolver: Option<Arc<Resolver<HttpFetcher>>>,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // per-tab records + the table shown for the current tab
    pub loaded: HashMap<ReportKind, Loaded>,
    pub table: TableData,

    // status/progress (workers write here)
    pub status: Arc<Mutex<String>>,
    pub running: bool,
    pub pending: Arc<Mutex<Option<FetchOutcome>>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let mut status = s!("Idle");

        let resolver = match Resolver::from_settings(&state.options.settings) {
            Ok(r) => {
                logf!(
                    "Init: base_url={} cache_dir={}",
                    r.base_url(),
                    r.store().dir().display()
                );
                Some(Arc::new(r))
            }
            Err(e) => {
                loge!("Init: HTTP client unavailable: {}", e);
                status = format!("Error: {e}");
                None
            }
        };

        let mut app = Self {
            state,
            resolver,
            out_path_text: s!(),
            out_path_dirty: false,
            loaded: HashMap::new(),
            table: TableData::empty(),
            status: Arc::new(Mutex::new(status)),
            running: false,
            pending: Arc::new(Mutex::new(None)),
        };
        app.refresh_default_out_path();
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_index(&self) -> usize { self.state.gui.current_kind_index }

    #[inline]
    pub fn current_kind(&self) -> ReportKind {
        ReportKind::ALL[self.current_index().min(ReportKind::ALL.len() - 1)]
    }

    pub fn set_current_index(&mut self, idx: usize) {
        self.state.gui.current_kind_index = idx;
        let kind = self.current_kind();
        self.state.options.report.set_kind(kind);
        self.rebuild_view();
        self.refresh_default_out_path();
    }

    pub fn status<T: Into<String>>(&self, msg: T) {
        let mut guard = self.status.lock().unwrap_or_else(|e| e.into_inner());
        *guard = msg.into();
    }

    pub fn status_text(&self) -> String {
        self.status.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Records loaded for the current tab, if any.
    pub fn current_loaded(&self) -> Option<&Loaded> {
        self.loaded.get(&self.current_kind())
    }

    /// Rebuild the table from the current tab's records.
    pub fn rebuild_view(&mut self) {
        self.table = match self.current_loaded() {
            Some(l) => TableData::from_records(&l.records, self.state.gui.collapse_subitems),
            None => TableData::empty(),
        };
    }

    /// Keep the output field in step with tab/year/category while the user
    /// has not typed a path of their own.
    pub fn refresh_default_out_path(&mut self) {
        if self.out_path_dirty { return; }
        let report = &self.state.options.report;
        let stem = default_file_stem(report.kind, report.category.as_deref(), &[report.year]);
        let export = &mut self.state.options.export;
        export.set_stem(&stem);
        self.out_path_text = export.out_path().to_string_lossy().into_owned();
    }

    /// Pick up a finished worker result, if there is one.
    fn poll_worker(&mut self) {
        let outcome = self.pending.lock().unwrap_or_else(|e| e.into_inner()).take();
        let Some(out) = outcome else { return };
        self.running = false;

        match out.result {
            Ok(records) => {
                let msg = format!(
                    "Loaded {} {} ({} records)",
                    out.kind.label(),
                    out.year,
                    records.len()
                );
                logf!("Fetch: OK {} {} category={:?}", out.kind, out.year, out.category);
                self.loaded.insert(out.kind, Loaded { year: out.year, category: out.category, records });
                self.status(msg);
            }
            Err(e) => {
                loge!("Fetch: Error {} {}: {}", out.kind, out.year, e);
                self.loaded.remove(&out.kind);
                self.status(format!("Error ({}): {e}", e.status_code()));
            }
        }
        self.rebuild_view();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();
        if self.running {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            super::components::tabs::draw(ui, self);

            ui.separator();

            super::components::controls::draw(ui, self);

            ui.separator();

            super::components::export_bar::draw(ui, self);

            ui.separator();

            super::components::data_table::draw(ui, self);
        });
    }
}
