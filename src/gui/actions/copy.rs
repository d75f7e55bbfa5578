// src/gui/actions/copy.rs
use eframe::egui;
use crate::gui::app::App;

pub fn copy(app: &mut App, ui_ctx: &egui::Context) {
    match super::current_text(app) {
        Ok(txt) => {
            logf!("Copy: {} ({} bytes)", app.current_kind(), txt.len());
            ui_ctx.copy_text(txt);
            app.status("Copied to clipboard");
        }
        Err(msg) => {
            logd!("Copy: {}", msg);
            app.status(msg);
        }
    }
}
