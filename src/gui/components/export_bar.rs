// src/gui/components/export_bar.rs

use eframe::egui;
use crate::{
    config::options::ExportFormat,
    gui::{actions, app::App},
};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.state.options.export;

        // --- Format + Include headers ---
        let prev_fmt = export.format;
        let mut fmt = prev_fmt;

        ui.horizontal(|ui| {
            ui.label("Format:");
            for f in ExportFormat::ALL {
                ui.selectable_value(&mut fmt, f, f.ext().to_ascii_uppercase());
            }

            ui.add_enabled(
                fmt.delimiter().is_some(),
                egui::Checkbox::new(&mut export.include_headers, "Include headers"),
            );
        });

        if fmt != prev_fmt {
            export.format = fmt;
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }
    }

    let before = app.state.gui.collapse_subitems;
    ui.checkbox(&mut app.state.gui.collapse_subitems, "Hide sub-items");
    if app.state.gui.collapse_subitems != before {
        logd!("UI: collapse_subitems → {}", app.state.gui.collapse_subitems);
        app.rebuild_view();
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }
    });

    // --- Actions (Copy / Export) ---
    ui.horizontal(|ui| {
        let has_data = app.current_loaded().is_some();

        if ui.add_enabled(has_data, egui::Button::new("Copy")).clicked() {
            actions::copy(app, ui.ctx());
        }

        if ui.add_enabled(has_data, egui::Button::new("Export")).clicked() {
            actions::export(app);
        }

        ui.label(app.status_text());
    });
}
