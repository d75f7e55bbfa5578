// src/gui/components/controls.rs
//
// Report request row: year, category (for kinds that have them), Fetch.

use eframe::egui::{self, widgets::Spinner};
use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let kind = app.current_kind();
    let mut changed = false;

    ui.horizontal(|ui| {
        let report = &mut app.state.options.report;

        ui.label("Year:");
        if ui.add(egui::DragValue::new(&mut report.year).speed(1)).changed() {
            changed = true;
        }

        let cats = kind.categories();
        if !cats.is_empty() {
            ui.label("Category:");
            let shown = report.category.clone().unwrap_or_else(|| s!(cats[0]));
            egui::ComboBox::from_id_salt(("category", kind))
                .selected_text(shown.replace('_', " "))
                .show_ui(ui, |ui| {
                    for c in cats {
                        let picked = report.category.as_deref() == Some(*c);
                        if ui.selectable_label(picked, c.replace('_', " ")).clicked() && !picked {
                            report.category = Some(s!(*c));
                            logf!("UI: Category → {}", c);
                            changed = true;
                        }
                    }
                });
        }

        let fetch = ui.add_enabled(
            !app.running && app.resolver.is_some(),
            egui::Button::new(egui::RichText::new("Fetch").strong()),
        );
        if fetch.clicked() {
            actions::fetch(app, ui.ctx());
        }

        if app.running {
            ui.add(Spinner::new().size(16.0));
        }

        // Show where the current table came from.
        if let Some(l) = app.current_loaded() {
            let from = match &l.category {
                Some(c) => format!("Showing {} · {}", l.year, c.replace('_', " ")),
                None => format!("Showing {}", l.year),
            };
            ui.weak(from);
        }
    });

    if changed {
        app.refresh_default_out_path();
    }
}
