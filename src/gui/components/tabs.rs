// src/gui/components/tabs.rs
//
// Renders the top tabs (one per report kind) and performs the tab switch.
// Switching shows whatever was last fetched for that tab; it never fetches.

use eframe::egui;
use crate::gui::app::App;
use crate::report::ReportKind;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.current_index();

        for (idx, kind) in ReportKind::ALL.iter().enumerate() {
            let selected = idx == cur;

            if ui.selectable_label(selected, kind.label()).clicked() && !selected {
                let prev = app.current_kind();
                logf!("UI: Tab switch {} → {}", prev, kind);
                app.set_current_index(idx);
            }
        }
    });
}
