// src/gui/components/data_table.rs
//
// Draws the live table from `app.table`. Purely a view.

use eframe::egui::{self, Align, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};
use crate::gui::{app::App, table_model::{is_subitem_row, NUMERIC_COLS}};

const WIDTHS: [f32; 4] = [220.0, 220.0, 140.0, 140.0];

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let table = &app.table;
    let kind = app.current_kind();

    if table.is_empty() {
        ui.weak("No data loaded. Pick a year and press Fetch.");
        return;
    }

    // Ensure scroll bars allocate space (not floating over content)
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let avail_h = ui.available_height();
    egui::ScrollArea::new([true, false])
        .id_salt("inner_table_hscroll")
        .min_scrolled_height(avail_h)
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut builder = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0)
                .id_salt(("table_state", kind));
            for ci in 0..table.ncols() {
                let w = WIDTHS.get(ci).copied().unwrap_or(120.0);
                builder = builder.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
            }

            builder
                .header(24.0, |mut header| {
                    for (ci, h) in table.headers.iter().enumerate() {
                        header.col(|ui| {
                            let label = RichText::new(h).strong();
                            if NUMERIC_COLS.contains(&ci) {
                                ui.with_layout(Layout::right_to_left(Align::Center), |ui| { ui.label(label); });
                            } else {
                                ui.label(label);
                            }
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, table.nrows(), |mut row| {
                        let Some(data) = table.rows.get(row.index()) else { return };
                        let child = is_subitem_row(data);
                        let total = data.first().is_some_and(|c| c == "Total") && data.get(1).is_some_and(String::is_empty);

                        for (ci, cell) in data.iter().enumerate() {
                            row.col(|ui| {
                                ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                // Child rows repeat the parent name; dim it.
                                let mut rt = RichText::new(cell);
                                if child && ci == 0 { rt = rt.weak(); }
                                if total { rt = rt.strong(); }
                                if NUMERIC_COLS.contains(&ci) {
                                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| { ui.label(rt); });
                                } else {
                                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                                }
                            });
                        }
                    });
                });
        });
}
