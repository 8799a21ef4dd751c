//! Table display for text tables.

use crate::data::TableView;
use egui::{RichText, ScrollArea};

const COL_WIDTH: f32 = 80.0;
const ROW_HEIGHT: f32 = 18.0;
const MAX_HEIGHT: f32 = 320.0;

/// Draw a table with a fixed header and virtualised rows.
pub fn show_table(ui: &mut egui::Ui, id: &str, table: &TableView) {
    ui.label(
        RichText::new(format!("{} rows × {} columns", table.row_count(), table.column_count()))
            .size(11.0)
            .weak(),
    );

    ScrollArea::horizontal().id_salt(format!("{id}_h")).show(ui, |ui| {
        ui.vertical(|ui| {
            egui::Grid::new(format!("{id}_header"))
                .min_col_width(COL_WIDTH)
                .max_col_width(COL_WIDTH)
                .show(ui, |ui| {
                    ui.label(RichText::new("").strong());
                    for name in &table.columns {
                        ui.label(RichText::new(name).strong());
                    }
                    ui.end_row();
                });
            ui.separator();

            ScrollArea::vertical()
                .id_salt(format!("{id}_v"))
                .max_height(MAX_HEIGHT)
                .auto_shrink([false, true])
                .show_rows(ui, ROW_HEIGHT, table.row_count(), |ui, row_range| {
                    egui::Grid::new(format!("{id}_rows"))
                        .striped(true)
                        .min_col_width(COL_WIDTH)
                        .max_col_width(COL_WIDTH)
                        .show(ui, |ui| {
                            for idx in row_range {
                                ui.label(RichText::new(idx.to_string()).weak());
                                for cell in &table.rows[idx] {
                                    ui.label(cell);
                                }
                                ui.end_row();
                            }
                        });
                });
        });
    });
}
