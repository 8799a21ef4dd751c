//! Chart Viewer Widget
//! Display sink: paints the current page outputs top to bottom in call order.

use crate::charts::ChartPlotter;
use crate::gallery::PageOutput;
use crate::gui::table_view;
use egui::{Color32, RichText};

const CHART_HEIGHT: f32 = 420.0;
const OUTPUT_SPACING: f32 = 24.0;

#[derive(Default)]
pub struct ChartViewer {
    pub outputs: Vec<PageOutput>,
    pub error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_outputs(&mut self, outputs: Vec<PageOutput>) {
        self.outputs = outputs;
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.outputs.clear();
        self.error = Some(error);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            egui::Frame::none()
                .stroke(egui::Stroke::new(1.0, Color32::from_rgb(220, 53, 69)))
                .rounding(5.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.label(
                        RichText::new(error)
                            .color(Color32::from_rgb(220, 53, 69))
                            .monospace(),
                    );
                });
            return;
        }

        for (idx, output) in self.outputs.iter().enumerate() {
            match output {
                PageOutput::Table(table) => {
                    table_view::show_table(ui, &format!("table_{idx}"), table);
                }
                PageOutput::Chart(chart) => {
                    ChartPlotter::draw_chart(ui, chart, CHART_HEIGHT);
                }
            }
            ui.add_space(OUTPUT_SPACING);
        }
    }
}
