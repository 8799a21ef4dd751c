//! Control Panel Widget
//! Page header and the plot type choice control.

use crate::gallery::PlotType;
use egui::{Color32, ComboBox, RichText};

pub const PAGE_TITLE: &str = "Integrating Seaborn and Streamlit";
pub const PAGE_SUBHEADER: &str = "Rebecca Weng | Dec. 2020";

/// Header area with the plot type selector and export button.
pub struct ControlPanel {
    pub selection: PlotType,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: PlotType::default(),
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new(selection: PlotType) -> Self {
        Self {
            selection,
            ..Default::default()
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(8.0);
        ui.label(RichText::new(PAGE_TITLE).size(30.0).strong());
        ui.add_space(4.0);
        ui.label(RichText::new(PAGE_SUBHEADER).size(18.0).color(Color32::GRAY));
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            let before = self.selection;
            ComboBox::from_label("Plot Type")
                .width(180.0)
                .selected_text(self.selection.label())
                .show_ui(ui, |ui| {
                    for plot in PlotType::ALL {
                        ui.selectable_value(&mut self.selection, plot, plot.label());
                    }
                });
            if self.selection != before {
                action = ControlPanelAction::SelectionChanged;
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.add_enabled_ui(self.export_enabled, |ui| {
                    if ui.button("📄 Export PNG").clicked() {
                        action = ControlPanelAction::ExportPng;
                    }
                });
            });
        });

        ui.add_space(4.0);
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    ExportPng,
}
