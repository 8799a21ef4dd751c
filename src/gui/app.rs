//! Dashboard Main Application
//! Single page: header and choice control on top, page outputs below.

use crate::config::DashboardConfig;
use crate::data::CsvDirectorySource;
use crate::export::export_outputs;
use crate::gallery::{self, PlotType};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};

/// Main application window.
pub struct DashboardApp {
    source: CsvDirectorySource,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    /// Selection the current outputs were built for.
    rendered: Option<PlotType>,
    export_size: (u32, u32),
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: &DashboardConfig,
        source: CsvDirectorySource,
    ) -> Self {
        Self {
            source,
            control_panel: ControlPanel::new(config.default_plot),
            chart_viewer: ChartViewer::new(),
            rendered: None,
            export_size: (config.export_width, config.export_height),
        }
    }

    /// Full render cycle for the current selection: reload, rebuild, replace.
    fn render_selection(&mut self) {
        let plot = self.control_panel.selection;
        self.rendered = Some(plot);

        match gallery::render(plot, &self.source) {
            Ok(outputs) => {
                let charts = outputs.iter().filter(|o| o.as_chart().is_some()).count();
                self.chart_viewer.set_outputs(outputs);
                self.control_panel.export_enabled = charts > 0;
                self.control_panel
                    .set_status(&format!("{plot}: {charts} chart(s) rendered"));
            }
            Err(e) => {
                tracing::error!(plot = %plot, error = %e, "render cycle failed");
                self.chart_viewer.set_error(e.to_string());
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    /// Handle PNG export - render charts into a user-picked folder
    fn handle_export_png(&mut self) {
        let Some(plot) = self.rendered else {
            return;
        };

        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export charts")
            .pick_folder()
        else {
            return; // User cancelled
        };

        let (width, height) = self.export_size;
        match export_outputs(plot, &self.chart_viewer.outputs, &dir, width, height) {
            Ok(paths) => {
                self.control_panel
                    .set_status(&format!("Exported {} file(s) to {}", paths.len(), dir.display()));
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(error = %e, "could not open export folder");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.rendered.is_none() {
            self.render_selection();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.render_selection(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }

                    ui.separator();
                    ui.add_space(8.0);
                    self.chart_viewer.show(ui);
                });
        });
    }
}
