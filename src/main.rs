//! Seaview - interactive statistical plot dashboard.

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use seaview::config::DashboardConfig;
use seaview::data::CsvDirectorySource;
use seaview::export::export_outputs;
use seaview::gallery::{self, PlotType};
use seaview::gui::{DashboardApp, PAGE_TITLE};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seaview")]
#[command(about = "Statistical plot dashboard over example datasets", long_about = None)]
struct Args {
    /// Directory holding the example dataset CSV files
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial plot type
    #[arg(long, value_enum)]
    plot: Option<PlotType>,

    /// Render the selected plot into this directory and exit
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write logs to the specified file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(log: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;

    let mut config = match &args.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    config.apply_overrides(args.data_dir, args.plot);

    let source = CsvDirectorySource::new(config.resolve_data_dir());
    tracing::info!(data_dir = %source.root().display(), "starting seaview");

    if let Some(dir) = args.export {
        let plot = config.default_plot;
        let outputs = gallery::render(plot, &source)?;
        let written = export_outputs(
            plot,
            &outputs,
            &dir,
            config.export_width,
            config.export_height,
        )?;
        for path in written {
            println!("{}", path.display());
        }
        return Ok(());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([800.0, 600.0])
            .with_title(PAGE_TITLE),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Seaview",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config, source)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))
}
