//! Gallery module - selection-driven render dispatch
//!
//! A render cycle takes the current `PlotType`, loads its dataset afresh and
//! returns the page outputs in display order. Branches never share state.

pub mod builders;
mod plot_type;

pub use plot_type::PlotType;

use crate::charts::Chart;
use crate::data::{load_dataset, DatasetSource, LoaderError, ProcessorError, TableView};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error("Data processing failed: {0}")]
    Processor(#[from] ProcessorError),
}

/// One item handed to the display sink.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutput {
    Table(TableView),
    Chart(Chart),
}

impl PageOutput {
    pub fn as_chart(&self) -> Option<&Chart> {
        match self {
            PageOutput::Chart(chart) => Some(chart),
            PageOutput::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableView> {
        match self {
            PageOutput::Table(table) => Some(table),
            PageOutput::Chart(_) => None,
        }
    }
}

/// Run one render cycle for `plot`.
pub fn render(plot: PlotType, source: &dyn DatasetSource) -> Result<Vec<PageOutput>, GalleryError> {
    let dataset = load_dataset(source, plot.dataset())?;
    tracing::info!(plot = %plot, dataset = %dataset.name, rows = dataset.row_count(), "render cycle");

    let outputs = match plot {
        PlotType::Histogram => vec![
            PageOutput::Table(builders::diamonds_table(&dataset)?),
            PageOutput::Chart(builders::ideal_price_histogram(&dataset)?),
            PageOutput::Chart(builders::stacked_price_histogram(&dataset)?),
        ],
        PlotType::Lineplot => vec![PageOutput::Chart(builders::fmri_lineplot(&dataset)?)],
        PlotType::Scatterplot => vec![PageOutput::Chart(builders::diamonds_scatterplot(&dataset)?)],
        PlotType::Boxplot => vec![PageOutput::Chart(builders::tips_boxplot(&dataset)?)],
    };

    for chart in outputs.iter().filter_map(PageOutput::as_chart) {
        tracing::debug!(chart = %chart.id, title = ?chart.title, "chart built");
    }
    tracing::debug!(plot = %plot, outputs = outputs.len(), "render cycle complete");
    Ok(outputs)
}
