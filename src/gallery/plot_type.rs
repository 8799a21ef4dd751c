//! Plot type selection.

use crate::data::DatasetName;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four plot types offered by the choice control.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    #[default]
    Histogram,
    Lineplot,
    Scatterplot,
    Boxplot,
}

impl PlotType {
    /// Choice control order.
    pub const ALL: [PlotType; 4] = [
        PlotType::Histogram,
        PlotType::Lineplot,
        PlotType::Scatterplot,
        PlotType::Boxplot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PlotType::Histogram => "Histogram",
            PlotType::Lineplot => "Lineplot",
            PlotType::Scatterplot => "Scatterplot",
            PlotType::Boxplot => "Boxplot",
        }
    }

    /// Lowercase name used for exported file names.
    pub fn slug(self) -> &'static str {
        match self {
            PlotType::Histogram => "histogram",
            PlotType::Lineplot => "lineplot",
            PlotType::Scatterplot => "scatterplot",
            PlotType::Boxplot => "boxplot",
        }
    }

    pub fn dataset(self) -> DatasetName {
        match self {
            PlotType::Histogram | PlotType::Scatterplot => DatasetName::Diamonds,
            PlotType::Lineplot => DatasetName::Fmri,
            PlotType::Boxplot => DatasetName::Tips,
        }
    }
}

impl fmt::Display for PlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
