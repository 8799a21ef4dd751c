//! Stats module - binning and summary statistics

mod calculator;

pub use calculator::{BoxStats, MeanEstimate, StatsCalculator, WHISKER_IQR};
