//! Charts module - chart model and rendering

mod model;
pub mod palette;
mod plotter;
mod renderer;

pub use model::{
    AxisScale, Bounds, BoxBody, BoxHue, Chart, ChartBody, Dash, HistogramBody, HistogramLayer,
    Legend, LegendEntry, LegendFont, LegendSection, LineBody, LinePoint, LineSeries, Mapping,
    RowFilter, ScatterBody, ScatterGroup, ScatterPoint, Swatch,
};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer};
