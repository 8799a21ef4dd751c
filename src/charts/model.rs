//! Chart Model
//! Owned, backend-independent description of one chart.
//!
//! A `Chart` carries everything needed to draw it: labels, scales, the
//! semantic mapping of data columns, the legend, and the already-aggregated
//! geometry. Drawing backends never reach back into the dataset.

use crate::charts::palette::Rgb;
use crate::stats::BoxStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log10,
}

/// Which dataset columns drive which visual channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Mapping {
    pub x: String,
    pub y: Option<String>,
    pub hue: Option<String>,
    pub style: Option<String>,
    pub size: Option<String>,
}

/// Row subset a chart was built from (`column == equals`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub column: String,
    pub equals: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendFont {
    Normal,
    Small,
}

impl LegendFont {
    pub fn points(self) -> f32 {
        match self {
            LegendFont::Normal => 14.0,
            LegendFont::Small => 11.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Swatch {
    Patch(Rgb),
    Line { color: Rgb, dash: Dash },
    /// Marker with its area in square points.
    Marker { color: Rgb, size: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub swatch: Swatch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSection {
    pub title: Option<String>,
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub font: LegendFont,
    pub sections: Vec<LegendSection>,
}

impl Legend {
    /// Entry labels of the section titled `title`, in display order.
    pub fn labels(&self, title: &str) -> Vec<&str> {
        self.sections
            .iter()
            .find(|s| s.title.as_deref() == Some(title))
            .map(|s| s.entries.iter().map(|e| e.label.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramLayer {
    pub label: Option<String>,
    pub color: Rgb,
    pub counts: Vec<f64>,
    /// Bar bottoms; all zero unless stacked.
    pub baseline: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBody {
    /// Bin edges in data units (not log-transformed).
    pub edges: Vec<f64>,
    pub layers: Vec<HistogramLayer>,
    pub stacked: bool,
    pub edge_color: Rgb,
    pub line_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub x: f64,
    pub mean: f64,
    pub band: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub label: String,
    pub color: Rgb,
    pub dash: Dash,
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    /// Closed outlines of the confidence band, one per run of consecutive
    /// banded points. Points without a band split the runs; a run needs at
    /// least two points. Each ring is the upper edge followed by the lower
    /// edge reversed.
    pub fn band_rings(&self) -> Vec<Vec<(f64, f64)>> {
        self.points
            .split(|p| p.band.is_none())
            .filter(|run| run.len() > 1)
            .map(|run| {
                let upper = run.iter().filter_map(|p| p.band.map(|(_, hi)| (p.x, hi)));
                let lower = run.iter().rev().filter_map(|p| p.band.map(|(lo, _)| (p.x, lo)));
                upper.chain(lower).collect()
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineBody {
    pub series: Vec<LineSeries>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Marker area in square points.
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub label: String,
    pub color: Rgb,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterBody {
    pub groups: Vec<ScatterGroup>,
    pub outline_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxHue {
    pub label: String,
    pub color: Rgb,
    /// One entry per category; `None` where the group is empty.
    pub boxes: Vec<Option<BoxStats>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxBody {
    pub categories: Vec<String>,
    pub hues: Vec<BoxHue>,
    /// Width shared by all hue boxes of one category.
    pub group_width: f64,
}

impl BoxBody {
    pub fn box_width(&self) -> f64 {
        self.group_width / self.hues.len().max(1) as f64
    }

    /// Horizontal offset of hue `idx` from its category center.
    pub fn offset(&self, idx: usize) -> f64 {
        -self.group_width / 2.0 + self.box_width() * (idx as f64 + 0.5)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartBody {
    Histogram(HistogramBody),
    Line(LineBody),
    Scatter(ScatterBody),
    Box(BoxBody),
}

/// Data-space extent of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Stable identifier, unique within one page.
    pub id: String,
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub mapping: Mapping,
    pub filter: Option<RowFilter>,
    pub legend: Option<Legend>,
    pub body: ChartBody,
}

impl Chart {
    /// Category names along x, for categorical charts.
    pub fn x_categories(&self) -> Option<&[String]> {
        match &self.body {
            ChartBody::Box(b) => Some(&b.categories),
            _ => None,
        }
    }

    /// Extent of everything drawn, in data units.
    pub fn bounds(&self) -> Bounds {
        let mut xs = Extent::default();
        let mut ys = Extent::default();

        match &self.body {
            ChartBody::Histogram(h) => {
                if let (Some(first), Some(last)) = (h.edges.first(), h.edges.last()) {
                    xs.push(*first);
                    xs.push(*last);
                }
                ys.push(0.0);
                for layer in &h.layers {
                    for (count, base) in layer.counts.iter().zip(&layer.baseline) {
                        ys.push(count + base);
                    }
                }
            }
            ChartBody::Line(l) => {
                for p in l.series.iter().flat_map(|s| &s.points) {
                    xs.push(p.x);
                    ys.push(p.mean);
                    if let Some((lo, hi)) = p.band {
                        ys.push(lo);
                        ys.push(hi);
                    }
                }
            }
            ChartBody::Scatter(s) => {
                for p in s.groups.iter().flat_map(|g| &g.points) {
                    xs.push(p.x);
                    ys.push(p.y);
                }
            }
            ChartBody::Box(b) => {
                xs.push(-0.5);
                xs.push(b.categories.len() as f64 - 0.5);
                for stats in b.hues.iter().flat_map(|h| h.boxes.iter().flatten()) {
                    ys.push(stats.whisker_low);
                    ys.push(stats.whisker_high);
                    for &f in &stats.fliers {
                        ys.push(f);
                    }
                }
            }
        }

        Bounds {
            x: xs.finish(),
            y: ys.finish(),
        }
    }
}

#[derive(Default)]
struct Extent(Option<(f64, f64)>);

impl Extent {
    fn push(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        self.0 = Some(match self.0 {
            Some((lo, hi)) => (lo.min(v), hi.max(v)),
            None => (v, v),
        });
    }

    fn finish(self) -> (f64, f64) {
        match self.0 {
            Some((lo, hi)) if lo < hi => (lo, hi),
            Some((v, _)) => (v - 0.5, v + 0.5),
            None => (0.0, 1.0),
        }
    }
}
