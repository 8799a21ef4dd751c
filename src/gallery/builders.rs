//! Plot Branch Builders
//! One pure function per chart: loaded dataset in, owned `Chart` out.

use crate::charts::palette::{self, Cubehelix, Rgb, DEEP, DEEP_MAGENTA};
use crate::charts::{
    AxisScale, BoxBody, BoxHue, Chart, ChartBody, Dash, HistogramBody, HistogramLayer, Legend,
    LegendEntry, LegendFont, LegendSection, LineBody, LinePoint, LineSeries, Mapping, RowFilter,
    ScatterBody, ScatterGroup, ScatterPoint, Swatch,
};
use crate::data::{DataProcessor, ExampleDataset, ProcessorError, TableView, CLARITY_RANKING};
use crate::gallery::GalleryError;
use crate::stats::StatsCalculator;
use rayon::prelude::*;
use std::cmp::Ordering;

pub const IDEAL_HISTOGRAM_TITLE: &str = "Histogram of Price of Ideal Cut Diamonds";
pub const STACKED_HISTOGRAM_TITLE: &str = "Stacked Histogram of Diamond Price by Cut";

const HIST_EDGE_GRAY: f64 = 0.3;
const HIST_LINE_WIDTH: f32 = 0.5;
const CI_LEVEL: f64 = 0.95;
const STYLE_LEGEND_GRAY: f64 = 0.2;
const SCATTER_SIZES: (f64, f64) = (1.0, 8.0);
const BOX_GROUP_WIDTH: f64 = 0.8;

/// "ch:r=-.2,d=.3_r"
const CLARITY_PALETTE: Cubehelix = Cubehelix {
    start: 0.0,
    rot: -0.2,
    gamma: 1.0,
    hue: 0.8,
    light: 0.85,
    dark: 0.3,
    reverse: true,
};

fn log10_positive(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    values
        .into_iter()
        .filter(|v| *v > 0.0)
        .map(f64::log10)
        .collect()
}

fn patch_section(title: &str, labels: &[String], colors: &[Rgb]) -> LegendSection {
    LegendSection {
        title: Some(title.to_string()),
        entries: labels
            .iter()
            .zip(colors)
            .map(|(label, color)| LegendEntry {
                label: label.clone(),
                swatch: Swatch::Patch(*color),
            })
            .collect(),
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// The diamonds frame with every column coerced to text.
pub fn diamonds_table(ds: &ExampleDataset) -> Result<TableView, ProcessorError> {
    DataProcessor::to_object_table(&ds.frame)
}

/// Log-scaled price histogram of the Ideal cut only.
pub fn ideal_price_histogram(ds: &ExampleDataset) -> Result<Chart, GalleryError> {
    let ideal = DataProcessor::filter_eq(&ds.frame, "cut", "Ideal")?;
    let log_prices = log10_positive(DataProcessor::f64_values(&ideal, "price")?.into_iter().flatten());

    let log_edges = StatsCalculator::auto_bin_edges(&log_prices);
    let counts = StatsCalculator::histogram_counts(&log_prices, &log_edges);
    let baseline = vec![0.0; counts.len()];

    Ok(Chart {
        id: "histogram-ideal".to_string(),
        title: Some(IDEAL_HISTOGRAM_TITLE.to_string()),
        x_label: "price".to_string(),
        y_label: "Count".to_string(),
        x_scale: AxisScale::Log10,
        mapping: Mapping {
            x: "price".to_string(),
            ..Default::default()
        },
        filter: Some(RowFilter {
            column: "cut".to_string(),
            equals: "Ideal".to_string(),
        }),
        legend: None,
        body: ChartBody::Histogram(HistogramBody {
            edges: log_edges.iter().map(|e| 10f64.powf(*e)).collect(),
            layers: vec![HistogramLayer {
                label: None,
                color: DEEP[0],
                counts,
                baseline,
            }],
            stacked: false,
            edge_color: Rgb::gray(HIST_EDGE_GRAY),
            line_width: HIST_LINE_WIDTH,
        }),
    })
}

/// Log-scaled price histogram over every cut, stacked by cut.
pub fn stacked_price_histogram(ds: &ExampleDataset) -> Result<Chart, GalleryError> {
    let cuts = ds.levels("cut")?;

    let all_prices = log10_positive(DataProcessor::f64_values(&ds.frame, "price")?.into_iter().flatten());
    let log_edges = StatsCalculator::auto_bin_edges(&all_prices);

    let groups: Vec<Vec<f64>> = DataProcessor::group_values(&ds.frame, "price", "cut", &cuts)?
        .into_iter()
        .map(log10_positive)
        .collect();
    let counts = StatsCalculator::histogram_counts_grouped(&groups, &log_edges);
    let baselines = StatsCalculator::stack_baselines(&counts);
    let colors = palette::light(DEEP_MAGENTA, cuts.len(), true);

    let layers = cuts
        .iter()
        .zip(&colors)
        .zip(counts.into_iter().zip(baselines))
        .map(|((cut, color), (counts, baseline))| HistogramLayer {
            label: Some(cut.clone()),
            color: *color,
            counts,
            baseline,
        })
        .collect();

    Ok(Chart {
        id: "histogram-stacked".to_string(),
        title: Some(STACKED_HISTOGRAM_TITLE.to_string()),
        x_label: "price".to_string(),
        y_label: "Count".to_string(),
        x_scale: AxisScale::Log10,
        mapping: Mapping {
            x: "price".to_string(),
            hue: Some("cut".to_string()),
            ..Default::default()
        },
        filter: None,
        legend: Some(Legend {
            font: LegendFont::Normal,
            sections: vec![patch_section("cut", &cuts, &colors)],
        }),
        body: ChartBody::Histogram(HistogramBody {
            edges: log_edges.iter().map(|e| 10f64.powf(*e)).collect(),
            layers,
            stacked: true,
            edge_color: Rgb::gray(HIST_EDGE_GRAY),
            line_width: HIST_LINE_WIDTH,
        }),
    })
}

/// Mean signal over time, colored by region and dashed by event.
pub fn fmri_lineplot(ds: &ExampleDataset) -> Result<Chart, GalleryError> {
    let regions = ds.levels("region")?;
    let events = ds.levels("event")?;

    let xs = DataProcessor::f64_values(&ds.frame, "timepoint")?;
    let ys = DataProcessor::f64_values(&ds.frame, "signal")?;
    let region_keys = DataProcessor::str_values(&ds.frame, "region")?;
    let event_keys = DataProcessor::str_values(&ds.frame, "event")?;

    let colors = palette::deep(regions.len());
    let dash_for = |event_idx: usize| if event_idx == 0 { Dash::Solid } else { Dash::Dashed };

    let combos: Vec<(usize, usize)> = (0..regions.len())
        .flat_map(|r| (0..events.len()).map(move |e| (r, e)))
        .collect();

    let series: Vec<LineSeries> = combos
        .par_iter()
        .map(|&(r, e)| {
            let mut pairs: Vec<(f64, f64)> = xs
                .iter()
                .zip(&ys)
                .zip(region_keys.iter().zip(&event_keys))
                .filter_map(|((x, y), (region, event))| {
                    let matches = region.as_deref() == Some(regions[r].as_str())
                        && event.as_deref() == Some(events[e].as_str());
                    match (x, y) {
                        (Some(x), Some(y)) if matches => Some((*x, *y)),
                        _ => None,
                    }
                })
                .collect();
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

            let points = pairs
                .chunk_by(|a, b| a.0 == b.0)
                .filter_map(|chunk| {
                    let values: Vec<f64> = chunk.iter().map(|p| p.1).collect();
                    StatsCalculator::mean_ci(&values, CI_LEVEL).map(|est| LinePoint {
                        x: chunk[0].0,
                        mean: est.mean,
                        band: est.interval,
                    })
                })
                .collect();

            LineSeries {
                label: format!("{}, {}", regions[r], events[e]),
                color: colors[r],
                dash: dash_for(e),
                points,
            }
        })
        .filter(|s| !s.points.is_empty())
        .collect();

    let region_section = LegendSection {
        title: Some("region".to_string()),
        entries: regions
            .iter()
            .zip(&colors)
            .map(|(region, color)| LegendEntry {
                label: region.clone(),
                swatch: Swatch::Line {
                    color: *color,
                    dash: Dash::Solid,
                },
            })
            .collect(),
    };
    let event_section = LegendSection {
        title: Some("event".to_string()),
        entries: events
            .iter()
            .enumerate()
            .map(|(idx, event)| LegendEntry {
                label: event.clone(),
                swatch: Swatch::Line {
                    color: Rgb::gray(STYLE_LEGEND_GRAY),
                    dash: dash_for(idx),
                },
            })
            .collect(),
    };

    Ok(Chart {
        id: "lineplot".to_string(),
        title: None,
        x_label: "timepoint".to_string(),
        y_label: "signal".to_string(),
        x_scale: AxisScale::Linear,
        mapping: Mapping {
            x: "timepoint".to_string(),
            y: Some("signal".to_string()),
            hue: Some("region".to_string()),
            style: Some("event".to_string()),
            size: None,
        },
        filter: None,
        legend: Some(Legend {
            font: LegendFont::Normal,
            sections: vec![region_section, event_section],
        }),
        body: ChartBody::Line(LineBody { series }),
    })
}

/// Price against carat, colored by clarity grade and sized by depth.
pub fn diamonds_scatterplot(ds: &ExampleDataset) -> Result<Chart, GalleryError> {
    let carat = DataProcessor::f64_values(&ds.frame, "carat")?;
    let price = DataProcessor::f64_values(&ds.frame, "price")?;
    let depth = DataProcessor::f64_values(&ds.frame, "depth")?;
    let clarity = DataProcessor::str_values(&ds.frame, "clarity")?;

    let (depth_min, depth_max) = depth
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
            (lo.min(d), hi.max(d))
        });
    let (size_lo, size_hi) = SCATTER_SIZES;
    let size_of = |d: f64| {
        if depth_max > depth_min {
            size_lo + (d - depth_min) / (depth_max - depth_min) * (size_hi - size_lo)
        } else {
            (size_lo + size_hi) / 2.0
        }
    };

    let colors = CLARITY_PALETTE.colors(CLARITY_RANKING.len());

    let groups: Vec<ScatterGroup> = CLARITY_RANKING
        .par_iter()
        .zip(colors.par_iter())
        .map(|(level, color)| {
            let points = carat
                .iter()
                .zip(&price)
                .zip(depth.iter().zip(&clarity))
                .filter_map(|((x, y), (d, c))| match (x, y, d) {
                    (Some(x), Some(y), Some(d)) if c.as_deref() == Some(*level) => {
                        Some(ScatterPoint {
                            x: *x,
                            y: *y,
                            size: size_of(*d),
                        })
                    }
                    _ => None,
                })
                .collect();
            ScatterGroup {
                label: level.to_string(),
                color: *color,
                points,
            }
        })
        .collect();

    let hue_marker = (size_lo + size_hi) / 2.0;
    let clarity_section = LegendSection {
        title: Some("clarity".to_string()),
        entries: CLARITY_RANKING
            .iter()
            .zip(&colors)
            .map(|(level, color)| LegendEntry {
                label: level.to_string(),
                swatch: Swatch::Marker {
                    color: *color,
                    size: hue_marker,
                },
            })
            .collect(),
    };

    let mut sections = vec![clarity_section];
    if depth_max >= depth_min {
        sections.push(LegendSection {
            title: Some("depth".to_string()),
            entries: StatsCalculator::nice_ticks(depth_min, depth_max, 4)
                .into_iter()
                .map(|tick| LegendEntry {
                    label: format_tick(tick),
                    swatch: Swatch::Marker {
                        color: Rgb::gray(STYLE_LEGEND_GRAY),
                        size: size_of(tick),
                    },
                })
                .collect(),
        });
    }

    Ok(Chart {
        id: "scatterplot".to_string(),
        title: None,
        x_label: "carat".to_string(),
        y_label: "price".to_string(),
        x_scale: AxisScale::Linear,
        mapping: Mapping {
            x: "carat".to_string(),
            y: Some("price".to_string()),
            hue: Some("clarity".to_string()),
            style: None,
            size: Some("depth".to_string()),
        },
        filter: None,
        legend: Some(Legend {
            font: LegendFont::Small,
            sections,
        }),
        body: ChartBody::Scatter(ScatterBody {
            groups,
            outline_width: 0.0,
        }),
    })
}

/// Total bill distribution per day, split by smoker.
///
/// The axis titles read "Total Bill" on x and "Day of the Week" on y even
/// though x carries the day and y the bill.
pub fn tips_boxplot(ds: &ExampleDataset) -> Result<Chart, GalleryError> {
    let days = ds.levels("day")?;
    let smokers = ds.levels("smoker")?;
    let colors = palette::deep(smokers.len());

    let hues = smokers
        .iter()
        .zip(&colors)
        .map(|(smoker, color)| -> Result<BoxHue, GalleryError> {
            let subset = DataProcessor::filter_eq(&ds.frame, "smoker", smoker)?;
            let groups = DataProcessor::group_values(&subset, "total_bill", "day", &days)?;
            Ok(BoxHue {
                label: smoker.clone(),
                color: *color,
                boxes: StatsCalculator::box_stats_grouped(&groups),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Chart {
        id: "boxplot".to_string(),
        title: None,
        x_label: "Total Bill".to_string(),
        y_label: "Day of the Week".to_string(),
        x_scale: AxisScale::Linear,
        mapping: Mapping {
            x: "day".to_string(),
            y: Some("total_bill".to_string()),
            hue: Some("smoker".to_string()),
            style: None,
            size: None,
        },
        filter: None,
        legend: Some(Legend {
            font: LegendFont::Small,
            sections: vec![patch_section("smoker", &smokers, &colors)],
        }),
        body: ChartBody::Box(BoxBody {
            categories: days,
            hues,
            group_width: BOX_GROUP_WIDTH,
        }),
    })
}
