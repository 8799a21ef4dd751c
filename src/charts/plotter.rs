//! Chart Plotter Module
//! Draws `Chart` values as interactive egui_plot widgets.

use crate::charts::palette::Rgb;
use crate::charts::{
    AxisScale, BoxBody, Chart, ChartBody, Dash, HistogramBody, Legend, LineBody, ScatterBody,
    Swatch,
};
use egui::{Color32, RichText, Stroke};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Line, LineStyle, Plot, PlotPoints,
    PlotUi, Points, Polygon,
};
use std::collections::BTreeMap;

/// Darkgrid box edge color.
const BOX_EDGE: Color32 = Color32::from_rgb(61, 61, 61);
/// Screen pixels per point of marker diameter.
const MARKER_SCALE: f64 = 1.5;
const BAND_OPACITY: f32 = 0.2;

pub fn color32(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.0, rgb.1, rgb.2)
}

/// Marker radius on screen for an area given in square points.
pub fn marker_radius(size: f64) -> f32 {
    (size.max(0.0).sqrt() / 2.0 * MARKER_SCALE) as f32
}

/// Creates interactive chart widgets using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw title, plot and legend of one chart.
    pub fn draw_chart(ui: &mut egui::Ui, chart: &Chart, height: f32) {
        if let Some(title) = &chart.title {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(title).size(16.0).strong());
            });
            ui.add_space(4.0);
        }

        let log_x = chart.x_scale == AxisScale::Log10;
        let mut plot = Plot::new(&chart.id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(chart.x_label.clone())
            .y_axis_label(chart.y_label.clone());

        if log_x {
            plot = plot.x_axis_formatter(|mark, _range| Self::format_log_tick(mark.value));
        }

        if let Some(categories) = chart.x_categories() {
            let labels = categories.to_vec();
            let count = labels.len();
            plot = plot
                .include_x(-0.5)
                .include_x(count as f64 - 0.5)
                .x_grid_spacer(move |_input| {
                    (0..count)
                        .map(|i| GridMark {
                            value: i as f64,
                            step_size: 1.0,
                        })
                        .collect()
                })
                .x_axis_formatter(move |mark, _range| {
                    let idx = mark.value.round();
                    if idx >= 0.0 && (mark.value - idx).abs() < 1e-6 {
                        labels.get(idx as usize).cloned().unwrap_or_default()
                    } else {
                        String::new()
                    }
                });
        }

        plot.show(ui, |plot_ui| match &chart.body {
            ChartBody::Histogram(body) => Self::draw_histogram(plot_ui, body, log_x),
            ChartBody::Line(body) => Self::draw_lines(plot_ui, body),
            ChartBody::Scatter(body) => Self::draw_scatter(plot_ui, body),
            ChartBody::Box(body) => Self::draw_boxes(plot_ui, body),
        });

        if let Some(legend) = &chart.legend {
            ui.add_space(6.0);
            Self::draw_legend(ui, legend);
        }
    }

    /// Tick text for a log10 axis: only whole decades are labelled.
    pub fn format_log_tick(exponent: f64) -> String {
        let rounded = exponent.round();
        if (exponent - rounded).abs() < 1e-6 {
            format!("{:.0}", 10f64.powf(rounded))
        } else {
            String::new()
        }
    }

    fn draw_histogram(plot_ui: &mut PlotUi, body: &HistogramBody, log_x: bool) {
        let scale = |x: f64| if log_x { x.log10() } else { x };
        let edge = Stroke::new(body.line_width, color32(body.edge_color));

        for layer in &body.layers {
            let fill = color32(layer.color);
            let bars: Vec<Bar> = layer
                .counts
                .iter()
                .zip(&layer.baseline)
                .zip(body.edges.windows(2))
                .filter(|((count, _), _)| **count > 0.0)
                .map(|((count, base), bin)| {
                    let (x0, x1) = (scale(bin[0]), scale(bin[1]));
                    Bar::new((x0 + x1) / 2.0, *count)
                        .width(x1 - x0)
                        .base_offset(*base)
                        .fill(fill)
                        .stroke(edge)
                })
                .collect();

            let mut chart = BarChart::new(bars).color(fill);
            if let Some(label) = &layer.label {
                chart = chart.name(label);
            }
            plot_ui.bar_chart(chart);
        }
    }

    fn draw_lines(plot_ui: &mut PlotUi, body: &LineBody) {
        for series in &body.series {
            let color = color32(series.color);

            for ring in series.band_rings() {
                let ring: Vec<[f64; 2]> = ring.into_iter().map(|(x, y)| [x, y]).collect();
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(ring))
                        .fill_color(color.gamma_multiply(BAND_OPACITY))
                        .stroke(Stroke::NONE)
                        .name(&series.label),
                );
            }

            let means: PlotPoints = series.points.iter().map(|p| [p.x, p.mean]).collect();
            let style = match series.dash {
                Dash::Solid => LineStyle::Solid,
                Dash::Dashed => LineStyle::dashed_loose(),
            };
            plot_ui.line(
                Line::new(means)
                    .color(color)
                    .width(1.5)
                    .style(style)
                    .name(&series.label),
            );
        }
    }

    fn draw_scatter(plot_ui: &mut PlotUi, body: &ScatterBody) {
        for group in &body.groups {
            let color = color32(group.color);

            // Points sharing a radius are drawn as one item.
            let mut buckets: BTreeMap<u32, Vec<[f64; 2]>> = BTreeMap::new();
            for p in &group.points {
                let key = (marker_radius(p.size) * 4.0).round() as u32;
                buckets.entry(key).or_default().push([p.x, p.y]);
            }

            for (key, points) in buckets {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(key as f32 / 4.0)
                        .filled(true)
                        .color(color)
                        .name(&group.label),
                );
            }
        }
    }

    fn draw_boxes(plot_ui: &mut PlotUi, body: &BoxBody) {
        for (hue_idx, hue) in body.hues.iter().enumerate() {
            let color = color32(hue.color);
            let offset = body.offset(hue_idx);

            let mut elems = Vec::new();
            let mut fliers: Vec<[f64; 2]> = Vec::new();
            for (cat_idx, stats) in hue.boxes.iter().enumerate() {
                let Some(stats) = stats else {
                    continue;
                };
                let x = cat_idx as f64 + offset;
                elems.push(
                    BoxElem::new(
                        x,
                        BoxSpread::new(
                            stats.whisker_low,
                            stats.q1,
                            stats.median,
                            stats.q3,
                            stats.whisker_high,
                        ),
                    )
                    .name(format!("{} / {}", body.categories[cat_idx], hue.label))
                    .box_width(body.box_width() * 0.9)
                    .whisker_width(body.box_width() * 0.45)
                    .fill(color)
                    .stroke(Stroke::new(1.2, BOX_EDGE)),
                );
                fliers.extend(stats.fliers.iter().map(|&f| [x, f]));
            }

            plot_ui.box_plot(BoxPlot::new(elems).name(&hue.label));
            if !fliers.is_empty() {
                plot_ui.points(
                    Points::new(PlotPoints::from(fliers))
                        .radius(2.5)
                        .color(BOX_EDGE)
                        .filled(false),
                );
            }
        }
    }

    /// Legend strip below the plot: section titles followed by swatches.
    pub fn draw_legend(ui: &mut egui::Ui, legend: &Legend) {
        let size = legend.font.points();

        for section in &legend.sections {
            ui.horizontal_wrapped(|ui| {
                if let Some(title) = &section.title {
                    ui.label(RichText::new(title).size(size).strong());
                    ui.add_space(6.0);
                }
                for entry in &section.entries {
                    let (rect, _) =
                        ui.allocate_exact_size(egui::vec2(size + 4.0, size), egui::Sense::hover());
                    let painter = ui.painter();
                    match entry.swatch {
                        Swatch::Patch(color) => {
                            painter.rect_filled(rect.shrink(1.0), 2.0, color32(color));
                        }
                        Swatch::Line { color, dash } => {
                            let y = rect.center().y;
                            let stroke = Stroke::new(2.0, color32(color));
                            match dash {
                                Dash::Solid => {
                                    painter.line_segment(
                                        [egui::pos2(rect.left(), y), egui::pos2(rect.right(), y)],
                                        stroke,
                                    );
                                }
                                Dash::Dashed => {
                                    let third = rect.width() / 3.0;
                                    for seg in [0.0, 2.0] {
                                        let x0 = rect.left() + seg * third;
                                        painter.line_segment(
                                            [egui::pos2(x0, y), egui::pos2(x0 + third, y)],
                                            stroke,
                                        );
                                    }
                                }
                            }
                        }
                        Swatch::Marker { color, size: area } => {
                            let radius = marker_radius(area).max(1.5);
                            painter.circle_filled(rect.center(), radius, color32(color));
                        }
                    }
                    ui.label(RichText::new(&entry.label).size(size));
                    ui.add_space(10.0);
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_ticks_label_whole_decades_only() {
        assert_eq!(ChartPlotter::format_log_tick(3.0), "1000");
        assert_eq!(ChartPlotter::format_log_tick(2.5), "");
    }

    #[test]
    fn marker_radius_grows_with_area() {
        assert!(marker_radius(8.0) > marker_radius(1.0));
        assert_eq!(marker_radius(0.0), 0.0);
    }

    #[test]
    fn color_conversion_keeps_channels() {
        assert_eq!(color32(Rgb(1, 2, 3)), Color32::from_rgb(1, 2, 3));
    }
}
