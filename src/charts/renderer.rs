//! Static Chart Renderer
//! Renders a `Chart` to a PNG image with plotters.
//!
//! Layout:
//! 1. Title centered above the plot (when the chart has one)
//! 2. Darkgrid plotting area: gray panel, white grid lines
//! 3. Legend column on the right: section titles followed by swatches

use crate::charts::palette::{Rgb, DARKGRID_BACKGROUND};
use crate::charts::plotter::marker_radius;
use crate::charts::{
    AxisScale, BoxBody, Chart, ChartBody, Dash, HistogramBody, Legend, LineBody, ScatterBody,
    Swatch,
};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;
use std::io::Cursor;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

const FONT: &str = "sans-serif";
const LEGEND_WIDTH: u32 = 160;
const BOX_EDGE: RGBColor = RGBColor(61, 61, 61);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pixel buffer does not match {width}x{height}")]
    Buffer { width: u32, height: u32 },
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type Plot2d<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to PNG bytes.
    pub fn render_png(chart: &Chart, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            match &chart.legend {
                Some(legend) if width > LEGEND_WIDTH * 2 => {
                    let (plot_area, legend_area) =
                        root.split_horizontally((width - LEGEND_WIDTH) as i32);
                    Self::draw_body(&plot_area, chart)?;
                    Self::draw_legend(&legend_area, legend)?;
                }
                _ => Self::draw_body(&root, chart)?,
            }

            root.present().map_err(draw_err)?;
        }

        let img = image::RgbImage::from_raw(width, height, buffer)
            .ok_or(RenderError::Buffer { width, height })?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Render one chart and write it to `path`.
    pub fn save_png(chart: &Chart, path: &Path, width: u32, height: u32) -> Result<(), RenderError> {
        let bytes = Self::render_png(chart, width, height)?;
        std::fs::write(path, bytes)?;
        tracing::debug!(chart = %chart.id, path = %path.display(), "chart written");
        Ok(())
    }

    /// Plot-space x range; log charts are laid out in log10 units.
    fn x_range(chart: &Chart) -> Range<f64> {
        let (lo, hi) = chart.bounds().x;
        match chart.x_scale {
            AxisScale::Log10 if lo > 0.0 => lo.log10()..hi.log10(),
            _ => lo..hi,
        }
    }

    fn draw_body(area: &Area<'_>, chart: &Chart) -> Result<(), RenderError> {
        let bounds = chart.bounds();
        let x_range = Self::x_range(chart);
        let y_range = match &chart.body {
            ChartBody::Histogram(_) => 0.0..bounds.y.1 * 1.05,
            _ => {
                let pad = (bounds.y.1 - bounds.y.0) * 0.05;
                bounds.y.0 - pad..bounds.y.1 + pad
            }
        };

        let mut builder = ChartBuilder::on(area);
        builder
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60);
        if let Some(title) = &chart.title {
            builder.caption(title, (FONT, 20.0));
        }
        let mut ctx: Plot2d<'_, '_> = builder
            .build_cartesian_2d(x_range, y_range)
            .map_err(draw_err)?;

        ctx.plotting_area()
            .fill(&rgb(DARKGRID_BACKGROUND))
            .map_err(draw_err)?;

        let log_labels = |v: &f64| format!("{:.0}", 10f64.powf(*v));
        let categories = chart.x_categories().map(<[String]>::to_vec).unwrap_or_default();
        let category_labels = |v: &f64| {
            let idx = v.round();
            if idx >= 0.0 && (v - idx).abs() < 1e-6 {
                categories.get(idx as usize).cloned().unwrap_or_default()
            } else {
                String::new()
            }
        };

        {
            let mut mesh = ctx.configure_mesh();
            mesh.x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .bold_line_style(WHITE)
                .light_line_style(TRANSPARENT)
                .axis_desc_style((FONT, 14.0))
                .label_style((FONT, 12.0));
            if chart.x_scale == AxisScale::Log10 {
                mesh.x_label_formatter(&log_labels);
            }
            if !categories.is_empty() {
                mesh.x_labels(categories.len() + 1)
                    .x_label_formatter(&category_labels);
            }
            mesh.draw().map_err(draw_err)?;
        }

        match &chart.body {
            ChartBody::Histogram(body) => {
                Self::draw_histogram(&mut ctx, body, chart.x_scale == AxisScale::Log10)
            }
            ChartBody::Line(body) => Self::draw_lines(&mut ctx, body),
            ChartBody::Scatter(body) => Self::draw_scatter(&mut ctx, body),
            ChartBody::Box(body) => Self::draw_boxes(&mut ctx, body),
        }
    }

    fn draw_histogram(ctx: &mut Plot2d<'_, '_>, body: &HistogramBody, log_x: bool) -> Result<(), RenderError> {
        let scale = |x: f64| if log_x { x.log10() } else { x };
        let edge = ShapeStyle {
            color: rgb(body.edge_color).to_rgba(),
            filled: false,
            stroke_width: body.line_width.ceil().max(1.0) as u32,
        };

        for layer in &body.layers {
            let fill = rgb(layer.color).filled();
            let bins: Vec<(f64, f64, f64, f64)> = layer
                .counts
                .iter()
                .zip(&layer.baseline)
                .zip(body.edges.windows(2))
                .filter(|((count, _), _)| **count > 0.0)
                .map(|((count, base), bin)| (scale(bin[0]), scale(bin[1]), *base, base + count))
                .collect();

            ctx.draw_series(
                bins.iter()
                    .map(|&(x0, x1, y0, y1)| Rectangle::new([(x0, y0), (x1, y1)], fill)),
            )
            .map_err(draw_err)?;
            ctx.draw_series(
                bins.iter()
                    .map(|&(x0, x1, y0, y1)| Rectangle::new([(x0, y0), (x1, y1)], edge)),
            )
            .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_lines(ctx: &mut Plot2d<'_, '_>, body: &LineBody) -> Result<(), RenderError> {
        for series in &body.series {
            let color = rgb(series.color);

            for ring in series.band_rings() {
                ctx.draw_series(std::iter::once(Polygon::new(ring, color.mix(0.2).filled())))
                    .map_err(draw_err)?;
            }

            let means: Vec<(f64, f64)> = series.points.iter().map(|p| (p.x, p.mean)).collect();
            let style = color.stroke_width(2);
            match series.dash {
                Dash::Solid => {
                    ctx.draw_series(LineSeries::new(means, style)).map_err(draw_err)?;
                }
                Dash::Dashed => {
                    ctx.draw_series(DashedLineSeries::new(means, 8, 5, style))
                        .map_err(draw_err)?;
                }
            }
        }
        Ok(())
    }

    fn draw_scatter(ctx: &mut Plot2d<'_, '_>, body: &ScatterBody) -> Result<(), RenderError> {
        for group in &body.groups {
            let style = rgb(group.color).filled();
            ctx.draw_series(group.points.iter().map(|p| {
                let radius = marker_radius(p.size).round().max(1.0) as i32;
                Circle::new((p.x, p.y), radius, style)
            }))
            .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_boxes(ctx: &mut Plot2d<'_, '_>, body: &BoxBody) -> Result<(), RenderError> {
        let half = body.box_width() * 0.45;
        let cap = body.box_width() * 0.2;
        let edge = BOX_EDGE.stroke_width(1);

        for (hue_idx, hue) in body.hues.iter().enumerate() {
            let fill = rgb(hue.color).filled();
            let offset = body.offset(hue_idx);

            for (cat_idx, stats) in hue.boxes.iter().enumerate() {
                let Some(stats) = stats else {
                    continue;
                };
                let x = cat_idx as f64 + offset;

                ctx.draw_series([
                    Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], fill),
                    Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], edge),
                ])
                .map_err(draw_err)?;
                ctx.draw_series([
                    PathElement::new(vec![(x - half, stats.median), (x + half, stats.median)], edge),
                    PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], edge),
                    PathElement::new(vec![(x, stats.q1), (x, stats.whisker_low)], edge),
                    PathElement::new(
                        vec![(x - cap, stats.whisker_high), (x + cap, stats.whisker_high)],
                        edge,
                    ),
                    PathElement::new(
                        vec![(x - cap, stats.whisker_low), (x + cap, stats.whisker_low)],
                        edge,
                    ),
                ])
                .map_err(draw_err)?;
                ctx.draw_series(
                    stats
                        .fliers
                        .iter()
                        .map(|&f| Circle::new((x, f), 3, BOX_EDGE.stroke_width(1))),
                )
                .map_err(draw_err)?;
            }
        }
        Ok(())
    }

    fn draw_legend(area: &Area<'_>, legend: &Legend) -> Result<(), RenderError> {
        let size = legend.font.points() as f64;
        let line = (size * 1.6) as i32;
        let swatch = size as i32;
        let (left, text_x) = (8, 8 + swatch + 8);
        let mut y = 40;

        for section in &legend.sections {
            if let Some(title) = &section.title {
                area.draw(&Text::new(
                    title.clone(),
                    (left, y),
                    (FONT, size, FontStyle::Bold).into_font(),
                ))
                .map_err(draw_err)?;
                y += line;
            }

            for entry in &section.entries {
                let mid = y + swatch / 2;
                match entry.swatch {
                    Swatch::Patch(color) => {
                        area.draw(&Rectangle::new(
                            [(left, y), (left + swatch, y + swatch)],
                            rgb(color).filled(),
                        ))
                        .map_err(draw_err)?;
                    }
                    Swatch::Line { color, dash } => {
                        let style = rgb(color).stroke_width(2);
                        let segments = match dash {
                            Dash::Solid => vec![(left, left + swatch)],
                            Dash::Dashed => {
                                let third = swatch / 3;
                                vec![(left, left + third), (left + 2 * third, left + swatch)]
                            }
                        };
                        for (x0, x1) in segments {
                            area.draw(&PathElement::new(vec![(x0, mid), (x1, mid)], style))
                                .map_err(draw_err)?;
                        }
                    }
                    Swatch::Marker { color, size: area_pt } => {
                        let radius = marker_radius(area_pt).round().max(2.0) as i32;
                        area.draw(&Circle::new(
                            (left + swatch / 2, mid),
                            radius,
                            rgb(color).filled(),
                        ))
                        .map_err(draw_err)?;
                    }
                }
                area.draw(&Text::new(
                    entry.label.clone(),
                    (text_x, y),
                    (FONT, size).into_font(),
                ))
                .map_err(draw_err)?;
                y += line;
            }
            y += line / 2;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{HistogramLayer, Mapping};

    fn log_histogram() -> Chart {
        Chart {
            id: "h".into(),
            title: None,
            x_label: "price".into(),
            y_label: "Count".into(),
            x_scale: AxisScale::Log10,
            mapping: Mapping::default(),
            filter: None,
            legend: None,
            body: ChartBody::Histogram(HistogramBody {
                edges: vec![100.0, 1000.0, 10000.0],
                layers: vec![HistogramLayer {
                    label: None,
                    color: Rgb(0, 0, 0),
                    counts: vec![1.0, 2.0],
                    baseline: vec![0.0, 0.0],
                }],
                stacked: false,
                edge_color: Rgb(0, 0, 0),
                line_width: 0.5,
            }),
        }
    }

    #[test]
    fn log_charts_use_decade_units() {
        let range = StaticChartRenderer::x_range(&log_histogram());
        assert!((range.start - 2.0).abs() < 1e-12);
        assert!((range.end - 4.0).abs() < 1e-12);
    }

    #[test]
    fn png_matches_requested_size() {
        let bytes = StaticChartRenderer::render_png(&log_histogram(), 320, 200).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (320, 200));
    }

    #[test]
    fn linear_charts_keep_data_units() {
        let mut chart = log_histogram();
        chart.x_scale = AxisScale::Linear;
        let range = StaticChartRenderer::x_range(&chart);
        assert_eq!(range, 100.0..10000.0);
    }
}
