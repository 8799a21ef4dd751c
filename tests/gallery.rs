mod common;

use common::{FrameSource, CUTS, DIAMOND_ROWS};
use seaview::charts::{ChartBody, Dash, LegendFont};
use seaview::data::{LoaderError, CLARITY_RANKING};
use seaview::gallery::builders::{IDEAL_HISTOGRAM_TITLE, STACKED_HISTOGRAM_TITLE};
use seaview::gallery::{render, GalleryError, PageOutput, PlotType};

fn charts(outputs: &[PageOutput]) -> Vec<&seaview::charts::Chart> {
    outputs.iter().filter_map(PageOutput::as_chart).collect()
}

#[test]
fn histogram_renders_table_then_two_charts() {
    let source = FrameSource::with_all();
    let outputs = render(PlotType::Histogram, &source).unwrap();

    assert_eq!(outputs.len(), 3);
    let table = outputs[0].as_table().expect("table comes first");
    assert_eq!(table.row_count(), DIAMOND_ROWS);
    assert!(table.columns.iter().any(|c| c == "cut"));

    let charts = charts(&outputs);
    assert_eq!(charts.len(), 2);
    assert_eq!(charts[0].title.as_deref(), Some(IDEAL_HISTOGRAM_TITLE));
    assert_eq!(charts[1].title.as_deref(), Some(STACKED_HISTOGRAM_TITLE));
}

#[test]
fn ideal_histogram_only_counts_ideal_rows() {
    let source = FrameSource::with_all();
    let outputs = render(PlotType::Histogram, &source).unwrap();
    let chart = charts(&outputs)[0];

    let filter = chart.filter.as_ref().expect("ideal chart is filtered");
    assert_eq!((filter.column.as_str(), filter.equals.as_str()), ("cut", "Ideal"));
    assert_eq!(chart.mapping.hue, None);

    let ChartBody::Histogram(body) = &chart.body else {
        panic!("expected histogram body");
    };
    assert!(!body.stacked);
    assert_eq!(body.layers.len(), 1);
    let ideal_rows = (0..DIAMOND_ROWS).filter(|i| i % CUTS.len() == 0).count();
    assert_eq!(body.layers[0].counts.iter().sum::<f64>(), ideal_rows as f64);
    assert!(body.edges.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn stacked_histogram_covers_every_cut() {
    let source = FrameSource::with_all();
    let outputs = render(PlotType::Histogram, &source).unwrap();
    let chart = charts(&outputs)[1];

    assert!(chart.filter.is_none());
    assert_eq!(chart.mapping.hue.as_deref(), Some("cut"));
    let ChartBody::Histogram(body) = &chart.body else {
        panic!("expected histogram body");
    };
    assert!(body.stacked);

    let labels: Vec<&str> = body.layers.iter().filter_map(|l| l.label.as_deref()).collect();
    assert_eq!(labels, CUTS);
    let total: f64 = body.layers.iter().flat_map(|l| &l.counts).sum();
    assert_eq!(total, DIAMOND_ROWS as f64);

    // Last cut sits on the axis; each layer rests on the ones after it.
    let last = body.layers.last().unwrap();
    assert!(last.baseline.iter().all(|b| *b == 0.0));
    for pair in body.layers.windows(2) {
        for bin in 0..body.edges.len() - 1 {
            assert_eq!(pair[0].baseline[bin], pair[1].baseline[bin] + pair[1].counts[bin]);
        }
    }

    let legend = chart.legend.as_ref().unwrap();
    assert_eq!(legend.labels("cut"), CUTS);
}

#[test]
fn lineplot_groups_by_region_and_event() {
    let source = FrameSource::with_all();
    let outputs = render(PlotType::Lineplot, &source).unwrap();
    assert_eq!(outputs.len(), 1);
    let chart = outputs[0].as_chart().unwrap();

    assert_eq!(chart.mapping.x, "timepoint");
    assert_eq!(chart.mapping.y.as_deref(), Some("signal"));
    assert_eq!(chart.mapping.hue.as_deref(), Some("region"));
    assert_eq!(chart.mapping.style.as_deref(), Some("event"));

    let ChartBody::Line(body) = &chart.body else {
        panic!("expected line body");
    };
    assert_eq!(body.series.len(), 4);
    for series in &body.series {
        assert_eq!(series.points.len(), 4);
        assert!(series.points.iter().all(|p| p.band.is_some()));
    }
    let cue: Vec<_> = body.series.iter().filter(|s| s.label.ends_with("cue")).collect();
    assert!(cue.iter().all(|s| s.dash == Dash::Dashed));

    let legend = chart.legend.as_ref().unwrap();
    assert_eq!(legend.labels("region"), vec!["parietal", "frontal"]);
    assert_eq!(legend.labels("event"), vec!["stim", "cue"]);
}

#[test]
fn scatterplot_orders_clarity_by_grade() {
    let source = FrameSource::with_all();
    let outputs = render(PlotType::Scatterplot, &source).unwrap();
    assert_eq!(outputs.len(), 1);
    let chart = outputs[0].as_chart().unwrap();

    let legend = chart.legend.as_ref().unwrap();
    assert_eq!(legend.font, LegendFont::Small);
    assert_eq!(
        legend.labels("clarity"),
        vec!["I1", "SI2", "SI1", "VS2", "VS1", "VVS2", "VVS1", "IF"]
    );
    assert!(!legend.labels("depth").is_empty());

    let ChartBody::Scatter(body) = &chart.body else {
        panic!("expected scatter body");
    };
    assert_eq!(body.outline_width, 0.0);
    let order: Vec<&str> = body.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(order, CLARITY_RANKING);

    let points: Vec<_> = body.groups.iter().flat_map(|g| &g.points).collect();
    assert_eq!(points.len(), DIAMOND_ROWS);
    assert!(points.iter().all(|p| (1.0..=8.0).contains(&p.size)));
    assert_eq!(chart.mapping.size.as_deref(), Some("depth"));
}

#[test]
fn boxplot_groups_by_day_and_smoker() {
    let source = FrameSource::with_all();
    let outputs = render(PlotType::Boxplot, &source).unwrap();
    assert_eq!(outputs.len(), 1);
    let chart = outputs[0].as_chart().unwrap();

    assert_eq!(chart.mapping.x, "day");
    assert_eq!(chart.mapping.hue.as_deref(), Some("smoker"));
    assert_eq!(chart.x_label, "Total Bill");
    assert_eq!(chart.y_label, "Day of the Week");

    let ChartBody::Box(body) = &chart.body else {
        panic!("expected box body");
    };
    assert_eq!(body.categories, vec!["Thur", "Fri", "Sat", "Sun"]);
    let hues: Vec<&str> = body.hues.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(hues, vec!["Yes", "No"]);
    for hue in &body.hues {
        assert!(hue.boxes.iter().all(|b| b.as_ref().map(|s| s.count) == Some(3)));
    }

    let legend = chart.legend.as_ref().unwrap();
    assert_eq!(legend.font, LegendFont::Small);
    assert_eq!(legend.labels("smoker"), vec!["Yes", "No"]);
}

#[test]
fn repeated_render_is_identical_and_reloads() {
    for plot in PlotType::ALL {
        let source = FrameSource::with_all();
        let first = render(plot, &source).unwrap();
        let second = render(plot, &source).unwrap();
        assert_eq!(first, second, "{plot} differs between cycles");
        assert_eq!(source.fetches(), 2, "{plot} must reload its dataset");
    }
}

#[test]
fn missing_dataset_propagates() {
    let source = FrameSource::default();
    let err = render(PlotType::Boxplot, &source).unwrap_err();
    assert!(matches!(
        err,
        GalleryError::Loader(LoaderError::NotFound { .. })
    ));
}
