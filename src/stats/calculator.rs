//! Statistics Calculator Module
//! Histogram binning, confidence intervals and box/whisker statistics.

use rayon::prelude::*;
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Whisker reach in multiples of the inter-quartile range.
pub const WHISKER_IQR: f64 = 1.5;

/// Mean of one group with its confidence interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanEstimate {
    pub mean: f64,
    /// `None` when there are fewer than two observations.
    pub interval: Option<(f64, f64)>,
}

/// Five-number summary plus outliers for one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub fliers: Vec<f64>,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Sorted copy with NaN removed.
    pub fn sorted(values: &[f64]) -> Vec<f64> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Bin edges by the NumPy "auto" rule: the smaller of the
    /// Freedman-Diaconis and Sturges widths, Sturges alone when IQR is zero.
    pub fn auto_bin_edges(values: &[f64]) -> Vec<f64> {
        let sorted = Self::sorted(values);
        let n = sorted.len();
        if n == 0 {
            return vec![0.0, 1.0];
        }

        let (first, last) = (sorted[0], sorted[n - 1]);
        if first == last {
            return vec![first - 0.5, last + 0.5];
        }

        let range = last - first;
        let sturges = range / ((n as f64).log2() + 1.0);
        let iqr = Self::percentile(&sorted, 75.0) - Self::percentile(&sorted, 25.0);
        let fd = 2.0 * iqr * (n as f64).powf(-1.0 / 3.0);
        let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

        let bins = if width > 0.0 {
            ((range / width).ceil() as usize).max(1)
        } else {
            1
        };

        let mut edges: Vec<f64> = (0..=bins)
            .map(|i| first + range * i as f64 / bins as f64)
            .collect();
        edges[bins] = last;
        edges
    }

    /// Count values per bin; the last bin is closed on the right and
    /// values outside the edges are ignored.
    pub fn histogram_counts(values: &[f64], edges: &[f64]) -> Vec<f64> {
        if edges.len() < 2 {
            return Vec::new();
        }
        let bins = edges.len() - 1;
        let (first, last) = (edges[0], edges[bins]);
        let mut counts = vec![0.0; bins];

        for &v in values {
            if v.is_nan() || v < first || v > last {
                continue;
            }
            // Edges are evenly spaced, so the bin follows from the offset;
            // the neighbour check absorbs rounding at bin boundaries.
            let mut idx = (((v - first) / (last - first)) * bins as f64).floor() as usize;
            idx = idx.min(bins - 1);
            if idx > 0 && v < edges[idx] {
                idx -= 1;
            } else if idx + 1 < bins && v >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1.0;
        }

        counts
    }

    /// Stack baselines for layered counts: the last layer sits at the bottom.
    pub fn stack_baselines(layers: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let bins = layers.first().map(Vec::len).unwrap_or(0);
        let mut running = vec![0.0; bins];
        let mut baselines = vec![Vec::new(); layers.len()];

        for (idx, layer) in layers.iter().enumerate().rev() {
            baselines[idx] = running.clone();
            for (acc, count) in running.iter_mut().zip(layer) {
                *acc += count;
            }
        }

        baselines
    }

    /// Mean with a Student-t confidence interval at `level` (e.g. 0.95).
    pub fn mean_ci(values: &[f64], level: f64) -> Option<MeanEstimate> {
        let values: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = values.len();
        if n == 0 {
            return None;
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        if n < 2 {
            return Some(MeanEstimate {
                mean,
                interval: None,
            });
        }

        let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        let se = variance.sqrt() / (n as f64).sqrt();

        let interval = StudentsT::new(0.0, 1.0, (n - 1) as f64)
            .ok()
            .map(|dist| {
                let t = dist.inverse_cdf(0.5 + level / 2.0);
                (mean - t * se, mean + t * se)
            });

        Some(MeanEstimate { mean, interval })
    }

    /// Box statistics with whiskers at the most extreme points within
    /// 1.5 IQR of the quartiles.
    pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
        let sorted = Self::sorted(values);
        if sorted.is_empty() {
            return None;
        }

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - WHISKER_IQR * iqr, q3 + WHISKER_IQR * iqr);

        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_fence)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_fence)
            .unwrap_or(q3);
        let fliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }

    /// Round step size near `range / target_steps` (1, 2 or 5 times a power of ten).
    pub fn nice_step(range: f64, target_steps: usize) -> f64 {
        let raw_step = range / target_steps.max(1) as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let normalized = raw_step / magnitude;

        let nice = if normalized <= 1.0 {
            1.0
        } else if normalized <= 2.0 {
            2.0
        } else if normalized <= 5.0 {
            5.0
        } else {
            10.0
        };

        nice * magnitude
    }

    /// Multiples of a nice step that fall inside `[lo, hi]`.
    pub fn nice_ticks(lo: f64, hi: f64, target_steps: usize) -> Vec<f64> {
        if !(hi > lo) {
            return vec![lo];
        }
        let step = Self::nice_step(hi - lo, target_steps);
        let first = (lo / step).ceil() as i64;
        let last = (hi / step + 1e-9).floor() as i64;
        (first..=last).map(|k| k as f64 * step).collect()
    }

    /// Box statistics for many groups in parallel, order preserved.
    pub fn box_stats_grouped(groups: &[Vec<f64>]) -> Vec<Option<BoxStats>> {
        groups.par_iter().map(|g| Self::box_stats(g)).collect()
    }

    /// Histogram counts for many groups against shared edges, in parallel.
    pub fn histogram_counts_grouped(groups: &[Vec<f64>], edges: &[f64]) -> Vec<Vec<f64>> {
        groups
            .par_iter()
            .map(|g| Self::histogram_counts(g, edges))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(StatsCalculator::percentile(&sorted, 25.0), 1.75));
        assert!(approx(StatsCalculator::percentile(&sorted, 50.0), 2.5));
        assert!(approx(StatsCalculator::percentile(&sorted, 100.0), 4.0));
        assert!(StatsCalculator::percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn auto_edges_prefer_sturges_for_small_samples() {
        // n = 8: sturges width = 7 / 4 = 1.75, FD width = 2 * 3.5 / 2 = 3.5
        let values: Vec<f64> = (1..=8).map(f64::from).collect();
        let edges = StatsCalculator::auto_bin_edges(&values);
        assert_eq!(edges.len(), 5);
        assert!(approx(edges[0], 1.0));
        assert!(approx(edges[4], 8.0));
    }

    #[test]
    fn auto_edges_for_constant_values() {
        let edges = StatsCalculator::auto_bin_edges(&[3.0, 3.0, 3.0]);
        assert_eq!(edges, vec![2.5, 3.5]);
    }

    #[test]
    fn counts_close_last_bin() {
        let edges = [0.0, 1.0, 2.0];
        let counts = StatsCalculator::histogram_counts(&[0.0, 0.5, 1.0, 2.0, 2.5, -1.0], &edges);
        assert_eq!(counts, vec![2.0, 2.0]);
    }

    #[test]
    fn counts_over_auto_edges_cover_every_value() {
        let values: Vec<f64> = (0..500).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let edges = StatsCalculator::auto_bin_edges(&values);
        let counts = StatsCalculator::histogram_counts(&values, &edges);
        assert_eq!(counts.iter().sum::<f64>(), 500.0);
    }

    #[test]
    fn last_layer_is_stacked_at_bottom() {
        let layers = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let baselines = StatsCalculator::stack_baselines(&layers);
        assert_eq!(baselines[2], vec![0.0, 0.0]);
        assert_eq!(baselines[1], vec![5.0, 6.0]);
        assert_eq!(baselines[0], vec![8.0, 10.0]);
    }

    #[test]
    fn mean_ci_brackets_mean() {
        let est = StatsCalculator::mean_ci(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();
        assert!(approx(est.mean, 3.0));
        let (lo, hi) = est.interval.unwrap();
        // t(0.975, 4) = 2.776, se = 0.7071
        assert!((lo - 1.0368).abs() < 1e-3);
        assert!((hi - 4.9632).abs() < 1e-3);
    }

    #[test]
    fn mean_ci_single_value_has_no_band() {
        let est = StatsCalculator::mean_ci(&[2.0], 0.95).unwrap();
        assert_eq!(est.interval, None);
        assert!(StatsCalculator::mean_ci(&[], 0.95).is_none());
    }

    #[test]
    fn box_stats_flags_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let stats = StatsCalculator::box_stats(&values).unwrap();
        assert!(approx(stats.q1, 2.25));
        assert!(approx(stats.median, 3.5));
        assert!(approx(stats.q3, 4.75));
        assert!(approx(stats.whisker_low, 1.0));
        assert!(approx(stats.whisker_high, 5.0));
        assert_eq!(stats.fliers, vec![100.0]);
    }

    #[test]
    fn nice_ticks_stay_in_range() {
        assert_eq!(StatsCalculator::nice_ticks(43.0, 79.0, 4), vec![50.0, 60.0, 70.0]);
        assert_eq!(StatsCalculator::nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(StatsCalculator::nice_ticks(2.0, 2.0, 5), vec![2.0]);
    }

    #[test]
    fn grouped_results_keep_order() {
        let groups = vec![vec![1.0, 2.0, 3.0], vec![], vec![10.0]];
        let stats = StatsCalculator::box_stats_grouped(&groups);
        assert_eq!(stats.len(), 3);
        assert!(approx(stats[0].as_ref().unwrap().median, 2.0));
        assert!(stats[1].is_none());
        assert!(approx(stats[2].as_ref().unwrap().median, 10.0));
    }
}
