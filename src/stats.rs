//! Running totals and the percentile ratings derived from them.

use crate::core::{PercentilePoint, PercentileSeries, RatingBucketCounts};
use crate::dataset::DistributionSnapshot;
use crate::{ChartError, Result};
use bevy::log::warn;
use error_stack::Report;

/// Percentiles tracked by the reporter's history chart.
pub const DEFAULT_PERCENTILES: [u8; 5] = [5, 25, 50, 75, 95];

/// Running total of `values`: `out[i] = values[0] + .. + values[i]`.
pub fn cumulative_distribution(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |sum, &v| {
            *sum += v;
            Some(*sum)
        })
        .collect()
}

/// Rating below which `fraction` of the players in `counts` sit.
///
/// Finds the first bucket whose cumulative count exceeds `total * fraction`
/// and interpolates linearly inside it.
pub fn percentile_rating(counts: &RatingBucketCounts, fraction: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&fraction) {
        return Err(Report::new(ChartError::FractionOutOfRange(fraction)));
    }
    let dist = counts.as_f64();
    let cumulative = cumulative_distribution(&dist);
    let total = cumulative.last().copied().unwrap_or(0.0);
    if total <= 0.0 {
        return Err(Report::new(ChartError::EmptyDistribution));
    }

    let target = total * fraction;
    // target < total, so some bucket always crosses it
    let i = cumulative
        .iter()
        .position(|&c| c > target)
        .ok_or_else(|| Report::new(ChartError::EmptyDistribution))?;
    let below = if i == 0 { 0.0 } else { cumulative[i - 1] };
    let into_bucket = (target - below) / dist[i];

    let layout = counts.layout();
    Ok(layout.lower_edge(i) + into_bucket * layout.width)
}

/// Percentile history across dated snapshots, one series per percentile.
///
/// Snapshots without any players are skipped.
pub fn percentile_series(
    snapshots: &[DistributionSnapshot],
    percentiles: &[u8],
) -> Result<Vec<PercentileSeries>> {
    let mut series: Vec<PercentileSeries> = percentiles
        .iter()
        .map(|&p| PercentileSeries::new(p, Vec::with_capacity(snapshots.len())))
        .collect();

    for snapshot in snapshots {
        let counts = match snapshot.counts() {
            Ok(counts) => counts,
            Err(report) => {
                warn!(perf_type = %snapshot.perf_type, date = %snapshot.date, "skipping snapshot: {report:?}");
                continue;
            }
        };
        if counts.total() == 0 {
            warn!(perf_type = %snapshot.perf_type, date = %snapshot.date, "skipping empty distribution");
            continue;
        }
        for s in series.iter_mut() {
            let rating = percentile_rating(&counts, f64::from(s.percentile) / 100.0)?;
            s.line.push(PercentilePoint {
                date: snapshot.date,
                rating,
            });
        }
    }

    Ok(series)
}
