//! Which snapshot and perf type the viewer is showing.

use std::collections::HashMap;

use bevy::prelude::Resource;
use chrono::NaiveDateTime;
use rating_charts::core::{PercentileSeries, RatingBucketCounts};
use rating_charts::dataset::{
    DistributionSnapshot, parse_snapshots, perf_types, snapshots_for,
};
use rating_charts::stats::{DEFAULT_PERCENTILES, percentile_series};

use crate::error::{Result, ViewerError};

struct PerfHistory {
    snapshots: Vec<DistributionSnapshot>,
    series: Vec<PercentileSeries>,
}

#[derive(Resource)]
pub struct Browser {
    order: Vec<String>,
    history: HashMap<String, PerfHistory>,
    perf: usize,
    snapshot: usize,
}

impl Browser {
    /// Groups a snapshot dump by perf type and derives each type's
    /// percentile history. Starts on the newest snapshot of `perf_type`.
    pub fn load(json: &str, perf_type: &str) -> Result<Self> {
        let all = parse_snapshots(json)?;
        let order = perf_types(&all);
        let mut history = HashMap::with_capacity(order.len());
        for perf in &order {
            let snapshots = snapshots_for(&all, perf);
            let series = percentile_series(&snapshots, &DEFAULT_PERCENTILES)?;
            history.insert(perf.clone(), PerfHistory { snapshots, series });
        }

        let perf = order
            .iter()
            .position(|p| p == perf_type)
            .ok_or_else(|| ViewerError::UnknownPerfType(perf_type.to_string()))?;
        let mut browser = Self {
            order,
            history,
            perf,
            snapshot: 0,
        };
        browser.snapshot = browser.latest();
        Ok(browser)
    }

    fn current(&self) -> &PerfHistory {
        &self.history[&self.order[self.perf]]
    }

    fn latest(&self) -> usize {
        self.current().snapshots.len().saturating_sub(1)
    }

    pub fn perf_type(&self) -> &str {
        &self.order[self.perf]
    }

    pub fn date(&self) -> NaiveDateTime {
        self.current().snapshots[self.snapshot].date
    }

    pub fn counts(&self) -> Result<RatingBucketCounts> {
        Ok(self.current().snapshots[self.snapshot].counts()?)
    }

    pub fn series(&self) -> &[PercentileSeries] {
        &self.current().series
    }

    /// Moves `delta` snapshots, stopping at either end. Returns whether the
    /// position changed.
    pub fn step(&mut self, delta: isize) -> bool {
        let next = self
            .snapshot
            .saturating_add_signed(delta)
            .min(self.latest());
        let moved = next != self.snapshot;
        self.snapshot = next;
        moved
    }

    /// Switches to the neighbouring perf type, wrapping around, and jumps
    /// to its newest snapshot.
    pub fn cycle(&mut self, delta: isize) {
        let len = self.order.len() as isize;
        self.perf = (self.perf as isize + delta).rem_euclid(len) as usize;
        self.snapshot = self.latest();
    }
}
