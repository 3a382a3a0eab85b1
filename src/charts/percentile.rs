//! Rating history of several percentiles on shared time and rating axes,
//! with a legend and a crosshair.

use super::crosshair::Crosshair;
use crate::axis::{Axis, AxisOrient, AxisTitle, Gridlines};
use crate::core::{Color, Frame, Margin, Mount, PercentileSeries, validate_series};
use crate::geometry::{PathData, line_path};
use crate::scale::{LinearScale, PointScale, SequentialColorScale, TickFormat, TimeScale};
use crate::{ChartError, Result};
use bevy::log::debug;
use bevy_math::Vec2;
use error_stack::Report;

/// Fixed rating axis.
pub const RATING_DOMAIN: [f64; 2] = [800.0, 2800.0];

const LEGEND_SPREAD: f32 = 60.0;
const LEGEND_RADIUS: f32 = 7.0;

/// `1st`, `2nd`, `3rd`, `11th`, `95th`, ...
pub fn ordinal(n: u8) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub percentile: u8,
    pub label: String,
    pub color: Color,
    pub marker: Vec2,
    pub radius: f32,
    pub text_anchor: Vec2,
}

/// Axes, gridlines and legend, built once at initialization.
#[derive(Clone, Debug, PartialEq)]
pub struct PercentileDecoration {
    pub time_axis: Axis,
    pub rating_axis: Axis,
    pub titles: Vec<AxisTitle>,
    pub vertical_grid: Gridlines,
    pub horizontal_grid: Gridlines,
    pub legend: Vec<LegendEntry>,
}

/// One percentile's line, identified by its percentile.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesLine {
    pub percentile: u8,
    pub color: Color,
    pub path: PathData,
}

/// Which percentiles gained, kept or lost a line in a rebind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineJoin {
    pub entered: Vec<u8>,
    pub updated: Vec<u8>,
    pub exited: Vec<u8>,
}

#[derive(Clone, Debug)]
pub struct PercentileChart {
    mount: String,
    frame: Frame,
    x: TimeScale,
    y: LinearScale,
    color: SequentialColorScale,
    decoration: PercentileDecoration,
    lines: Vec<SeriesLine>,
    crosshair: Crosshair,
    revision: u64,
}

impl PercentileChart {
    /// The time axis spans the first series; all series are expected to
    /// cover a comparable period.
    pub fn initialize(series: &[PercentileSeries], mount: &Mount) -> Result<Self> {
        validate_series(series)?;
        let (start, end) = series
            .first()
            .and_then(PercentileSeries::time_extent)
            .ok_or_else(|| Report::new(ChartError::EmptySeries))?;

        let frame = Frame::new(mount, Margin::percentiles())?;
        let (w, h) = (frame.width, frame.height);
        let x = TimeScale::new([start, end], [0.0, w]);
        let y = LinearScale::new(RATING_DOMAIN, [h, 0.0]);
        let color = SequentialColorScale::default();

        let mut percentiles: Vec<u8> = series.iter().map(|s| s.percentile).collect();
        percentiles.sort_unstable_by(|a, b| b.cmp(a));
        percentiles.dedup();

        let decoration = PercentileDecoration {
            time_axis: Axis::time(AxisOrient::Bottom, &x, 10).at(Vec2::new(0.0, h)),
            rating_axis: Axis::linear(AxisOrient::Left, &y, 10, TickFormat::Integer),
            titles: vec![
                AxisTitle::new("Date", Vec2::new(w / 2.0, h + frame.margin.top), 0.0),
                AxisTitle::new("Rating", Vec2::new(-frame.margin.left + 12.0, h / 2.0), -90.0),
            ],
            vertical_grid: Gridlines::vertical(x.ticks(8).into_iter().map(|t| x.apply(t)), h),
            horizontal_grid: Gridlines::horizontal(
                y.ticks(5).into_iter().map(|v| y.apply(v)),
                w,
            ),
            legend: Self::legend(&percentiles, &color, w, h),
        };

        let mut chart = Self {
            mount: mount.name.clone(),
            frame,
            x,
            y,
            color,
            decoration,
            lines: Vec::new(),
            crosshair: Crosshair::new(w, h),
            revision: 0,
        };
        chart.join(series);
        debug!(mount = %chart.mount, series = series.len(), "percentile chart initialized");
        Ok(chart)
    }

    fn legend(percentiles: &[u8], color: &SequentialColorScale, w: f32, h: f32) -> Vec<LegendEntry> {
        let spacing = PointScale::new(
            percentiles.to_vec(),
            [h / 2.0 - LEGEND_SPREAD, h / 2.0 + LEGEND_SPREAD],
        );
        percentiles
            .iter()
            .map(|&p| {
                let y = spacing.apply(&p).unwrap_or(h / 2.0);
                LegendEntry {
                    percentile: p,
                    label: ordinal(p),
                    color: color.apply(f64::from(p)),
                    marker: Vec2::new(w + 20.0, y),
                    radius: LEGEND_RADIUS,
                    text_anchor: Vec2::new(w + 35.0, y),
                }
            })
            .collect()
    }

    /// Rebinds lines by percentile: a percentile keeps its line across
    /// updates regardless of where it appears in `series`.
    pub fn update(&mut self, series: &[PercentileSeries]) -> Result<LineJoin> {
        validate_series(series)?;
        let join = self.join(series);
        self.revision += 1;
        debug!(
            mount = %self.mount,
            revision = self.revision,
            entered = ?join.entered,
            exited = ?join.exited,
            "percentile chart updated"
        );
        Ok(join)
    }

    fn join(&mut self, series: &[PercentileSeries]) -> LineJoin {
        let mut join = LineJoin::default();
        let lines: Vec<SeriesLine> = series
            .iter()
            .map(|s| {
                if self.lines.iter().any(|l| l.percentile == s.percentile) {
                    join.updated.push(s.percentile);
                } else {
                    join.entered.push(s.percentile);
                }
                SeriesLine {
                    percentile: s.percentile,
                    color: self.color.apply(f64::from(s.percentile)),
                    path: self.series_path(s),
                }
            })
            .collect();
        join.exited = self
            .lines
            .iter()
            .map(|l| l.percentile)
            .filter(|p| !lines.iter().any(|l| l.percentile == *p))
            .collect();
        self.lines = lines;
        join
    }

    fn series_path(&self, series: &PercentileSeries) -> PathData {
        line_path(
            series
                .line
                .iter()
                .map(|p| Vec2::new(self.x.apply(p.date), self.y.apply(p.rating))),
        )
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn x(&self) -> &TimeScale {
        &self.x
    }

    pub fn y(&self) -> &LinearScale {
        &self.y
    }

    pub fn decoration(&self) -> &PercentileDecoration {
        &self.decoration
    }

    pub fn lines(&self) -> &[SeriesLine] {
        &self.lines
    }

    pub fn line(&self, percentile: u8) -> Option<&SeriesLine> {
        self.lines.iter().find(|l| l.percentile == percentile)
    }

    pub fn crosshair(&self) -> &Crosshair {
        &self.crosshair
    }

    pub fn crosshair_mut(&mut self) -> &mut Crosshair {
        &mut self.crosshair
    }

    /// Bumped on every successful update; pointer movement does not count.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
