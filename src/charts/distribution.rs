//! Players per rating bucket, drawn as area + line, with the running total
//! of players overlaid as a second line against its own axis.

use crate::axis::{Axis, AxisOrient, AxisTitle};
use crate::core::{BucketLayout, Frame, Margin, Mount, RatingBucketCounts};
use crate::geometry::{PathData, area_path, line_path};
use crate::scale::{LinearScale, TickFormat};
use crate::stats::cumulative_distribution;
use crate::{ChartError, Result};
use bevy::log::debug;
use bevy_math::Vec2;
use error_stack::Report;

/// Upper bound of the players axis.
pub const PLAYERS_DOMAIN_MAX: f64 = 8000.0;

/// Axes and titles, built once at initialization.
#[derive(Clone, Debug, PartialEq)]
pub struct DistributionDecoration {
    pub rating_axis: Axis,
    pub players_axis: Axis,
    pub cumulative_axis: Axis,
    pub titles: Vec<AxisTitle>,
}

/// The three data-bound shapes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistributionPaths {
    pub players_area: PathData,
    pub players_line: PathData,
    pub cumulative_line: PathData,
    pub cumulative: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct DistributionChart {
    mount: String,
    frame: Frame,
    layout: BucketLayout,
    players_y: LinearScale,
    /// `[0, count]` to `[first, last]` rating, so bucket `i` sits at its
    /// lower edge and the last bucket one width short of `last`.
    index_rating: LinearScale,
    rating_x: LinearScale,
    cumulative_percent: LinearScale,
    cumulative_y: LinearScale,
    decoration: DistributionDecoration,
    paths: DistributionPaths,
    revision: u64,
}

impl DistributionChart {
    pub fn initialize(counts: &RatingBucketCounts, mount: &Mount) -> Result<Self> {
        let frame = Frame::new(mount, Margin::distribution())?;
        let (w, h) = (frame.width, frame.height);
        let layout = *counts.layout();

        let players_y = LinearScale::new([0.0, PLAYERS_DOMAIN_MAX], [h, 0.0]);
        let index_rating = LinearScale::new(
            [0.0, layout.count as f64],
            [layout.first_rating as f32, layout.last_rating() as f32],
        );
        let rating_x = LinearScale::new([layout.first_rating, layout.last_rating()], [0.0, w]);
        let cumulative_percent = LinearScale::new([0.0, 1.0], [h, 0.0]);

        let decoration =
            Self::build_decoration(&frame, &players_y, &rating_x, &cumulative_percent);

        let mut chart = Self {
            mount: mount.name.clone(),
            frame,
            layout,
            players_y,
            index_rating,
            rating_x,
            cumulative_percent,
            cumulative_y: cumulative_percent,
            decoration,
            paths: DistributionPaths::default(),
            revision: 0,
        };
        chart.bind(counts);
        debug!(mount = %chart.mount, width = w, height = h, "distribution chart initialized");
        Ok(chart)
    }

    /// Rebinds the area, count line and cumulative line to `counts`.
    pub fn update(&mut self, counts: &RatingBucketCounts) -> Result<()> {
        let layout = *counts.layout();
        if layout.count != self.layout.count {
            return Err(Report::new(ChartError::BucketCount {
                expected: self.layout.count,
                actual: counts.counts().len(),
            }));
        }
        if layout != self.layout {
            return Err(Report::new(ChartError::LayoutMismatch {
                expected: self.layout,
                actual: layout,
            }));
        }
        self.bind(counts);
        self.revision += 1;
        let total = self.paths.cumulative.last().copied().unwrap_or(0.0);
        debug!(mount = %self.mount, revision = self.revision, total, "distribution chart updated");
        Ok(())
    }

    fn build_decoration(
        frame: &Frame,
        players_y: &LinearScale,
        rating_x: &LinearScale,
        cumulative_percent: &LinearScale,
    ) -> DistributionDecoration {
        let (w, h, m) = (frame.width, frame.height, frame.margin);
        DistributionDecoration {
            rating_axis: Axis::linear(AxisOrient::Bottom, rating_x, 21, TickFormat::Integer)
                .at(Vec2::new(0.0, h)),
            players_axis: Axis::linear(AxisOrient::Left, players_y, 10, TickFormat::SiPrefix),
            cumulative_axis: Axis::linear(
                AxisOrient::Right,
                cumulative_percent,
                5,
                TickFormat::Percent,
            )
            .at(Vec2::new(w, 0.0)),
            titles: vec![
                AxisTitle::new("Rating", Vec2::new(w / 2.0, h + m.top - 10.0), 0.0),
                AxisTitle::new("Players", Vec2::new(-m.left + 12.0, h / 2.0), -90.0),
                AxisTitle::new("Cumulative", Vec2::new(w + m.right - 12.0, h / 2.0), 90.0),
            ],
        }
    }

    fn bind(&mut self, counts: &RatingBucketCounts) {
        let values = counts.as_f64();
        let cumulative = cumulative_distribution(&values);
        let total = cumulative.last().copied().unwrap_or(0.0);
        self.cumulative_y = LinearScale::new([0.0, total], self.cumulative_percent.range);

        let top: Vec<Vec2> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Vec2::new(self.bucket_x(i), self.players_y.apply(v)))
            .collect();
        let cumulative_points: Vec<Vec2> = cumulative
            .iter()
            .enumerate()
            .map(|(i, &v)| Vec2::new(self.bucket_x(i), self.cumulative_y.apply(v)))
            .collect();

        self.paths = DistributionPaths {
            players_area: area_path(&top, self.frame.height),
            players_line: line_path(top.iter().copied()),
            cumulative_line: line_path(cumulative_points),
            cumulative,
        };
    }

    /// Pixel X of bucket `index`.
    pub fn bucket_x(&self, index: usize) -> f32 {
        let rating = self.index_rating.apply(index as f64);
        self.rating_x.apply(f64::from(rating))
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    pub fn decoration(&self) -> &DistributionDecoration {
        &self.decoration
    }

    pub fn paths(&self) -> &DistributionPaths {
        &self.paths
    }

    pub fn players_y(&self) -> &LinearScale {
        &self.players_y
    }

    pub fn rating_x(&self) -> &LinearScale {
        &self.rating_x
    }

    pub fn cumulative_y(&self) -> &LinearScale {
        &self.cumulative_y
    }

    /// Bumped on every successful update.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
