use crate::{ChartError, Result};
use bevy_math::Vec2;
use chrono::NaiveDateTime;
use error_stack::Report;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
    pub const fn with_a(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// `0xRRGGBB`, fully opaque.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xff) as f32 / 255.0,
            ((rgb >> 8) & 0xff) as f32 / 255.0,
            (rgb & 0xff) as f32 / 255.0,
        )
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const STEEL_BLUE: Self = Self::hex(0x4682b4);
    pub const ORANGE: Self = Self::hex(0xff7f0e);
    pub const GRID: Self = Self::rgba(0.6, 0.6, 0.65, 0.4);
}

impl From<Color> for bevy::prelude::Color {
    #[inline]
    fn from(c: Color) -> Self {
        bevy::prelude::Color::srgba(c.r, c.g, c.b, c.a)
    }
}

/// Space between the mount edge and the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margin {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Room for the cumulative axis on the right.
    pub const fn distribution() -> Self {
        Self::new(50.0, 80.0, 50.0, 80.0)
    }

    /// Room for the legend on the right.
    pub const fn percentiles() -> Self {
        Self::new(50.0, 160.0, 50.0, 80.0)
    }
}

pub const DEFAULT_MOUNT_HEIGHT: f32 = 600.0;

/// The container a chart is attached to.
///
/// A chart reads the mount's size once, at initialization. The name is the
/// handle callers use to address the chart later (see `ChartInbox`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mount {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

impl Mount {
    pub fn new(name: impl Into<String>, width: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height: DEFAULT_MOUNT_HEIGHT,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }
}

/// Plot area of a mounted chart: margins plus the inner drawing size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub margin: Margin,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(mount: &Mount, margin: Margin) -> Result<Self> {
        let width = mount.width - margin.left - margin.right;
        let height = mount.height - margin.top - margin.bottom;
        if !(width > 0.0 && height > 0.0) {
            return Err(Report::new(ChartError::MountTooSmall {
                width: mount.width,
                height: mount.height,
            }));
        }
        Ok(Self {
            margin,
            width,
            height,
        })
    }

    pub fn outer_size(&self) -> Vec2 {
        Vec2::new(
            self.width + self.margin.left + self.margin.right,
            self.height + self.margin.top + self.margin.bottom,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Fixed-width rating buckets the distribution counts are grouped into.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BucketLayout {
    pub first_rating: f64,
    pub width: f64,
    pub count: usize,
}

impl Default for BucketLayout {
    fn default() -> Self {
        Self {
            first_rating: 800.0,
            width: 25.0,
            count: 80,
        }
    }
}

impl BucketLayout {
    pub fn last_rating(&self) -> f64 {
        self.first_rating + self.width * self.count as f64
    }

    /// Lower edge of bucket `index`.
    pub fn lower_edge(&self, index: usize) -> f64 {
        self.first_rating + self.width * index as f64
    }
}

/// Player counts per rating bucket, validated against a [`BucketLayout`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RatingBucketCounts {
    layout: BucketLayout,
    counts: Vec<u64>,
}

impl RatingBucketCounts {
    pub fn new(counts: Vec<u64>) -> Result<Self> {
        Self::with_layout(counts, BucketLayout::default())
    }

    pub fn with_layout(counts: Vec<u64>, layout: BucketLayout) -> Result<Self> {
        if counts.len() != layout.count {
            return Err(Report::new(ChartError::BucketCount {
                expected: layout.count,
                actual: counts.len(),
            }));
        }
        Ok(Self { layout, counts })
    }

    pub fn layout(&self) -> &BucketLayout {
        &self.layout
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Players across all buckets. Summed in `u128`, which cannot overflow
    /// for any bucket count a `Vec` can hold.
    pub fn total(&self) -> u128 {
        self.counts.iter().map(|&c| u128::from(c)).sum()
    }

    pub fn as_f64(&self) -> Vec<f64> {
        self.counts.iter().map(|&c| c as f64).collect()
    }
}

/// One sample of a percentile's rating history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentilePoint {
    #[serde(with = "crate::dataset::compact_timestamp")]
    pub date: NaiveDateTime,
    pub rating: f64,
}

/// Rating history of a single percentile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentileSeries {
    pub percentile: u8,
    pub line: Vec<PercentilePoint>,
}

impl PercentileSeries {
    pub fn new(percentile: u8, line: Vec<PercentilePoint>) -> Self {
        Self { percentile, line }
    }

    /// Earliest and latest sample dates, if any.
    pub fn time_extent(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.line.first()?.date;
        Some(self.line.iter().fold((first, first), |(lo, hi), p| {
            (lo.min(p.date), hi.max(p.date))
        }))
    }
}

/// Rejects datasets the percentile chart cannot draw faithfully.
pub fn validate_series(series: &[PercentileSeries]) -> Result<()> {
    let mut seen = [false; 101];
    for s in series {
        if s.percentile > 100 {
            return Err(Report::new(ChartError::PercentileOutOfRange(s.percentile)));
        }
        let slot = &mut seen[s.percentile as usize];
        if *slot {
            return Err(Report::new(ChartError::DuplicatePercentile(s.percentile)));
        }
        *slot = true;
        if let Some(index) = s.line.iter().position(|p| !p.rating.is_finite()) {
            return Err(Report::new(ChartError::NonFiniteValue {
                percentile: s.percentile,
                index,
            }));
        }
    }
    Ok(())
}
