//! Axes, gridlines and axis titles: the static decoration of a chart.

use crate::geometry::{DASH, Segment};
use crate::scale::{LinearScale, TickFormat, TimeScale};
use bevy_math::Vec2;

pub const TICK_SIZE: f32 = 6.0;
/// Distance between a tick mark's base and its label.
pub const TICK_PADDING: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Position along the axis, in plot pixels.
    pub offset: f32,
    pub label: String,
}

/// An axis line with its tick marks and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub orient: AxisOrient,
    /// Where the axis is translated to inside the plot area.
    pub origin: Vec2,
    pub extent: [f32; 2],
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn linear(orient: AxisOrient, scale: &LinearScale, count: usize, format: TickFormat) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| Tick {
                offset: scale.apply(v),
                label: format.format(v),
            })
            .collect();
        Self {
            orient,
            origin: Vec2::ZERO,
            extent: scale.range,
            ticks,
        }
    }

    pub fn time(orient: AxisOrient, scale: &TimeScale, count: usize) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|t| Tick {
                offset: scale.apply(t),
                label: TimeScale::tick_label(t),
            })
            .collect();
        Self {
            orient,
            origin: Vec2::ZERO,
            extent: scale.range,
            ticks,
        }
    }

    pub fn at(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn along(&self, offset: f32) -> Vec2 {
        match self.orient {
            AxisOrient::Bottom => self.origin + Vec2::new(offset, 0.0),
            AxisOrient::Left | AxisOrient::Right => self.origin + Vec2::new(0.0, offset),
        }
    }

    /// Unit vector pointing from the axis line towards the labels.
    fn outward(&self) -> Vec2 {
        match self.orient {
            AxisOrient::Bottom => Vec2::Y,
            AxisOrient::Left => Vec2::NEG_X,
            AxisOrient::Right => Vec2::X,
        }
    }

    pub fn domain_line(&self) -> Segment {
        Segment::new(self.along(self.extent[0]), self.along(self.extent[1]))
    }

    pub fn tick_marks(&self) -> Vec<Segment> {
        self.ticks
            .iter()
            .map(|t| {
                let base = self.along(t.offset);
                Segment::new(base, base + self.outward() * TICK_SIZE)
            })
            .collect()
    }

    /// Anchor point of each tick label.
    pub fn label_anchors(&self) -> Vec<(Vec2, &str)> {
        self.ticks
            .iter()
            .map(|t| {
                let anchor = self.along(t.offset) + self.outward() * (TICK_SIZE + TICK_PADDING);
                (anchor, t.label.as_str())
            })
            .collect()
    }
}

/// Text naming an axis. Rotation is in degrees, clockwise on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTitle {
    pub text: String,
    pub position: Vec2,
    pub rotation_deg: f32,
}

impl AxisTitle {
    pub fn new(text: impl Into<String>, position: Vec2, rotation_deg: f32) -> Self {
        Self {
            text: text.into(),
            position,
            rotation_deg,
        }
    }
}

/// Dashed reference lines spanning the plot area.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gridlines {
    pub lines: Vec<Segment>,
}

impl Gridlines {
    /// Vertical lines at each tick offset, full height.
    pub fn vertical(offsets: impl IntoIterator<Item = f32>, height: f32) -> Self {
        Self {
            lines: offsets
                .into_iter()
                .map(|x| Segment::new(Vec2::new(x, height), Vec2::new(x, 0.0)))
                .collect(),
        }
    }

    /// Horizontal lines at each tick offset, full width.
    pub fn horizontal(offsets: impl IntoIterator<Item = f32>, width: f32) -> Self {
        Self {
            lines: offsets
                .into_iter()
                .map(|y| Segment::new(Vec2::new(0.0, y), Vec2::new(width, y)))
                .collect(),
        }
    }

    pub fn dashes(&self) -> Vec<Segment> {
        self.lines
            .iter()
            .flat_map(|l| l.dashed(DASH[0], DASH[1]))
            .collect()
    }
}
