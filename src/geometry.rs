//! Pixel-space shapes produced by the charts.
//!
//! Coordinates are relative to the plot area's top-left corner with y
//! growing downwards; the render layer flips them into world space.

use bevy_math::Vec2;
use std::fmt::Write;

/// Polyline, optionally closed into a polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

impl PathData {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// SVG path data, handy for debugging and snapshot comparisons.
    pub fn svg(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(d, "{cmd}{},{}", p.x, p.y);
        }
        if self.closed && !self.points.is_empty() {
            d.push('Z');
        }
        d
    }

    /// Axis-aligned bounds as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p))),
        )
    }
}

/// Connects `points` in order.
pub fn line_path(points: impl IntoIterator<Item = Vec2>) -> PathData {
    PathData {
        points: points.into_iter().collect(),
        closed: false,
    }
}

/// Closed region between the polyline `top` and the horizontal `baseline`.
pub fn area_path(top: &[Vec2], baseline: f32) -> PathData {
    let mut points = Vec::with_capacity(top.len() * 2);
    points.extend_from_slice(top);
    points.extend(top.iter().rev().map(|p| Vec2::new(p.x, baseline)));
    PathData {
        points,
        closed: !top.is_empty(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}

impl Segment {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Splits the segment into `dash`-long pieces separated by `gap`.
    pub fn dashed(&self, dash: f32, gap: f32) -> Vec<Segment> {
        let length = self.length();
        if length == 0.0 || dash <= 0.0 {
            return vec![*self];
        }
        let dir = (self.to - self.from) / length;
        let mut out = Vec::with_capacity((length / (dash + gap.max(0.0))).ceil() as usize);
        let mut start = 0.0;
        while start < length {
            let end = (start + dash).min(length);
            out.push(Segment::new(self.from + dir * start, self.from + dir * end));
            start += dash + gap.max(0.0);
        }
        out
    }
}

/// Dash pattern of the grid and crosshair lines.
pub const DASH: [f32; 2] = [3.0, 3.0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_closes_along_baseline() {
        let top = [Vec2::new(0.0, 10.0), Vec2::new(5.0, 2.0), Vec2::new(10.0, 7.0)];
        let area = area_path(&top, 20.0);
        assert!(area.closed);
        assert_eq!(area.points.len(), 6);
        assert_eq!(area.points[3], Vec2::new(10.0, 20.0));
        assert_eq!(area.points[5], Vec2::new(0.0, 20.0));
        assert_eq!(area.svg(), "M0,10L5,2L10,7L10,20L5,20L0,20Z");
    }

    #[test]
    fn empty_area_stays_open() {
        let area = area_path(&[], 20.0);
        assert!(area.is_empty());
        assert!(!area.closed);
        assert_eq!(area.svg(), "");
    }

    #[test]
    fn bounds_cover_all_points() {
        let line = line_path([Vec2::new(3.0, 9.0), Vec2::new(-1.0, 4.0), Vec2::new(7.0, 5.0)]);
        assert_eq!(line.bounds(), Some((Vec2::new(-1.0, 4.0), Vec2::new(7.0, 9.0))));
    }

    #[test]
    fn dashes_alternate_and_clip_at_end() {
        let seg = Segment::new(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let dashes = seg.dashed(3.0, 3.0);
        assert_eq!(dashes.len(), 2);
        assert_eq!(dashes[1], Segment::new(Vec2::new(6.0, 0.0), Vec2::new(9.0, 0.0)));

        let seg = Segment::new(Vec2::ZERO, Vec2::new(0.0, 13.0));
        let dashes = seg.dashed(3.0, 3.0);
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[2].to, Vec2::new(0.0, 13.0));
    }
}
