use crate::charts::{DistributionChart, PercentileChart};
use crate::core::Mount;
use bevy::prelude::*;

/// Container a chart is drawn into. The entity's `Transform` places the
/// container's top-left corner in world space.
#[derive(Component, Clone, Debug)]
pub struct ChartMount(pub Mount);

#[derive(Component, Debug)]
pub struct DistributionChartView(pub DistributionChart);

#[derive(Component, Debug)]
pub struct PercentileChartView(pub PercentileChart);

/// Model revision the spawned meshes currently show. Absent until the
/// chart has been drawn once.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderedRevision(pub u64);

/// Axes, titles, gridlines and legend. Drawn once and never touched again.
#[derive(Component)]
pub struct Decoration;

/// Data-bound shapes of the distribution chart.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistributionShape {
    PlayersArea,
    PlayersLine,
    CumulativeLine,
}

/// One percentile line, keyed by its percentile.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesLineShape {
    pub percentile: u8,
}

/// Dashed vertical crosshair line; moved along x.
#[derive(Component)]
pub struct CrosshairVLine;

/// Dashed horizontal crosshair line; moved along y.
#[derive(Component)]
pub struct CrosshairHLine;
