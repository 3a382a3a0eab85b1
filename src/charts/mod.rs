//! Chart models.
//!
//! Each chart is created by `initialize`, which fixes its frame, scales and
//! decoration, and is then fed new data through `update`. The models are
//! pure; `crate::render` turns them into entities.
//!
//! - `distribution`: players per rating bucket with a cumulative overlay
//! - `percentile`: percentile rating history with legend
//! - `crosshair`: pointer-tracking overlay used by the percentile chart

mod crosshair;
mod distribution;
mod percentile;

pub use crosshair::Crosshair;
pub use distribution::{
    DistributionChart, DistributionDecoration, DistributionPaths, PLAYERS_DOMAIN_MAX,
};
pub use percentile::{
    LegendEntry, LineJoin, PercentileChart, PercentileDecoration, RATING_DOMAIN, SeriesLine,
    ordinal,
};
