pub mod axis;
pub mod charts;
pub mod core;
pub mod dataset;
pub mod geometry;
pub mod render;
pub mod runtime;
pub mod scale;
pub mod stats;
pub mod wasm_api;

use std::fmt;

/// Everything that can go wrong while building or feeding a chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// Counts sequence does not match the bucket layout.
    BucketCount { expected: usize, actual: usize },
    /// Same bucket count, different rating edges.
    LayoutMismatch {
        expected: crate::core::BucketLayout,
        actual: crate::core::BucketLayout,
    },
    /// No series, or the series that defines the time extent has no points.
    EmptySeries,
    DuplicatePercentile(u8),
    PercentileOutOfRange(u8),
    NonFiniteValue { percentile: u8, index: usize },
    /// Mount cannot fit the chart margins.
    MountTooSmall { width: f32, height: f32 },
    MountOccupied(String),
    Timestamp(String),
    Payload,
    /// The distribution has no mass to take a percentile of.
    EmptyDistribution,
    FractionOutOfRange(f64),
    Tessellation,
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BucketCount { expected, actual } => {
                write!(f, "expected {expected} rating buckets, got {actual}")
            }
            Self::LayoutMismatch { expected, actual } => write!(
                f,
                "counts start at {} in steps of {}, chart expects {} in steps of {}",
                actual.first_rating, actual.width, expected.first_rating, expected.width
            ),
            Self::EmptySeries => write!(f, "percentile dataset has no points to chart"),
            Self::DuplicatePercentile(p) => write!(f, "percentile {p} appears more than once"),
            Self::PercentileOutOfRange(p) => write!(f, "percentile {p} is outside 0..=100"),
            Self::NonFiniteValue { percentile, index } => {
                write!(f, "percentile {percentile} has a non-finite rating at point {index}")
            }
            Self::MountTooSmall { width, height } => {
                write!(f, "mount of {width}x{height} cannot fit the chart margins")
            }
            Self::MountOccupied(name) => write!(f, "mount `{name}` already hosts a chart"),
            Self::Timestamp(raw) => write!(f, "invalid compact timestamp `{raw}`"),
            Self::Payload => write!(f, "malformed chart payload"),
            Self::EmptyDistribution => write!(f, "distribution has no players"),
            Self::FractionOutOfRange(p) => write!(f, "percentile fraction {p} is outside [0, 1)"),
            Self::Tessellation => write!(f, "failed to tessellate chart geometry"),
        }
    }
}

impl std::error::Error for ChartError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<ChartError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::charts::*;
    pub use crate::core::*;
    pub use crate::dataset::*;
    pub use crate::render::*;
    pub use crate::runtime::*;
    pub use crate::stats::*;
    pub use crate::{ChartError, Result};
}
