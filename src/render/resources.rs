use super::components::{ChartMount, DistributionChartView, PercentileChartView};
use crate::charts::{DistributionChart, PercentileChart};
use crate::core::{Mount, PercentileSeries, RatingBucketCounts};
use crate::{ChartError, Result};
use bevy::prelude::*;
use error_stack::Report;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

/// Mount name to the entity holding its chart. A mount holds at most one chart.
#[derive(Resource, Default, Debug)]
pub struct MountRegistry {
    pub by_name: HashMap<String, Entity>,
}

impl MountRegistry {
    pub fn get(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    fn check_free(&self, name: &str) -> Result<()> {
        if self.by_name.contains_key(name) {
            return Err(Report::new(ChartError::MountOccupied(name.to_string())));
        }
        Ok(())
    }

    /// Initializes a distribution chart and spawns it at `origin`, the
    /// world position of the mount's top-left corner.
    pub fn spawn_distribution(
        &mut self,
        commands: &mut Commands,
        mount: Mount,
        origin: Vec2,
        counts: &RatingBucketCounts,
    ) -> Result<Entity> {
        self.check_free(&mount.name)?;
        let chart = DistributionChart::initialize(counts, &mount)?;
        let name = mount.name.clone();
        let entity = commands
            .spawn((
                ChartMount(mount),
                DistributionChartView(chart),
                Transform::from_translation(origin.extend(0.0)),
                Visibility::default(),
            ))
            .id();
        self.by_name.insert(name, entity);
        Ok(entity)
    }

    pub fn spawn_percentiles(
        &mut self,
        commands: &mut Commands,
        mount: Mount,
        origin: Vec2,
        series: &[PercentileSeries],
    ) -> Result<Entity> {
        self.check_free(&mount.name)?;
        let chart = PercentileChart::initialize(series, &mount)?;
        let name = mount.name.clone();
        let entity = commands
            .spawn((
                ChartMount(mount),
                PercentileChartView(chart),
                Transform::from_translation(origin.extend(0.0)),
                Visibility::default(),
            ))
            .id();
        self.by_name.insert(name, entity);
        Ok(entity)
    }
}

/// New data for the chart living in `mount`.
#[derive(Clone, Debug)]
pub enum ChartUpdate {
    Distribution {
        mount: String,
        counts: RatingBucketCounts,
    },
    Percentiles {
        mount: String,
        series: Vec<PercentileSeries>,
    },
}

impl ChartUpdate {
    pub fn mount(&self) -> &str {
        match self {
            Self::Distribution { mount, .. } | Self::Percentiles { mount, .. } => mount,
        }
    }
}

/// Updates queued from outside the app (a JS host, another thread) and
/// applied on the next frame. Clones share the same queue.
#[derive(Resource, Clone, Default, Debug)]
pub struct ChartInbox(Arc<Mutex<VecDeque<ChartUpdate>>>);

impl ChartInbox {
    pub fn push(&self, update: ChartUpdate) {
        self.0.lock().push_back(update);
    }

    pub fn drain(&self) -> Vec<ChartUpdate> {
        self.0.lock().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
