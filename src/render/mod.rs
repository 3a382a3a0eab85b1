pub mod components;
pub mod mesh;
pub mod resources;
pub mod systems;

pub use components::*;
pub use resources::*;
use systems::*;

use bevy::prelude::*;

/// Draws every chart spawned through [`MountRegistry`] and keeps it in step
/// with its model. Updates arrive either by mutating a chart view directly
/// or through the [`ChartInbox`].
#[derive(Default)]
pub struct ChartsPlugin;

impl Plugin for ChartsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MountRegistry>()
            .init_resource::<ChartInbox>()
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                (
                    apply_chart_updates,
                    (draw_new_distribution_charts, draw_new_percentile_charts),
                    (sync_distribution_shapes, sync_percentile_lines),
                    track_pointer,
                )
                    .chain(),
            );
    }
}
