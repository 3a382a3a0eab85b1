use bevy::log::LogPlugin;
use bevy::prelude::*;

use crate::core::{Color as ChartColor, Mount, PercentileSeries, RatingBucketCounts};
use crate::render::{ChartsPlugin, MountRegistry};

/// Default `tracing` filter for chart apps.
pub const DEFAULT_LOG_FILTER: &str = "info,wgpu=error,naga=warn,rating_charts=debug";

/// Charts shown when the app starts, stacked top to bottom in this order.
#[derive(Resource, Clone, Debug, Default)]
pub struct InitialCharts {
    pub distribution: Option<(Mount, RatingBucketCounts)>,
    pub percentiles: Option<(Mount, Vec<PercentileSeries>)>,
}

impl InitialCharts {
    fn mounts(&self) -> impl Iterator<Item = &Mount> {
        self.distribution
            .iter()
            .map(|(m, _)| m)
            .chain(self.percentiles.iter().map(|(m, _)| m))
    }

    /// Window size that fits every mount stacked vertically.
    pub fn window_size(&self) -> Vec2 {
        self.mounts().fold(Vec2::ZERO, |size, m| {
            Vec2::new(size.x.max(m.width), size.y + m.height)
        })
    }
}

/// Spawns the initial charts with the window's top-left corner as origin.
pub fn spawn_initial_charts(
    mut commands: Commands,
    mut registry: ResMut<MountRegistry>,
    initial: Res<InitialCharts>,
) {
    let size = initial.window_size();
    let left = -size.x / 2.0;
    let mut top = size.y / 2.0;

    if let Some((mount, counts)) = &initial.distribution {
        let origin = Vec2::new(left, top);
        match registry.spawn_distribution(&mut commands, mount.clone(), origin, counts) {
            Ok(_) => info!(mount = %mount.name, "distribution chart mounted"),
            Err(report) => error!(mount = %mount.name, "cannot mount distribution chart: {report:?}"),
        }
        top -= mount.height;
    }
    if let Some((mount, series)) = &initial.percentiles {
        let origin = Vec2::new(left, top);
        match registry.spawn_percentiles(&mut commands, mount.clone(), origin, series) {
            Ok(_) => info!(mount = %mount.name, "percentile chart mounted"),
            Err(report) => error!(mount = %mount.name, "cannot mount percentile chart: {report:?}"),
        }
    }
}

/// Builds, without running, an app showing `initial` in its primary window.
/// Callers add their own systems before `run`.
pub fn chart_app(initial: InitialCharts, window: Window, log_filter: &str) -> App {
    let mut app = App::new();
    app.insert_resource(ClearColor(ChartColor::WHITE.into()))
        .insert_resource(initial)
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(window),
                    ..default()
                })
                .set(LogPlugin {
                    filter: log_filter.to_string(),
                    ..default()
                }),
            ChartsPlugin,
        ))
        .add_systems(Startup, spawn_initial_charts);
    app
}

fn window_for(initial: &InitialCharts) -> Window {
    let size = initial.window_size();
    Window {
        title: "Rating charts".to_string(),
        resolution: (size.x as u32, size.y as u32).into(),
        ..default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn run_charts(initial: InitialCharts) -> AppExit {
    let window = window_for(&initial);
    chart_app(initial, window, DEFAULT_LOG_FILTER).run()
}

/// Runs inside `#canvas_id`; `inbox` is how the page pushes new data.
#[cfg(target_arch = "wasm32")]
pub fn run_charts(
    initial: InitialCharts,
    canvas_id: &str,
    inbox: crate::render::ChartInbox,
) -> AppExit {
    let window = Window {
        canvas: Some(format!("#{canvas_id}")),
        fit_canvas_to_parent: true,
        ..window_for(&initial)
    };
    let mut app = chart_app(initial, window, DEFAULT_LOG_FILTER);
    app.insert_resource(inbox);
    app.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_fits_stacked_mounts() {
        let initial = InitialCharts {
            distribution: Some((
                Mount::new("distribution", 1000.0),
                RatingBucketCounts::new(vec![0; 80]).unwrap(),
            )),
            percentiles: Some((Mount::new("percentiles", 1100.0).with_height(500.0), Vec::new())),
        };
        assert_eq!(initial.window_size(), Vec2::new(1100.0, 1100.0));
        assert_eq!(InitialCharts::default().window_size(), Vec2::ZERO);
    }

    #[test]
    fn initial_charts_are_registered_by_name() {
        let mut app = App::new();
        app.init_resource::<MountRegistry>()
            .insert_resource(InitialCharts {
                distribution: Some((
                    Mount::new("distribution", 1000.0),
                    RatingBucketCounts::new(vec![3; 80]).unwrap(),
                )),
                percentiles: None,
            })
            .add_systems(Startup, spawn_initial_charts);
        app.update();

        let registry = app.world().resource::<MountRegistry>();
        let entity = registry.get("distribution").unwrap();
        let transform = app.world().get::<Transform>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::new(-500.0, 300.0, 0.0));
    }
}
