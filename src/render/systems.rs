use super::components::*;
use super::mesh::{fill_mesh, segments_mesh, stroke_mesh};
use super::resources::{ChartInbox, ChartUpdate, MountRegistry};
use crate::Result;
use crate::axis::{Axis, AxisOrient, AxisTitle};
use crate::charts::{
    DistributionChart, DistributionPaths, LegendEntry, PercentileChart, SeriesLine,
};
use crate::core::{Color as ChartColor, Frame};
use crate::geometry::{DASH, Segment};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use std::collections::HashMap;

const FONT_SIZE: f32 = 11.0;
const TITLE_FONT_SIZE: f32 = 13.0;
const AXIS_STROKE: f32 = 1.0;
const DATA_STROKE: f32 = 1.5;

const Z_GRID: f32 = 0.0;
const Z_AREA: f32 = 1.0;
const Z_LINE: f32 = 2.0;
const Z_AXIS: f32 = 3.0;
const Z_TEXT: f32 = 4.0;
const Z_CROSSHAIR: f32 = 5.0;

/// Plot pixels (y down from the plot's top-left) to the mount entity's
/// local space (y up from the mount's top-left).
fn to_local(frame: &Frame, p: Vec2) -> Vec2 {
    Vec2::new(frame.margin.left + p.x, -(frame.margin.top + p.y))
}

/// Inverse of [`to_local`].
fn to_plot(frame: &Frame, local: Vec2) -> Vec2 {
    Vec2::new(local.x - frame.margin.left, -local.y - frame.margin.top)
}

fn local_points(frame: &Frame, points: &[Vec2]) -> Vec<Vec2> {
    points.iter().map(|&p| to_local(frame, p)).collect()
}

fn local_segments(frame: &Frame, segments: &[Segment]) -> Vec<Segment> {
    segments
        .iter()
        .map(|s| Segment::new(to_local(frame, s.from), to_local(frame, s.to)))
        .collect()
}

/// Rough width of a label; text is centered on its translation, so
/// labels that should hang off one side are shifted by half of this.
fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * 0.55
}

fn distribution_mesh(frame: &Frame, paths: &DistributionPaths, shape: DistributionShape) -> Result<Mesh> {
    match shape {
        DistributionShape::PlayersArea => fill_mesh(&local_points(frame, &paths.players_area.points)),
        DistributionShape::PlayersLine => {
            let points = local_points(frame, &paths.players_line.points);
            stroke_mesh([(points.as_slice(), false)], DATA_STROKE)
        }
        DistributionShape::CumulativeLine => {
            let points = local_points(frame, &paths.cumulative_line.points);
            stroke_mesh([(points.as_slice(), false)], DATA_STROKE)
        }
    }
}

fn distribution_color(shape: DistributionShape) -> ChartColor {
    match shape {
        DistributionShape::PlayersArea => ChartColor::STEEL_BLUE.with_a(0.3),
        DistributionShape::PlayersLine => ChartColor::STEEL_BLUE,
        DistributionShape::CumulativeLine => ChartColor::ORANGE,
    }
}

fn line_mesh(frame: &Frame, line: &SeriesLine) -> Result<Mesh> {
    let points = local_points(frame, &line.path.points);
    stroke_mesh([(points.as_slice(), false)], DATA_STROKE)
}

/// Spawns chart pieces as children of one mount entity.
struct Painter<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<ColorMaterial>,
    root: Entity,
    frame: Frame,
}

impl<'a, 'w, 's> Painter<'a, 'w, 's> {
    fn shape(&mut self, mesh: Mesh, color: ChartColor, z: f32, marker: impl Bundle) -> Entity {
        let material = self.materials.add(ColorMaterial::from(Color::from(color)));
        self.commands
            .spawn((
                Mesh2d(self.meshes.add(mesh)),
                MeshMaterial2d(material),
                Transform::from_xyz(0.0, 0.0, z),
                marker,
                ChildOf(self.root),
            ))
            .id()
    }

    fn text(&mut self, text: &str, local: Vec2, font_size: f32, rotation_deg: f32) {
        self.commands.spawn((
            Text2d::new(text),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(ChartColor::BLACK.into()),
            Transform::from_translation(local.extend(Z_TEXT))
                .with_rotation(Quat::from_rotation_z(-rotation_deg.to_radians())),
            Decoration,
            ChildOf(self.root),
        ));
    }

    fn axis(&mut self, axis: &Axis) -> Result<()> {
        let mut segments = vec![axis.domain_line()];
        segments.extend(axis.tick_marks());
        let mesh = segments_mesh(&local_segments(&self.frame, &segments), AXIS_STROKE)?;
        self.shape(mesh, ChartColor::BLACK, Z_AXIS, Decoration);

        for (anchor, label) in axis.label_anchors() {
            let half = text_width(label, FONT_SIZE) / 2.0;
            let shift = match axis.orient {
                AxisOrient::Bottom => Vec2::new(0.0, FONT_SIZE / 2.0),
                AxisOrient::Left => Vec2::new(-half, 0.0),
                AxisOrient::Right => Vec2::new(half, 0.0),
            };
            let local = to_local(&self.frame, anchor + shift);
            self.text(label, local, FONT_SIZE, 0.0);
        }
        Ok(())
    }

    fn title(&mut self, title: &AxisTitle) {
        let local = to_local(&self.frame, title.position);
        self.text(&title.text, local, TITLE_FONT_SIZE, title.rotation_deg);
    }

    fn gridlines(&mut self, dashes: &[Segment]) -> Result<()> {
        let mesh = segments_mesh(&local_segments(&self.frame, dashes), AXIS_STROKE)?;
        self.shape(mesh, ChartColor::GRID, Z_GRID, Decoration);
        Ok(())
    }

    fn legend_entry(&mut self, entry: &LegendEntry) {
        let mesh = Mesh::from(Circle::new(entry.radius));
        let marker = self.shape(mesh, entry.color, Z_LINE, Decoration);
        self.commands
            .entity(marker)
            .insert(Transform::from_translation(to_local(&self.frame, entry.marker).extend(Z_LINE)));

        let anchor = entry.text_anchor + Vec2::new(text_width(&entry.label, FONT_SIZE) / 2.0, 0.0);
        let local = to_local(&self.frame, anchor);
        self.text(&entry.label, local, FONT_SIZE, 0.0);
    }

    /// Hidden dashed lines through the plot's origin, later moved to the
    /// pointer by translation alone.
    fn crosshair(&mut self) -> Result<()> {
        let (w, h) = (self.frame.width, self.frame.height);
        let vertical = Segment::new(Vec2::ZERO, Vec2::new(0.0, h)).dashed(DASH[0], DASH[1]);
        let horizontal = Segment::new(Vec2::ZERO, Vec2::new(w, 0.0)).dashed(DASH[0], DASH[1]);
        let color = ChartColor::BLACK.with_a(0.6);

        let mesh = segments_mesh(&local_segments(&self.frame, &vertical), AXIS_STROKE)?;
        let vline = self.shape(mesh, color, Z_CROSSHAIR, CrosshairVLine);
        let mesh = segments_mesh(&local_segments(&self.frame, &horizontal), AXIS_STROKE)?;
        let hline = self.shape(mesh, color, Z_CROSSHAIR, CrosshairHLine);
        for entity in [vline, hline] {
            self.commands.entity(entity).insert(Visibility::Hidden);
        }
        Ok(())
    }

    fn series_line(&mut self, line: &SeriesLine) -> Result<Entity> {
        let mesh = line_mesh(&self.frame, line)?;
        Ok(self.shape(
            mesh,
            line.color,
            Z_LINE,
            SeriesLineShape {
                percentile: line.percentile,
            },
        ))
    }

    fn distribution(&mut self, chart: &DistributionChart) -> Result<()> {
        let deco = chart.decoration();
        for axis in [&deco.rating_axis, &deco.players_axis, &deco.cumulative_axis] {
            self.axis(axis)?;
        }
        for title in &deco.titles {
            self.title(title);
        }
        for shape in [
            DistributionShape::PlayersArea,
            DistributionShape::PlayersLine,
            DistributionShape::CumulativeLine,
        ] {
            let mesh = distribution_mesh(&self.frame, chart.paths(), shape)?;
            let z = if shape == DistributionShape::PlayersArea { Z_AREA } else { Z_LINE };
            self.shape(mesh, distribution_color(shape), z, shape);
        }
        Ok(())
    }

    fn percentiles(&mut self, chart: &PercentileChart) -> Result<()> {
        let deco = chart.decoration();
        self.gridlines(&deco.vertical_grid.dashes())?;
        self.gridlines(&deco.horizontal_grid.dashes())?;
        self.axis(&deco.time_axis)?;
        self.axis(&deco.rating_axis)?;
        for title in &deco.titles {
            self.title(title);
        }
        for entry in &deco.legend {
            self.legend_entry(entry);
        }
        self.crosshair()?;
        for line in chart.lines() {
            self.series_line(line)?;
        }
        Ok(())
    }
}

/// Applies queued updates to the charts they address.
pub fn apply_chart_updates(
    inbox: Res<ChartInbox>,
    registry: Res<MountRegistry>,
    mut distributions: Query<&mut DistributionChartView>,
    mut percentiles: Query<&mut PercentileChartView>,
) {
    for update in inbox.drain() {
        let mount = update.mount();
        let Some(entity) = registry.get(mount) else {
            warn!(mount, "update for unknown mount dropped");
            continue;
        };
        let result = match &update {
            ChartUpdate::Distribution { counts, .. } => match distributions.get_mut(entity) {
                Ok(mut view) => view.0.update(counts),
                Err(_) => {
                    warn!(mount, "mount does not hold a distribution chart");
                    continue;
                }
            },
            ChartUpdate::Percentiles { series, .. } => match percentiles.get_mut(entity) {
                Ok(mut view) => view.0.update(series).map(|join| {
                    debug!(
                        mount,
                        entered = ?join.entered,
                        exited = ?join.exited,
                        "percentile lines rebound"
                    );
                }),
                Err(_) => {
                    warn!(mount, "mount does not hold a percentile chart");
                    continue;
                }
            },
        };
        if let Err(report) = result {
            warn!(mount, "chart update rejected: {report:?}");
        }
    }
}

pub fn draw_new_distribution_charts(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    charts: Query<(Entity, &DistributionChartView), Without<RenderedRevision>>,
) {
    for (entity, view) in &charts {
        let chart = &view.0;
        let drawn = Painter {
            commands: &mut commands,
            meshes: &mut *meshes,
            materials: &mut *materials,
            root: entity,
            frame: *chart.frame(),
        }
        .distribution(chart);
        if let Err(report) = drawn {
            error!(mount = chart.mount(), "failed to draw distribution chart: {report:?}");
        }
        commands
            .entity(entity)
            .insert(RenderedRevision(chart.revision()));
    }
}

pub fn draw_new_percentile_charts(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    charts: Query<(Entity, &PercentileChartView), Without<RenderedRevision>>,
) {
    for (entity, view) in &charts {
        let chart = &view.0;
        let drawn = Painter {
            commands: &mut commands,
            meshes: &mut *meshes,
            materials: &mut *materials,
            root: entity,
            frame: *chart.frame(),
        }
        .percentiles(chart);
        if let Err(report) = drawn {
            error!(mount = chart.mount(), "failed to draw percentile chart: {report:?}");
        }
        commands
            .entity(entity)
            .insert(RenderedRevision(chart.revision()));
    }
}

/// Swaps in fresh meshes for the area and both lines of every chart whose
/// model moved past the drawn revision. Decoration is left alone.
pub fn sync_distribution_shapes(
    mut meshes: ResMut<Assets<Mesh>>,
    mut charts: Query<(&DistributionChartView, &mut RenderedRevision)>,
    mut shapes: Query<(&ChildOf, &DistributionShape, &mut Mesh2d)>,
) {
    for (child_of, shape, mut mesh2d) in &mut shapes {
        let Ok((view, rendered)) = charts.get(child_of.parent()) else {
            continue;
        };
        let chart = &view.0;
        if rendered.0 == chart.revision() {
            continue;
        }
        match distribution_mesh(chart.frame(), chart.paths(), *shape) {
            Ok(mesh) => mesh2d.0 = meshes.add(mesh),
            Err(report) => warn!(mount = chart.mount(), ?shape, "failed to rebuild shape: {report:?}"),
        }
    }
    for (view, mut rendered) in &mut charts {
        if rendered.0 != view.0.revision() {
            rendered.0 = view.0.revision();
        }
    }
}

/// Keyed rebind of percentile lines: lines whose percentile disappeared are
/// despawned, surviving ones get a new mesh, new percentiles get a new line.
pub fn sync_percentile_lines(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut charts: Query<(Entity, &PercentileChartView, &mut RenderedRevision)>,
    lines: Query<(Entity, &ChildOf, &SeriesLineShape)>,
) {
    for (entity, view, mut rendered) in &mut charts {
        let chart = &view.0;
        if rendered.0 == chart.revision() {
            continue;
        }
        let existing: HashMap<u8, Entity> = lines
            .iter()
            .filter(|(_, child_of, _)| child_of.parent() == entity)
            .map(|(line, _, shape)| (shape.percentile, line))
            .collect();

        for (&percentile, &line) in &existing {
            if chart.line(percentile).is_none() {
                commands.entity(line).despawn();
            }
        }

        let mut painter = Painter {
            commands: &mut commands,
            meshes: &mut *meshes,
            materials: &mut *materials,
            root: entity,
            frame: *chart.frame(),
        };
        for line in chart.lines() {
            let result = match existing.get(&line.percentile) {
                Some(&current) => line_mesh(chart.frame(), line).map(|mesh| {
                    let handle = painter.meshes.add(mesh);
                    painter.commands.entity(current).insert(Mesh2d(handle));
                }),
                None => painter.series_line(line).map(|_| ()),
            };
            if let Err(report) = result {
                warn!(
                    mount = chart.mount(),
                    percentile = line.percentile,
                    "failed to rebuild line: {report:?}"
                );
            }
        }
        rendered.0 = chart.revision();
    }
}

/// Follows the cursor over each percentile plot area and moves that
/// chart's crosshair lines with it.
pub fn track_pointer(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut charts: Query<(Entity, &GlobalTransform, &mut PercentileChartView)>,
    mut vlines: Query<
        (&ChildOf, &mut Transform, &mut Visibility),
        (With<CrosshairVLine>, Without<CrosshairHLine>),
    >,
    mut hlines: Query<
        (&ChildOf, &mut Transform, &mut Visibility),
        (With<CrosshairHLine>, Without<CrosshairVLine>),
    >,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor_world = window
        .cursor_position()
        .map(|c| Vec2::new(c.x - window.width() * 0.5, window.height() * 0.5 - c.y));

    for (entity, global, mut view) in &mut charts {
        let frame = *view.0.frame();
        let origin = global.translation().truncate();
        let over_plot = cursor_world
            .map(|world| to_plot(&frame, world - origin))
            .filter(|p| frame.contains(*p));
        if !view.0.crosshair_mut().track(over_plot) {
            continue;
        }

        let crosshair = *view.0.crosshair();
        let visibility = if crosshair.is_visible() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        for (child_of, mut transform, mut vis) in &mut vlines {
            if child_of.parent() == entity {
                transform.translation.x = crosshair.pointer().x;
                *vis = visibility;
            }
        }
        for (child_of, mut transform, mut vis) in &mut hlines {
            if child_of.parent() == entity {
                transform.translation.y = -crosshair.pointer().y;
                *vis = visibility;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Mount, PercentilePoint, PercentileSeries, RatingBucketCounts};
    use chrono::NaiveDate;

    fn app() -> App {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>()
            .init_resource::<MountRegistry>()
            .init_resource::<ChartInbox>()
            .add_systems(
                Update,
                (
                    apply_chart_updates,
                    (draw_new_distribution_charts, draw_new_percentile_charts),
                    (sync_distribution_shapes, sync_percentile_lines),
                )
                    .chain(),
            );
        app
    }

    fn counts(value: u64) -> RatingBucketCounts {
        RatingBucketCounts::new(vec![value; 80]).unwrap()
    }

    fn series(percentiles: &[u8]) -> Vec<PercentileSeries> {
        let day = |d| {
            NaiveDate::from_ymd_opt(2021, 3, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        percentiles
            .iter()
            .map(|&p| {
                PercentileSeries::new(
                    p,
                    vec![
                        PercentilePoint {
                            date: day(1),
                            rating: 1000.0 + f64::from(p) * 10.0,
                        },
                        PercentilePoint {
                            date: day(5),
                            rating: 1100.0 + f64::from(p) * 10.0,
                        },
                    ],
                )
            })
            .collect()
    }

    fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
        let world = app.world_mut();
        world.query_filtered::<Entity, F>().iter(world).count()
    }

    #[test]
    fn plot_and_local_space_round_trip() {
        let frame = Frame::new(&Mount::new("m", 1000.0), crate::core::Margin::distribution())
            .unwrap();
        let p = Vec2::new(12.0, 34.0);
        assert_eq!(to_local(&frame, p), Vec2::new(92.0, -84.0));
        assert_eq!(to_plot(&frame, to_local(&frame, p)), p);
    }

    #[test]
    fn distribution_update_swaps_data_meshes_only() {
        let mut app = app();
        app.add_systems(
            Startup,
            |mut commands: Commands, mut registry: ResMut<MountRegistry>| {
                registry
                    .spawn_distribution(
                        &mut commands,
                        Mount::new("distribution", 1000.0),
                        Vec2::ZERO,
                        &counts(10),
                    )
                    .unwrap();
            },
        );
        app.update();

        assert_eq!(count::<With<DistributionShape>>(&mut app), 3);
        let decoration = count::<With<Decoration>>(&mut app);
        assert!(decoration > 3);

        let before: Vec<_> = {
            let world = app.world_mut();
            world
                .query::<(&DistributionShape, &Mesh2d)>()
                .iter(world)
                .map(|(s, m)| (*s, m.0.id()))
                .collect()
        };

        app.world()
            .resource::<ChartInbox>()
            .push(ChartUpdate::Distribution {
                mount: "distribution".into(),
                counts: counts(20),
            });
        app.update();

        assert_eq!(count::<With<DistributionShape>>(&mut app), 3);
        assert_eq!(count::<With<Decoration>>(&mut app), decoration);
        let world = app.world_mut();
        let after: HashMap<DistributionShape, _> = world
            .query::<(&DistributionShape, &Mesh2d)>()
            .iter(world)
            .map(|(s, m)| (*s, m.0.id()))
            .collect();
        for (shape, id) in before {
            assert_ne!(after[&shape], id, "{shape:?} kept its old mesh");
        }
        let revision = world
            .query::<&RenderedRevision>()
            .single(world)
            .map(|r| r.0)
            .unwrap();
        assert_eq!(revision, 1);
    }

    #[test]
    fn percentile_lines_are_joined_by_key() {
        let mut app = app();
        app.add_systems(
            Startup,
            |mut commands: Commands, mut registry: ResMut<MountRegistry>| {
                registry
                    .spawn_percentiles(
                        &mut commands,
                        Mount::new("percentiles", 1040.0),
                        Vec2::ZERO,
                        &series(&[25, 50, 75]),
                    )
                    .unwrap();
            },
        );
        app.update();
        assert_eq!(count::<With<SeriesLineShape>>(&mut app), 3);
        assert_eq!(count::<With<CrosshairVLine>>(&mut app), 1);

        let kept = {
            let world = app.world_mut();
            world
                .query::<(Entity, &SeriesLineShape)>()
                .iter(world)
                .find(|(_, s)| s.percentile == 50)
                .map(|(e, _)| e)
                .unwrap()
        };

        app.world()
            .resource::<ChartInbox>()
            .push(ChartUpdate::Percentiles {
                mount: "percentiles".into(),
                series: series(&[50, 95]),
            });
        app.update();

        let world = app.world_mut();
        let mut shown: Vec<(Entity, u8)> = world
            .query::<(Entity, &SeriesLineShape)>()
            .iter(world)
            .map(|(e, s)| (e, s.percentile))
            .collect();
        shown.sort_by_key(|(_, p)| *p);
        let percentiles: Vec<u8> = shown.iter().map(|(_, p)| *p).collect();
        assert_eq!(percentiles, vec![50, 95]);
        assert_eq!(shown[0].0, kept);
    }

    fn crosshair_lines(app: &mut App) -> (Vec2, Visibility, Vec2, Visibility) {
        let world = app.world_mut();
        let (vx, vvis) = world
            .query_filtered::<(&Transform, &Visibility), With<CrosshairVLine>>()
            .single(world)
            .map(|(t, v)| (t.translation.truncate(), *v))
            .unwrap();
        let (hx, hvis) = world
            .query_filtered::<(&Transform, &Visibility), With<CrosshairHLine>>()
            .single(world)
            .map(|(t, v)| (t.translation.truncate(), *v))
            .unwrap();
        (vx, vvis, hx, hvis)
    }

    fn set_cursor(app: &mut App, at: Option<Vec2>) {
        let world = app.world_mut();
        let mut window = world
            .query_filtered::<&mut Window, With<PrimaryWindow>>()
            .single_mut(world)
            .unwrap();
        window.set_cursor_position(at);
    }

    #[test]
    fn crosshair_follows_the_pointer_over_the_plot() {
        let mut app = app();
        app.add_systems(Update, track_pointer.after(sync_percentile_lines));
        app.world_mut().spawn((Window::default(), PrimaryWindow));
        app.add_systems(
            Startup,
            |mut commands: Commands, mut registry: ResMut<MountRegistry>| {
                registry
                    .spawn_percentiles(
                        &mut commands,
                        Mount::new("percentiles", 1040.0),
                        Vec2::ZERO,
                        &series(&[50]),
                    )
                    .unwrap();
            },
        );
        app.update();
        let (_, vertical, _, horizontal) = crosshair_lines(&mut app);
        assert_eq!((vertical, horizontal), (Visibility::Hidden, Visibility::Hidden));

        // 1280x720 window: (820, 450) is world (180, -90), plot (100, 40)
        set_cursor(&mut app, Some(Vec2::new(820.0, 450.0)));
        app.update();
        let (v_at, vertical, h_at, horizontal) = crosshair_lines(&mut app);
        assert_eq!(v_at.x, 100.0);
        assert_eq!(h_at.y, -40.0);
        assert_eq!(vertical, Visibility::Inherited);
        assert_eq!(horizontal, Visibility::Inherited);

        // inside the mount but left of the plot
        set_cursor(&mut app, Some(Vec2::new(660.0, 450.0)));
        app.update();
        let (_, vertical, _, horizontal) = crosshair_lines(&mut app);
        assert_eq!((vertical, horizontal), (Visibility::Hidden, Visibility::Hidden));

        set_cursor(&mut app, Some(Vec2::new(830.0, 460.0)));
        app.update();
        set_cursor(&mut app, None);
        app.update();
        let (v_at, vertical, h_at, horizontal) = crosshair_lines(&mut app);
        assert_eq!((v_at.x, h_at.y), (110.0, -50.0));
        assert_eq!((vertical, horizontal), (Visibility::Hidden, Visibility::Hidden));
    }

    #[test]
    fn second_chart_in_one_mount_is_refused() {
        let mut app = app();
        app.add_systems(
            Startup,
            |mut commands: Commands, mut registry: ResMut<MountRegistry>| {
                let mount = Mount::new("shared", 1000.0);
                registry
                    .spawn_distribution(&mut commands, mount.clone(), Vec2::ZERO, &counts(1))
                    .unwrap();
                let err = registry
                    .spawn_percentiles(&mut commands, mount, Vec2::ZERO, &series(&[50]))
                    .unwrap_err();
                assert_eq!(
                    err.current_context(),
                    &crate::ChartError::MountOccupied("shared".into())
                );
            },
        );
        app.update();
        assert_eq!(count::<With<ChartMount>>(&mut app), 1);
    }

    #[test]
    fn bad_update_leaves_chart_untouched() {
        let mut app = app();
        app.add_systems(
            Startup,
            |mut commands: Commands, mut registry: ResMut<MountRegistry>| {
                registry
                    .spawn_percentiles(
                        &mut commands,
                        Mount::new("percentiles", 1040.0),
                        Vec2::ZERO,
                        &series(&[50]),
                    )
                    .unwrap();
            },
        );
        app.update();

        app.world()
            .resource::<ChartInbox>()
            .push(ChartUpdate::Percentiles {
                mount: "percentiles".into(),
                series: series(&[50, 50]),
            });
        app.update();

        let world = app.world_mut();
        let (revision, lines) = world
            .query::<&PercentileChartView>()
            .single(world)
            .map(|view| (view.0.revision(), view.0.lines().len()))
            .unwrap();
        assert_eq!(revision, 0);
        assert_eq!(lines, 1);
    }
}
