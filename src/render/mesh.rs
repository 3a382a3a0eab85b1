//! Tessellation of chart paths into 2D triangle meshes.

use crate::geometry::{PathData, Segment};
use crate::{ChartError, Result};
use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};
use error_stack::Report;
use lyon_tessellation::math::point;
use lyon_tessellation::path::Path;
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions, StrokeTessellator,
    StrokeVertex, VertexBuffers,
};

type Buffers = VertexBuffers<[f32; 3], u32>;

fn build_path<'a>(polylines: impl IntoIterator<Item = (&'a [Vec2], bool)>) -> Path {
    let mut builder = Path::builder();
    for (points, closed) in polylines {
        let Some((first, rest)) = points.split_first() else {
            continue;
        };
        builder.begin(point(first.x, first.y));
        for p in rest {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
    }
    builder.build()
}

fn into_mesh(buffers: Buffers) -> Mesh {
    let vertex_count = buffers.vertices.len();
    let normals: Vec<[f32; 3]> = vec![[0.0, 0.0, 1.0]; vertex_count];
    let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; vertex_count];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, buffers.vertices);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(buffers.indices));
    mesh
}

/// Strokes every polyline with the same width into one mesh.
pub fn stroke_mesh<'a>(
    polylines: impl IntoIterator<Item = (&'a [Vec2], bool)>,
    width: f32,
) -> Result<Mesh> {
    let path = build_path(polylines);
    let mut buffers = Buffers::new();
    StrokeTessellator::new()
        .tessellate_path(
            &path,
            &StrokeOptions::default().with_line_width(width),
            &mut BuffersBuilder::new(&mut buffers, |v: StrokeVertex| {
                let p = v.position();
                [p.x, p.y, 0.0]
            }),
        )
        .map_err(|_| Report::new(ChartError::Tessellation))?;
    Ok(into_mesh(buffers))
}

/// Fills the polygon outlined by `points`.
pub fn fill_mesh(points: &[Vec2]) -> Result<Mesh> {
    let path = build_path([(points, true)]);
    let mut buffers = Buffers::new();
    FillTessellator::new()
        .tessellate_path(
            &path,
            &FillOptions::default(),
            &mut BuffersBuilder::new(&mut buffers, |v: FillVertex| {
                let p = v.position();
                [p.x, p.y, 0.0]
            }),
        )
        .map_err(|_| Report::new(ChartError::Tessellation))?;
    Ok(into_mesh(buffers))
}

/// Stroke mesh for a chart path, its points already in local space.
pub fn path_stroke(path: &PathData, width: f32) -> Result<Mesh> {
    stroke_mesh([(path.points.as_slice(), path.closed)], width)
}

/// One mesh holding many short segments, e.g. tick marks or dashes.
pub fn segments_mesh(segments: &[Segment], width: f32) -> Result<Mesh> {
    let pairs: Vec<[Vec2; 2]> = segments.iter().map(|s| [s.from, s.to]).collect();
    stroke_mesh(pairs.iter().map(|p| (p.as_slice(), false)), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroked_line_has_triangles() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(20.0, 5.0)];
        let mesh = stroke_mesh([(points.as_slice(), false)], 2.0).unwrap();
        assert!(mesh.count_vertices() >= 4);
        let indices = mesh.indices().map(|i| i.len()).unwrap_or(0);
        assert!(indices >= 6 && indices % 3 == 0);
    }

    #[test]
    fn filled_square_is_two_triangles() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        let mesh = fill_mesh(&square).unwrap();
        assert_eq!(mesh.count_vertices(), 4);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(6));
    }

    #[test]
    fn empty_input_gives_empty_mesh() {
        let mesh = segments_mesh(&[], 1.0).unwrap();
        assert_eq!(mesh.count_vertices(), 0);
    }
}
