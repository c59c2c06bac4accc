//! Sandbox meshes.
//!
//! Positions are in normalized device coordinates, so the meshes can be
//! drawn with a pass-through vertex shader.

use std::mem;

use crate::buffer::{self, Accessor, Format};
use crate::{DrawCall, Factory, VertexArray};

/// Interleaved vertex layout: position at attribute 0, color at attribute 1.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Vertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 3],

    /// Linear RGB color.
    pub color: [f32; 3],
}

/// A single triangle with red, green and blue corners.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex { position: [-0.5, -0.5, 0.0], color: [1.0, 0.0, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    Vertex { position: [0.0, 0.5, 0.0], color: [0.0, 0.0, 1.0] },
];

/// The corners of a unit quad centred on the origin.
pub const QUAD: [Vertex; 4] = [
    // top right
    Vertex { position: [0.5, 0.5, 0.0], color: [1.0, 0.0, 0.0] },
    // bottom right
    Vertex { position: [0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    // bottom left
    Vertex { position: [-0.5, -0.5, 0.0], color: [0.0, 0.0, 1.0] },
    // top left
    Vertex { position: [-0.5, 0.5, 0.0], color: [1.0, 0.0, 0.0] },
];

/// Two triangles sharing the `1`-`3` diagonal of [`QUAD`].
///
/// [`QUAD`]: constant.QUAD.html
pub const QUAD_INDICES: [u32; 6] = [
    0, 1, 3,
    1, 2, 3,
];

/// Geometry uploaded to the GPU, ready to draw.
#[derive(Debug)]
pub struct Mesh {
    /// Vertex and index bindings.
    pub vertex_array: VertexArray,

    /// Draws every vertex, or every index if the mesh is indexed.
    pub draw_call: DrawCall,
}

/// Upload vertices (and optionally indices) into static GPU buffers.
pub fn upload(factory: &Factory, vertices: &[Vertex], indices: Option<&[u32]>) -> Mesh {
    let stride = mem::size_of::<Vertex>();
    let mut vertex_buffer = factory.buffer(buffer::Kind::Array, buffer::Usage::StaticDraw);
    factory.initialize_buffer(&mut vertex_buffer, vertices);
    let position = Accessor::new(
        vertex_buffer.clone(),
        Format::F32(3),
        mem::offset_of!(Vertex, position),
        stride,
    );
    let color = Accessor::new(
        vertex_buffer,
        Format::F32(3),
        mem::offset_of!(Vertex, color),
        stride,
    );

    let index_accessor = indices.map(|indices| {
        let mut index_buffer = factory.buffer(buffer::Kind::Index, buffer::Usage::StaticDraw);
        factory.initialize_buffer(&mut index_buffer, indices);
        Accessor::new(index_buffer, Format::U32(1), 0, 0)
    });
    let draw_call = match indices {
        Some(indices) => DrawCall::elements(indices.len()),
        None => DrawCall::arrays(vertices.len()),
    };

    let vertex_array = factory.vertex_array(
        [Some(position), Some(color), None, None],
        index_accessor,
    );
    Mesh { vertex_array, draw_call }
}

/// Returns the 2D corners of each indexed triangle.
///
/// Indices past the end of `vertices` and a trailing partial triangle are
/// skipped.
pub fn triangles<'a>(
    vertices: &'a [Vertex],
    indices: &'a [u32],
) -> impl Iterator<Item = [[f32; 2]; 3]> + 'a {
    indices.chunks_exact(3).filter_map(move |tri| {
        let corner = |i: u32| {
            vertices
                .get(i as usize)
                .map(|v| [v.position[0], v.position[1]])
        };
        Some([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?])
    })
}

/// Twice the signed area of a triangle; positive when wound
/// counter-clockwise.
pub fn signed_area2(tri: &[[f32; 2]; 3]) -> f32 {
    let [a, b, c] = *tri;
    (b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1])
}

/// The total area covered by the indexed triangles, assuming they do not
/// overlap.
pub fn covered_area(vertices: &[Vertex], indices: &[u32]) -> f32 {
    triangles(vertices, indices)
        .map(|tri| signed_area2(&tri).abs() / 2.0)
        .sum()
}
