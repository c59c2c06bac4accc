//! Draw call dispatch.

use crate::gl;

/// Primitive topology.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Primitive {
    /// List of triangle points.
    Triangles,
}

impl Primitive {
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Primitive::Triangles => gl::TRIANGLES,
        }
    }
}

/// Draw call kind.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// Draw consecutive vertices (`glDrawArrays`).
    Arrays,

    /// Draw vertices through the index buffer (`glDrawElements`).
    Elements,
}

/// A draw call command.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DrawCall {
    /// Where the vertices/elements begin, counted in vertices/elements.
    pub offset: usize,

    /// Number of vertices/elements to draw.
    pub count: usize,

    /// The primitive topology.
    pub primitive: Primitive,

    /// Draw call kind.
    pub kind: Kind,
}

impl DrawCall {
    /// Draw `count` triangle vertices starting at the first.
    pub fn arrays(count: usize) -> Self {
        Self {
            offset: 0,
            count,
            primitive: Primitive::Triangles,
            kind: Kind::Arrays,
        }
    }

    /// Draw `count` triangle indices starting at the first.
    pub fn elements(count: usize) -> Self {
        Self {
            offset: 0,
            count,
            primitive: Primitive::Triangles,
            kind: Kind::Elements,
        }
    }
}
