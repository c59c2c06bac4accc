//! Fixed-function state.

use crate::gl;

/// Specifies the polygon rasterization method.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PolygonMode {
    /// Boundary edges of the polygon are drawn as line segments.
    Line,

    /// The interior of the polygon is filled.
    #[default]
    Fill,
}

impl PolygonMode {
    pub(crate) fn as_gl_enum(&self) -> u32 {
        match *self {
            PolygonMode::Line => gl::LINE,
            PolygonMode::Fill => gl::FILL,
        }
    }
}

/// Viewport region to render to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Viewport {
    /// X offset.
    pub x: u32,

    /// Y offset.
    pub y: u32,

    /// Width.
    pub w: u32,

    /// Height.
    pub h: u32,
}

impl Viewport {
    /// A viewport covering a `w` by `h` surface from the origin.
    pub fn new(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

/// Fixed-function state parameters.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct State {
    /// Specifies the polygon rasterization method.
    pub polygon_mode: PolygonMode,

    /// Specifies region to render to. `None` keeps the current viewport.
    pub viewport: Option<Viewport>,
}
