//! Vertex array objects.

use std::{cmp, fmt, hash};

use crate::buffer;
use crate::queue;

/// The maximum number of vertex attributes permitted by the crate.
pub const MAX_ATTRIBUTES: usize = 4;

/// The OpenGL VAO ID type.
pub(crate) type Id = u32;

/// Vertex attribute.
pub type Attribute = buffer::Accessor;

/// Index data.
pub type Indices = buffer::Accessor;

/// Corresponds to an OpenGL vertex array object.
///
/// The VAO keeps its attribute and index buffers alive and is returned to
/// the factory for deletion when dropped.
pub struct VertexArray {
    /// The OpenGL VAO ID.
    id: Id,

    /// Draw sequence indices to bind at draw time.
    indices: Option<Indices>,

    /// Vertex attributes to bind at draw time.
    attributes: [Option<Attribute>; MAX_ATTRIBUTES],

    /// Returns the VAO back to the factory upon destruction.
    tx: queue::Sender<Id>,
}

impl VertexArray {
    /// Constructor.
    pub(crate) fn new(
        id: Id,
        attributes: [Option<Attribute>; MAX_ATTRIBUTES],
        indices: Option<Indices>,
        tx: queue::Sender<Id>,
    ) -> Self {
        Self {
            id,
            indices,
            attributes,
            tx,
        }
    }

    /// Returns the OpenGL VAO ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Returns the accessor bound as the element array buffer.
    pub fn indices(&self) -> Option<&Indices> {
        self.indices.as_ref()
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        let _ = self.tx.send(self.id);
    }
}

impl cmp::Eq for VertexArray {}

impl cmp::PartialEq<Self> for VertexArray {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for VertexArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct VertexArray<'a> {
            id: u32,
            indices: Option<&'a Indices>,
            attributes: &'a [Option<Attribute>],
        }

        VertexArray {
            id: self.id,
            indices: self.indices.as_ref(),
            attributes: &self.attributes,
        }.fmt(f)
    }
}

impl hash::Hash for VertexArray {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}
