//! GPU buffer management.

use std::{cmp, fmt, hash, sync};

use crate::gl;
use crate::queue;

#[doc(inline)]
pub use self::format::Format;

/// OpenGL buffer ID type.
pub(crate) type Id = u32;

/// Determines what the buffer may be used for.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Kind {
    /// Corresponds to `GL_ARRAY_BUFFER`.
    Array,

    /// Corresponds to `GL_ELEMENT_ARRAY_BUFFER`.
    Index,
}

impl Kind {
    /// Returns the equivalent OpenGL buffer target enumeration constant.
    pub fn as_gl_enum(self) -> u32 {
        match self {
            Kind::Array => gl::ARRAY_BUFFER,
            Kind::Index => gl::ELEMENT_ARRAY_BUFFER,
        }
    }
}

/// A buffer data usage hint.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Usage {
    /// Corresponds to `GL_STATIC_DRAW`.
    StaticDraw,
}

impl Usage {
    /// Returns the equivalent OpenGL usage enumeration constant.
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Usage::StaticDraw => gl::STATIC_DRAW,
        }
    }
}

/// Pushes the buffer ID onto the factory buffer queue when the last
/// [`Buffer`] handle is destroyed.
///
/// [`Buffer`]: struct.Buffer.html
struct Destructor {
    id: Id,
    tx: queue::Sender<Id>,
}

impl Drop for Destructor {
    fn drop(&mut self) {
        let _ = self.tx.send(self.id);
    }
}

/// A contiguous region of GPU memory.
///
/// Cloning a `Buffer` shares the underlying GPU object; it is released once
/// every clone (including those held by accessors) has been dropped.
#[derive(Clone)]
pub struct Buffer {
    /// The OpenGL buffer ID.
    id: Id,

    /// The type of buffer, e.g. a vertex buffer.
    kind: Kind,

    /// The number of bytes held by the buffer.
    size: usize,

    /// Data usage hint.
    usage: Usage,

    /// Returns the buffer back to the factory upon destruction.
    _destructor: sync::Arc<Destructor>,
}

impl Buffer {
    /// Constructor.
    pub(crate) fn new(
        id: Id,
        kind: Kind,
        size: usize,
        usage: Usage,
        tx: queue::Sender<Id>,
    ) -> Self {
        Self {
            _destructor: sync::Arc::new(Destructor { id, tx }),
            id,
            kind,
            size,
            usage,
        }
    }

    /// Returns the OpenGL buffer ID.
    pub(crate) fn id(&self) -> Id {
        self.id
    }

    /// Sets the buffer size.
    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Returns the buffer kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the number of bytes this buffer contains.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the buffer data usage hint.
    pub fn usage(&self) -> Usage {
        self.usage
    }
}

impl cmp::PartialEq<Self> for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl cmp::Eq for Buffer {}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Buffer {
            id: Id,
            kind: Kind,
            size: usize,
            usage: Usage,
        }

        Buffer {
            id: self.id,
            kind: self.kind,
            size: self.size,
            usage: self.usage,
        }.fmt(f)
    }
}

impl hash::Hash for Buffer {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A formatted view into a [`Buffer`].
///
/// [`Buffer`]: struct.Buffer.html
#[derive(Clone, Debug)]
pub struct Accessor {
    /// The buffer the accessor reads from.
    buffer: Buffer,

    /// The accessor data format.
    format: Format,

    /// The number of bytes into the buffer the accessor reads from.
    offset: usize,

    /// The number of bytes between each element.
    stride: usize,
}

impl Accessor {
    /// Constructor.
    pub fn new(
        buffer: Buffer,
        format: Format,
        offset: usize,
        stride: usize,
    ) -> Self {
        Self {
            buffer,
            format,
            offset,
            stride,
        }
    }

    /// Returns the parent buffer.
    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Returns the accessor data format.
    pub fn format(&self) -> Format {
        self.format
    }

    /// Returns the accessor byte offset into the parent buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the accessor byte stride between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Buffer format descriptors.
pub mod format {
    use crate::gl;

    /// Describes the data format of an individual item in an accessor.
    ///
    /// The payload is the number of components, between 1 and 4.
    #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
    pub enum Format {
        /// 32-bit floating point number.
        F32(u8),

        /// Unsigned 32-bit integer.
        U32(u8),
    }

    impl Format {
        /// Returns the corresponding GL data type enumeration constant.
        pub(crate) fn gl_data_type(self) -> u32 {
            match self {
                Format::F32(_) => gl::FLOAT,
                Format::U32(_) => gl::UNSIGNED_INT,
            }
        }

        /// Returns the number of components, clamped to the valid range.
        pub fn size(self) -> usize {
            let size = match self {
                Format::F32(size) => size,
                Format::U32(size) => size,
            };
            size.max(1).min(4) as usize
        }

        /// Returns the number of bytes in one component.
        pub fn component_bytes(self) -> usize {
            match self {
                Format::F32(_) | Format::U32(_) => 4,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::Queue;

    #[test]
    fn last_clone_releases_the_buffer() {
        let queue = Queue::new();
        let buffer = Buffer::new(5, Kind::Array, 0, Usage::StaticDraw, queue.tx());
        let accessor = Accessor::new(buffer.clone(), Format::F32(3), 0, 24);
        drop(buffer);
        assert_eq!(queue.next(), None);
        drop(accessor);
        assert_eq!(queue.next(), Some(5));
    }

    #[test]
    fn format_sizes() {
        assert_eq!(Format::F32(3).size(), 3);
        assert_eq!(Format::F32(0).size(), 1);
        assert_eq!(Format::U32(9).size(), 4);
        assert_eq!(Format::U32(1).component_bytes(), 4);
        assert_eq!(Format::F32(1).gl_data_type(), gl::FLOAT);
        assert_eq!(Format::U32(1).gl_data_type(), gl::UNSIGNED_INT);
    }
}
