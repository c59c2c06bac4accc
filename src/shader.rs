//! GLSL shader stages.

use std::{cmp, fmt, hash};

use crate::error::{Error, Result};
use crate::gl;
use crate::program::Destroyed;
use crate::queue;

/// The pipeline stage a shader object targets.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Stage {
    /// Corresponds to `GL_VERTEX_SHADER`.
    Vertex,

    /// Corresponds to `GL_FRAGMENT_SHADER`.
    Fragment,
}

impl Stage {
    /// Returns the equivalent OpenGL shader type enumeration constant.
    pub(crate) fn as_gl_enum(self) -> u32 {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Stage::Vertex => f.write_str("vertex"),
            Stage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A compiled shader object.
///
/// Compilation may have failed, in which case the compiler log is kept and
/// [`check`] returns it as an error. The object is returned to the factory
/// for deletion when dropped.
///
/// [`check`]: #method.check
pub struct Object {
    /// The OpenGL shader ID.
    id: u32,

    /// The pipeline stage.
    stage: Stage,

    /// Compiler output when compilation failed.
    failure: Option<String>,

    /// Returns the shader back to the factory upon destruction.
    tx: queue::Sender<Destroyed>,
}

impl Object {
    /// Constructor.
    pub(crate) fn new(
        id: u32,
        stage: Stage,
        failure: Option<String>,
        tx: queue::Sender<Destroyed>,
    ) -> Self {
        Self {
            id,
            stage,
            failure,
            tx,
        }
    }

    /// Returns the OpenGL shader ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }

    /// Returns the pipeline stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns `true` if the driver reported a successful compilation.
    pub fn is_compiled(&self) -> bool {
        self.failure.is_none()
    }

    /// Returns the compiler log if compilation failed.
    pub fn info_log(&self) -> Option<&str> {
        self.failure.as_ref().map(String::as_str)
    }

    /// Converts a failed compilation into an error.
    ///
    /// The shader object is released either way.
    pub fn check(self) -> Result<Self> {
        if let Some(log) = self.failure.clone() {
            return Err(Error::Compile { stage: self.stage, log });
        }
        Ok(self)
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        let _ = self.tx.send(Destroyed::Object(self.id));
    }
}

impl cmp::Eq for Object {}

impl cmp::PartialEq<Self> for Object {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Object {
            id: u32,
            stage: Stage,
            compiled: bool,
        }

        Object {
            id: self.id,
            stage: self.stage,
            compiled: self.is_compiled(),
        }.fmt(f)
    }
}

impl hash::Hash for Object {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::Queue;

    #[test]
    fn stage_names() {
        assert_eq!(Stage::Vertex.to_string(), "vertex");
        assert_eq!(Stage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn stage_gl_enums() {
        assert_eq!(Stage::Vertex.as_gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(Stage::Fragment.as_gl_enum(), gl::FRAGMENT_SHADER);
    }

    #[test]
    fn failed_object_checks_into_compile_error() {
        let queue = Queue::new();
        let object = Object::new(4, Stage::Vertex, Some("bad token".to_string()), queue.tx());
        assert!(!object.is_compiled());
        assert_eq!(object.info_log(), Some("bad token"));
        match object.check() {
            Err(Error::Compile { stage, log }) => {
                assert_eq!(stage, Stage::Vertex);
                assert_eq!(log, "bad token");
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(queue.next(), Some(Destroyed::Object(4)));
    }

    #[test]
    fn dropping_an_object_queues_its_id() {
        let queue = Queue::new();
        let object = Object::new(9, Stage::Fragment, None, queue.tx());
        assert!(object.is_compiled());
        let object = object.check().unwrap();
        assert_eq!(queue.next(), None);
        drop(object);
        assert_eq!(queue.next(), Some(Destroyed::Object(9)));
    }
}
