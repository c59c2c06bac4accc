//! GLSL programs.

use std::{cmp, fmt, hash};

use crate::error::{Error, Result};
use crate::gl;
use crate::queue;

/// Specifies whether the destroyed item was an object or a program.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Destroyed {
    /// A shader object.
    Object(u32),

    /// A compiled and linked program.
    Program(u32),
}

/// A compiled and linked shader program.
///
/// `Program` owns its GPU object: it cannot be cloned, and dropping it
/// returns the ID to the factory, which deletes it on its next operation.
pub struct Program {
    /// The OpenGL program ID.
    id: u32,

    /// Returns the program back to the factory upon destruction.
    tx: queue::Sender<Destroyed>,
}

impl Program {
    /// Constructor.
    pub(crate) fn new(id: u32, tx: queue::Sender<Destroyed>) -> Self {
        Self { id, tx }
    }

    /// Returns the GLSL program ID.
    pub(crate) fn id(&self) -> u32 {
        self.id
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        let _ = self.tx.send(Destroyed::Program(self.id));
    }
}

impl cmp::Eq for Program {}

impl cmp::PartialEq<Self> for Program {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        #[derive(Debug)]
        struct Program(u32);

        Program(self.id).fmt(f)
    }
}

impl hash::Hash for Program {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

/// The outcome of building a program without failing fast.
///
/// A program object is always produced. When `errors` is non-empty the
/// program is most likely unusable: drawing with it renders nothing.
#[derive(Debug)]
pub struct Compiled {
    /// The linked (or failed-to-link) program.
    pub program: Program,

    /// Every failure encountered on the way, in order.
    pub errors: Vec<Error>,
}

impl Compiled {
    /// Returns `true` if sources loaded, both stages compiled and the
    /// program linked.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the program, or the first error encountered.
    pub fn into_result(self) -> Result<Program> {
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.program),
        }
    }
}

/// A value that can be written to a uniform variable.
pub trait Uniform: Copy + fmt::Debug {
    /// Writes the value to `location` of the current program.
    fn set(self, backend: &dyn gl::Api, location: i32);
}

impl Uniform for bool {
    fn set(self, backend: &dyn gl::Api, location: i32) {
        backend.uniform_1i(location, self as i32);
    }
}

impl Uniform for i32 {
    fn set(self, backend: &dyn gl::Api, location: i32) {
        backend.uniform_1i(location, self);
    }
}

impl Uniform for f32 {
    fn set(self, backend: &dyn gl::Api, location: i32) {
        backend.uniform_1f(location, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{Mock, Value};
    use crate::queue::Queue;
    use crate::shader::Stage;

    #[test]
    fn dropping_a_program_queues_its_id() {
        let queue = Queue::new();
        let program = Program::new(12, queue.tx());
        assert_eq!(program.id(), 12);
        assert_eq!(queue.next(), None);
        drop(program);
        assert_eq!(queue.next(), Some(Destroyed::Program(12)));
    }

    #[test]
    fn compiled_into_result_returns_first_error() {
        let queue = Queue::new();
        let compiled = Compiled {
            program: Program::new(1, queue.tx()),
            errors: vec![
                Error::Compile { stage: Stage::Vertex, log: "first".to_string() },
                Error::Link { log: "second".to_string() },
            ],
        };
        assert!(!compiled.is_ok());
        match compiled.into_result() {
            Err(Error::Compile { log, .. }) => assert_eq!(log, "first"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(queue.next(), Some(Destroyed::Program(1)));
    }

    #[test]
    fn bool_uniforms_are_written_as_integers() {
        let mock = Mock::new();
        true.set(&mock, 3);
        2.5f32.set(&mock, 4);
        assert_eq!(mock.written(), vec![(3, Value::Int(1)), (4, Value::Float(2.5))]);
    }
}
