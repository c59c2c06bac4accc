//! Scoped OpenGL shader programs and the little geometry needed to draw
//! with them.
//!
//! All GPU objects are created through a [`Factory`] and released when their
//! handle is dropped. A program is built from a pair of [`Sources`]:
//!
//! ```rust,no_run
//! # fn query(_: &str) -> *const std::os::raw::c_void { std::ptr::null() }
//! use shade::{Sources, Stage};
//!
//! let factory = shade::init(query);
//! let sources = Sources::files("quad.vert.glsl", "quad.frag.glsl")
//!     .with_base_dir("demos/shaders");
//! match factory.program(&sources) {
//!     Ok(program) => {
//!         factory.use_program(&program);
//!         factory.set_float(&program, "u_green", 0.5);
//!     }
//!     Err(error) => eprintln!("{} ({:?})", error, error.stage() == Some(Stage::Vertex)),
//! }
//! ```
//!
//! [`Factory`]: struct.Factory.html
//! [`Sources`]: source/struct.Sources.html

extern crate crossbeam_channel;
#[macro_use] extern crate log;

mod factory;
mod queue;
mod util;
pub mod gl;

pub mod buffer;
pub mod draw_call;
pub mod error;
pub mod mesh;
pub mod pipeline;
pub mod program;
pub mod shader;
pub mod source;
pub mod vertex_array;

#[cfg(test)]
mod mock;

use std::os;

/// Initialize the library, creating a factory to instantiate library
/// objects.
///
/// The OpenGL context must be current on the calling thread.
pub fn init<F>(query_proc_address: F) -> Factory
    where F: FnMut(&str) -> *const os::raw::c_void
{
    Factory::new(query_proc_address)
}

#[doc(inline)]
pub use buffer::Accessor;

#[doc(inline)]
pub use buffer::Buffer;

#[doc(inline)]
pub use draw_call::DrawCall;

#[doc(inline)]
pub use draw_call::Primitive;

#[doc(inline)]
pub use error::Error;

#[doc(inline)]
pub use error::Result;

#[doc(inline)]
pub use factory::Factory;

#[doc(inline)]
pub use mesh::Mesh;

#[doc(inline)]
pub use pipeline::State;

#[doc(inline)]
pub use program::Compiled;

#[doc(inline)]
pub use program::Program;

#[doc(inline)]
pub use program::Uniform;

#[doc(inline)]
pub use shader::Stage;

#[doc(inline)]
pub use source::Source;

#[doc(inline)]
pub use source::Sources;

#[doc(inline)]
pub use vertex_array::VertexArray;
