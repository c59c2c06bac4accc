//! Factory.

use std::{cell, ffi, mem, os, rc};

use crate::buffer;
use crate::error::{Error, Result};
use crate::gl;
use crate::shader;
use crate::util;
use crate::vertex_array;

use crate::draw_call::{DrawCall, Kind};
use crate::pipeline::{State, Viewport};
use crate::program::{Compiled, Destroyed, Uniform};
use crate::queue::Queue;
use crate::shader::Stage;
use crate::source::Sources;
use crate::{Buffer, Program, VertexArray};

/// OpenGL memory manager.
///
/// Every GPU object is created through the factory and every GL call goes
/// through it, on the thread that owns the context. Dropped objects are
/// deleted the next time the factory builds a program, creates geometry,
/// draws, or when [`collect_garbage`] is called.
///
/// [`collect_garbage`]: #method.collect_garbage
#[derive(Clone)]
pub struct Factory {
    /// Function pointers to the OpenGL backend.
    backend: rc::Rc<dyn gl::Api>,

    /// The program most recently made current through this factory.
    current: rc::Rc<cell::Cell<u32>>,

    /// Destroyed buffers arrive here to be destroyed.
    buffer_queue: Queue<buffer::Id>,

    /// Destroyed vertex arrays arrive here to be destroyed.
    vertex_array_queue: Queue<vertex_array::Id>,

    /// Destroyed GLSL programs and shader objects arrive here to be
    /// destroyed.
    program_queue: Queue<Destroyed>,
}

impl Factory {
    /// Constructor.
    pub fn new<F>(query_proc_address: F) -> Self
        where F: FnMut(&str) -> *const os::raw::c_void
    {
        Self::from_backend(rc::Rc::new(gl::Backend::load(query_proc_address)))
    }

    /// Build a factory issuing its calls to a custom [`Api`] implementation.
    ///
    /// [`Api`]: ../gl/trait.Api.html
    pub fn from_backend<B>(backend: rc::Rc<B>) -> Self
        where B: gl::Api + 'static
    {
        Self {
            backend,
            current: rc::Rc::new(cell::Cell::new(0)),
            buffer_queue: Queue::new(),
            vertex_array_queue: Queue::new(),
            program_queue: Queue::new(),
        }
    }

    /// Delete every GPU object whose handle has been dropped.
    pub fn collect_garbage(&self) {
        while let Some(item) = self.program_queue.next() {
            match item {
                Destroyed::Object(id) => {
                    debug!("deleting shader {}", id);
                    self.backend.delete_shader(id);
                }
                Destroyed::Program(id) => {
                    debug!("deleting program {}", id);
                    if self.current.get() == id {
                        self.current.set(0);
                    }
                    self.backend.delete_program(id);
                }
            }
        }
        while let Some(id) = self.buffer_queue.next() {
            debug!("deleting buffer {}", id);
            self.backend.delete_buffer(id);
        }
        while let Some(id) = self.vertex_array_queue.next() {
            debug!("deleting vertex array {}", id);
            self.backend.delete_vertex_array(id);
        }
    }

    // Shader stages

    /// Compile GLSL shader code into a shader object.
    ///
    /// Compilation failure is recorded on the returned object rather than
    /// reported; see [`shader`] for the checked variant. Fails only if the
    /// text contains a NUL byte.
    ///
    /// [`shader`]: #method.shader
    pub fn compile(&self, stage: Stage, source: &str) -> Result<shader::Object> {
        let source = util::cstring(source).map_err(|source| Error::Nul { stage, source })?;
        Ok(self.compile_cstr(stage, &source))
    }

    /// Compile GLSL shader code into a shader object, failing if the
    /// driver rejects it.
    pub fn shader(&self, stage: Stage, source: &str) -> Result<shader::Object> {
        self.compile(stage, source)?.check()
    }

    fn compile_cstr(&self, stage: Stage, source: &ffi::CStr) -> shader::Object {
        let id = self.backend.create_shader(stage.as_gl_enum());
        self.backend.shader_source(id, source);
        self.backend.compile_shader(id);
        let failure = if self.backend.compile_status(id) {
            debug!("compiled {} shader {}", stage, id);
            None
        } else {
            Some(self.backend.shader_info_log(id))
        };
        shader::Object::new(id, stage, failure, self.program_queue.tx())
    }

    // Programs

    /// Link a vertex and a fragment shader object into a GLSL program.
    ///
    /// The shader objects remain owned by the caller; dropping them after
    /// linking is allowed.
    pub fn link(
        &self,
        vertex: &shader::Object,
        fragment: &shader::Object,
    ) -> Result<Program> {
        let (program, failure) = self.link_objects(vertex, fragment);
        match failure {
            Some(log) => Err(Error::Link { log }),
            None => Ok(program),
        }
    }

    fn link_objects(
        &self,
        vertex: &shader::Object,
        fragment: &shader::Object,
    ) -> (Program, Option<String>) {
        if vertex.stage() != Stage::Vertex || fragment.stage() != Stage::Fragment {
            warn!(
                "linking {} and {} shaders as a vertex/fragment pair",
                vertex.stage(),
                fragment.stage(),
            );
        }
        let id = self.backend.create_program();
        self.backend.attach_shader(id, vertex.id());
        self.backend.attach_shader(id, fragment.id());
        self.backend.link_program(id);
        let program = Program::new(id, self.program_queue.tx());
        let failure = if self.backend.link_status(id) {
            debug!("linked program {}", id);
            None
        } else {
            Some(self.backend.program_info_log(id))
        };
        (program, failure)
    }

    /// Build a program from vertex and fragment sources, stopping at the
    /// first failure.
    ///
    /// The intermediate shader objects are deleted before returning,
    /// whether or not the program was built.
    pub fn program(&self, sources: &Sources) -> Result<Program> {
        let result = self.build_program(sources);
        self.collect_garbage();
        result
    }

    fn build_program(&self, sources: &Sources) -> Result<Program> {
        let vertex_source = sources.load(Stage::Vertex)?;
        let fragment_source = sources.load(Stage::Fragment)?;
        let vertex = self.shader(Stage::Vertex, &vertex_source)?;
        let fragment = self.shader(Stage::Fragment, &fragment_source)?;
        self.link(&vertex, &fragment)
    }

    /// Build a program from vertex and fragment sources, carrying on past
    /// failures.
    ///
    /// Unreadable sources are replaced by empty text, compilation failures
    /// do not prevent linking, and a program object is always returned.
    /// Each failure is logged and collected in [`Compiled::errors`].
    ///
    /// [`Compiled::errors`]: ../program/struct.Compiled.html#structfield.errors
    pub fn program_lenient(&self, sources: &Sources) -> Compiled {
        let mut errors = Vec::new();
        let vertex = self.compile_lenient(sources, Stage::Vertex, &mut errors);
        let fragment = self.compile_lenient(sources, Stage::Fragment, &mut errors);
        let (program, failure) = self.link_objects(&vertex, &fragment);
        if let Some(log) = failure {
            let error = Error::Link { log };
            error!("{}", error);
            errors.push(error);
        }
        drop(vertex);
        drop(fragment);
        self.collect_garbage();
        Compiled { program, errors }
    }

    fn compile_lenient(
        &self,
        sources: &Sources,
        stage: Stage,
        errors: &mut Vec<Error>,
    ) -> shader::Object {
        let mut report = |error: Error| {
            error!("{}", error);
            errors.push(error);
        };
        let text = match sources.load(stage) {
            Ok(text) => text.into_owned(),
            Err(error) => {
                report(error);
                String::new()
            }
        };
        let source = match util::cstring(text) {
            Ok(source) => source,
            Err(source) => {
                report(Error::Nul { stage, source });
                ffi::CString::default()
            }
        };
        let object = self.compile_cstr(stage, &source);
        if let Some(log) = object.info_log() {
            report(Error::Compile { stage, log: log.to_string() });
        }
        object
    }

    /// Make the program current for subsequent draw calls and uniform
    /// updates.
    pub fn use_program(&self, program: &Program) {
        self.backend.use_program(program.id());
        self.current.set(program.id());
    }

    /// Retrieves the location of a named uniform.
    ///
    /// Returns `None` if the program has no active uniform by that name.
    pub fn uniform_location(&self, program: &Program, name: &str) -> Option<i32> {
        let cname = match util::cstring(name) {
            Ok(cname) => cname,
            Err(_) => {
                warn!("uniform name {:?} contains a NUL byte", name);
                return None;
            }
        };
        match self.backend.get_uniform_location(program.id(), &cname) {
            -1 => None,
            x => Some(x),
        }
    }

    /// Sets a named uniform of the program.
    ///
    /// The program must be current (see [`use_program`]); otherwise the
    /// set has no effect. Unknown names are ignored.
    ///
    /// [`use_program`]: #method.use_program
    pub fn set_uniform<U>(&self, program: &Program, name: &str, value: U)
        where U: Uniform
    {
        if self.current.get() != program.id() {
            warn!(
                "ignoring uniform `{}` of program {} while it is not in use",
                name,
                program.id(),
            );
            return;
        }
        match self.uniform_location(program, name) {
            Some(location) => value.set(&*self.backend, location),
            None => trace!("ignoring unknown uniform `{}` = {:?}", name, value),
        }
    }

    /// Sets a named `bool` uniform.
    pub fn set_bool(&self, program: &Program, name: &str, value: bool) {
        self.set_uniform(program, name, value);
    }

    /// Sets a named `int` uniform.
    pub fn set_int(&self, program: &Program, name: &str, value: i32) {
        self.set_uniform(program, name, value);
    }

    /// Sets a named `float` uniform.
    pub fn set_float(&self, program: &Program, name: &str, value: f32) {
        self.set_uniform(program, name, value);
    }

    // Geometry

    /// Create an empty GPU buffer.
    pub fn buffer(&self, kind: buffer::Kind, usage: buffer::Usage) -> Buffer {
        self.collect_garbage();
        let id = self.backend.gen_buffer();
        let tx = self.buffer_queue.tx();
        Buffer::new(id, kind, 0, usage, tx)
    }

    /// (Re)-initialize the contents of a [`Buffer`].
    ///
    /// [`Buffer`]: buffer/struct.Buffer.html
    pub fn initialize_buffer<T>(&self, buffer: &mut Buffer, data: &[T]) {
        let size = data.len() * mem::size_of::<T>();
        let target = buffer.kind().as_gl_enum();
        self.backend.bind_buffer(buffer.id(), target);
        self.backend.buffer_data(
            target,
            size,
            data.as_ptr() as *const _,
            buffer.usage().as_gl_enum(),
        );
        self.backend.bind_buffer(0, target);
        buffer.set_size(size);
    }

    /// A collection of GPU buffers that may be drawn with a program.
    pub fn vertex_array(
        &self,
        attributes: [Option<vertex_array::Attribute>; vertex_array::MAX_ATTRIBUTES],
        indices: Option<vertex_array::Indices>,
    ) -> VertexArray {
        self.collect_garbage();
        let id = self.backend.gen_vertex_array();
        let tx = self.vertex_array_queue.tx();

        // Setup the vertex array
        {
            self.backend.bind_vertex_array(id);
            if let Some(ref accessor) = indices {
                self.backend.bind_buffer(accessor.buffer().id(), gl::ELEMENT_ARRAY_BUFFER);
            }
            for (binding, attribute) in attributes.iter().enumerate() {
                if let Some(ref accessor) = *attribute {
                    self.backend.bind_buffer(accessor.buffer().id(), gl::ARRAY_BUFFER);
                    self.backend.enable_vertex_attrib_array(binding as u8);
                    self.backend.vertex_attrib_pointer(
                        binding as u8,
                        accessor.format().size() as _,
                        accessor.format().gl_data_type(),
                        false,
                        accessor.stride() as _,
                        accessor.offset(),
                    )
                }
            }
            self.backend.bind_vertex_array(0);
            self.backend.bind_buffer(0, gl::ARRAY_BUFFER);
            self.backend.bind_buffer(0, gl::ELEMENT_ARRAY_BUFFER);
        }

        VertexArray::new(id, attributes, indices, tx)
    }

    // Drawing

    /// Clear the color buffer of the default framebuffer.
    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.backend.clear_color(r, g, b, a);
        self.backend.clear(gl::COLOR_BUFFER_BIT);
    }

    /// Perform a draw call.
    pub fn draw(
        &self,
        state: &State,
        vertex_array: &VertexArray,
        draw_call: &DrawCall,
        program: &Program,
    ) {
        self.collect_garbage();
        if let Some(Viewport { x, y, w, h }) = state.viewport {
            self.backend.viewport(x, y, w, h);
        }
        self.backend.polygon_mode(gl::FRONT_AND_BACK, state.polygon_mode.as_gl_enum());
        self.backend.bind_vertex_array(vertex_array.id());
        self.use_program(program);
        let mode = draw_call.primitive.as_gl_enum();
        match draw_call.kind {
            Kind::Arrays => {
                self.backend.draw_arrays(mode, draw_call.offset, draw_call.count);
            }
            Kind::Elements => match vertex_array.indices() {
                Some(accessor) => {
                    let format = accessor.format();
                    let offset = accessor.offset() + draw_call.offset * format.component_bytes();
                    self.backend.draw_elements(mode, offset, draw_call.count, format.gl_data_type());
                }
                None => warn!("indexed draw call on {:?} without indices", vertex_array),
            },
        }
        self.backend.use_program(0);
        self.current.set(0);
        self.backend.bind_vertex_array(0);
    }

    /// Read back RGBA8 pixels of the default framebuffer, bottom row first.
    pub fn read_pixels(&self, region: Viewport) -> Vec<u8> {
        self.backend.read_pixels(region.x, region.y, region.w, region.h)
    }
}
