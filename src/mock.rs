//! Recording stand-in for the OpenGL driver, used by unit tests.
//!
//! Compilation succeeds when the source contains an entry point
//! (`void main`). Linking succeeds when a compiled vertex and a compiled
//! fragment shader are attached. Every `uniform <type> <name>;` declaration
//! in the attached sources becomes an active uniform.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::{ffi, os};

use crate::gl;

/// `GL_INVALID_VALUE`.
pub const INVALID_VALUE: u32 = 0x0501;

/// `GL_INVALID_OPERATION`.
pub const INVALID_OPERATION: u32 = 0x0502;

/// A value written to a uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
}

struct Shader {
    ty: u32,
    source: String,
    compiled: bool,
}

struct Program {
    attached: Vec<u32>,
    linked: bool,
    log: String,
    uniforms: Vec<String>,
    values: HashMap<i32, Value>,
}

#[derive(Default)]
pub struct Mock {
    next_id: Cell<u32>,
    current: Cell<u32>,
    shaders: RefCell<HashMap<u32, Shader>>,
    programs: RefCell<HashMap<u32, Program>>,
    buffers: RefCell<HashSet<u32>>,
    vertex_arrays: RefCell<HashSet<u32>>,
    written: RefCell<Vec<(i32, Value)>>,
    errors: RefCell<Vec<u32>>,
    calls: RefCell<Vec<String>>,
}

impl Mock {
    pub fn new() -> Self {
        Self::default()
    }

    fn gen(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn raise(&self, error: u32) {
        self.errors.borrow_mut().push(error);
    }

    fn set(&self, location: i32, value: Value) {
        self.written.borrow_mut().push((location, value));
        if location == -1 {
            return;
        }
        let current = self.current.get();
        match self.programs.borrow_mut().get_mut(&current) {
            Some(program) if (location as usize) < program.uniforms.len() => {
                program.values.insert(location, value);
            }
            Some(_) => self.raise(INVALID_OPERATION),
            None => self.raise(INVALID_OPERATION),
        }
    }

    /// Every GL call made, formatted as `glName(args)`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Returns `true` if a call with exactly this text was made.
    pub fn called(&self, call: &str) -> bool {
        self.calls.borrow().iter().any(|c| c == call)
    }

    /// GL errors raised so far.
    pub fn errors(&self) -> Vec<u32> {
        self.errors.borrow().clone()
    }

    /// Raw uniform writes in call order.
    pub fn written(&self) -> Vec<(i32, Value)> {
        self.written.borrow().clone()
    }

    /// The program made current by the last successful `glUseProgram`.
    pub fn current(&self) -> u32 {
        self.current.get()
    }

    /// Number of shader objects not yet deleted.
    pub fn live_shaders(&self) -> usize {
        self.shaders.borrow().len()
    }

    /// Number of program objects not yet deleted.
    pub fn live_programs(&self) -> usize {
        self.programs.borrow().len()
    }

    /// Number of buffers and vertex arrays not yet deleted.
    pub fn live_geometry(&self) -> usize {
        self.buffers.borrow().len() + self.vertex_arrays.borrow().len()
    }

    /// The value stored in a program's named uniform.
    pub fn uniform(&self, program: u32, name: &str) -> Option<Value> {
        let programs = self.programs.borrow();
        let program = programs.get(&program)?;
        let location = program.uniforms.iter().position(|u| u == name)?;
        program.values.get(&(location as i32)).cloned()
    }
}

impl gl::Api for Mock {
    fn clear(&self, ops: u32) {
        self.record(format!("glClear({:#x})", ops));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(format!("glClearColor({}, {}, {}, {})", r, g, b, a));
    }

    fn polygon_mode(&self, face: u32, mode: u32) {
        self.record(format!("glPolygonMode({:#x}, {:#x})", face, mode));
    }

    fn viewport(&self, x: u32, y: u32, w: u32, h: u32) {
        self.record(format!("glViewport({}, {}, {}, {})", x, y, w, h));
    }

    fn gen_buffer(&self) -> u32 {
        let id = self.gen();
        self.buffers.borrow_mut().insert(id);
        self.record(format!("glGenBuffers({})", id));
        id
    }

    fn bind_buffer(&self, id: u32, ty: u32) {
        self.record(format!("glBindBuffer({:#x}, {})", ty, id));
    }

    fn buffer_data(&self, ty: u32, len: usize, _ptr: *const os::raw::c_void, usage: u32) {
        self.record(format!("glBufferData({:#x}, {}, {:#x})", ty, len, usage));
    }

    fn delete_buffer(&self, id: u32) {
        self.buffers.borrow_mut().remove(&id);
        self.record(format!("glDeleteBuffers({})", id));
    }

    fn gen_vertex_array(&self) -> u32 {
        let id = self.gen();
        self.vertex_arrays.borrow_mut().insert(id);
        self.record(format!("glGenVertexArrays({})", id));
        id
    }

    fn bind_vertex_array(&self, id: u32) {
        self.record(format!("glBindVertexArray({})", id));
    }

    fn vertex_attrib_pointer(&self, idx: u8, sz: i32, ty: u32, norm: bool, stride: i32, off: usize) {
        self.record(format!(
            "glVertexAttribPointer({}, {}, {:#x}, {}, {}, {})",
            idx, sz, ty, norm, stride, off,
        ));
    }

    fn enable_vertex_attrib_array(&self, idx: u8) {
        self.record(format!("glEnableVertexAttribArray({})", idx));
    }

    fn delete_vertex_array(&self, id: u32) {
        self.vertex_arrays.borrow_mut().remove(&id);
        self.record(format!("glDeleteVertexArrays({})", id));
    }

    fn create_shader(&self, ty: u32) -> u32 {
        let id = self.gen();
        self.shaders.borrow_mut().insert(id, Shader {
            ty,
            source: String::new(),
            compiled: false,
        });
        self.record(format!("glCreateShader({:#x})", ty));
        id
    }

    fn shader_source(&self, id: u32, source: &ffi::CStr) {
        if let Some(shader) = self.shaders.borrow_mut().get_mut(&id) {
            shader.source = source.to_string_lossy().into_owned();
        }
        self.record(format!("glShaderSource({})", id));
    }

    fn compile_shader(&self, id: u32) {
        if let Some(shader) = self.shaders.borrow_mut().get_mut(&id) {
            shader.compiled = shader.source.contains("void main");
        }
        self.record(format!("glCompileShader({})", id));
    }

    fn compile_status(&self, id: u32) -> bool {
        self.shaders.borrow().get(&id).map_or(false, |shader| shader.compiled)
    }

    fn shader_info_log(&self, id: u32) -> String {
        match self.shaders.borrow().get(&id) {
            Some(shader) if !shader.compiled => {
                "0:1(1): error: syntax error, unexpected end of file".to_string()
            }
            _ => String::new(),
        }
    }

    fn delete_shader(&self, id: u32) {
        self.shaders.borrow_mut().remove(&id);
        self.record(format!("glDeleteShader({})", id));
    }

    fn create_program(&self) -> u32 {
        let id = self.gen();
        self.programs.borrow_mut().insert(id, Program {
            attached: Vec::new(),
            linked: false,
            log: String::new(),
            uniforms: Vec::new(),
            values: HashMap::new(),
        });
        self.record(format!("glCreateProgram({})", id));
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(program) = self.programs.borrow_mut().get_mut(&program) {
            program.attached.push(shader);
        }
        self.record(format!("glAttachShader({}, {})", program, shader));
    }

    fn link_program(&self, id: u32) {
        let shaders = self.shaders.borrow();
        let mut programs = self.programs.borrow_mut();
        if let Some(program) = programs.get_mut(&id) {
            let stages: Vec<&Shader> = program
                .attached
                .iter()
                .filter_map(|shader| shaders.get(shader))
                .collect();
            let compiled = |ty: u32| stages.iter().any(|s| s.ty == ty && s.compiled);
            let all_compiled = stages.iter().all(|s| s.compiled);
            program.linked = all_compiled
                && compiled(gl::VERTEX_SHADER)
                && compiled(gl::FRAGMENT_SHADER);
            program.uniforms.clear();
            program.values.clear();
            if program.linked {
                program.log.clear();
                for stage in &stages {
                    for line in stage.source.lines() {
                        let mut words = line.split_whitespace();
                        if words.next() != Some("uniform") {
                            continue;
                        }
                        let _ty = words.next();
                        if let Some(name) = words.next() {
                            let name = name.trim_end_matches(';').to_string();
                            if !program.uniforms.contains(&name) {
                                program.uniforms.push(name);
                            }
                        }
                    }
                }
            } else {
                program.log = "error: linking with uncompiled/unspecialized shader".to_string();
            }
        }
        self.record(format!("glLinkProgram({})", id));
    }

    fn link_status(&self, id: u32) -> bool {
        self.programs.borrow().get(&id).map_or(false, |program| program.linked)
    }

    fn program_info_log(&self, id: u32) -> String {
        self.programs
            .borrow()
            .get(&id)
            .map(|program| program.log.clone())
            .unwrap_or_default()
    }

    fn is_program(&self, id: u32) -> bool {
        self.programs.borrow().contains_key(&id)
    }

    fn use_program(&self, id: u32) {
        self.record(format!("glUseProgram({})", id));
        if id == 0 {
            self.current.set(0);
            return;
        }
        let linked = self.programs.borrow().get(&id).map(|program| program.linked);
        match linked {
            Some(true) => self.current.set(id),
            Some(false) => self.raise(INVALID_OPERATION),
            None => self.raise(INVALID_VALUE),
        }
    }

    fn delete_program(&self, id: u32) {
        self.programs.borrow_mut().remove(&id);
        if self.current.get() == id {
            self.current.set(0);
        }
        self.record(format!("glDeleteProgram({})", id));
    }

    fn get_uniform_location(&self, id: u32, name: &ffi::CStr) -> i32 {
        let name = name.to_string_lossy();
        self.record(format!("glGetUniformLocation({}, {})", id, name));
        let programs = self.programs.borrow();
        match programs.get(&id) {
            Some(program) => program
                .uniforms
                .iter()
                .position(|u| *u == name)
                .map_or(-1, |location| location as i32),
            None => {
                self.raise(INVALID_VALUE);
                -1
            }
        }
    }

    fn uniform_1i(&self, location: i32, value: i32) {
        self.record(format!("glUniform1i({}, {})", location, value));
        self.set(location, Value::Int(value));
    }

    fn uniform_1f(&self, location: i32, value: f32) {
        self.record(format!("glUniform1f({}, {})", location, value));
        self.set(location, Value::Float(value));
    }

    fn draw_arrays(&self, mode: u32, offset: usize, count: usize) {
        self.record(format!("glDrawArrays({:#x}, {}, {})", mode, offset, count));
    }

    fn draw_elements(&self, mode: u32, offset: usize, count: usize, ty: u32) {
        self.record(format!("glDrawElements({:#x}, {}, {:#x}, {})", mode, count, ty, offset));
    }

    fn read_pixels(&self, x: u32, y: u32, w: u32, h: u32) -> Vec<u8> {
        self.record(format!("glReadPixels({}, {}, {}, {})", x, y, w, h));
        vec![0; w as usize * h as usize * 4]
    }
}
