//! OpenGL function table.

use std::{ffi, os, ptr, rc};

// Import OpenGL bindings.
include!(concat!(env!("OUT_DIR"), "/gl.rs"));

/// The subset of OpenGL the crate calls into.
///
/// Every method corresponds to one GL entry point (or a status query built
/// from one). [`Backend`] forwards to the driver; tests substitute a
/// recording implementation.
///
/// [`Backend`]: struct.Backend.html
pub trait Api {
    // Pipeline state operations

    /// Corresponds to `glClear`.
    fn clear(&self, ops: u32);

    /// Corresponds to `glClearColor`.
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);

    /// Corresponds to `glPolygonMode`.
    fn polygon_mode(&self, face: u32, mode: u32);

    /// Corresponds to `glViewport`.
    fn viewport(&self, x: u32, y: u32, w: u32, h: u32);

    // Buffer operations

    /// Corresponds to `glGenBuffers(1)`.
    fn gen_buffer(&self) -> u32;

    /// Corresponds to `glBindBuffer`.
    fn bind_buffer(&self, id: u32, ty: u32);

    /// Corresponds to `glBufferData`.
    fn buffer_data(&self, ty: u32, len: usize, ptr: *const os::raw::c_void, usage: u32);

    /// Corresponds to `glDeleteBuffers(1)`.
    fn delete_buffer(&self, id: u32);

    // Vertex array operations

    /// Corresponds to `glGenVertexArrays(1)`.
    fn gen_vertex_array(&self) -> u32;

    /// Corresponds to `glBindVertexArray`.
    fn bind_vertex_array(&self, id: u32);

    /// Corresponds to `glVertexAttribPointer`.
    fn vertex_attrib_pointer(&self, idx: u8, sz: i32, ty: u32, norm: bool, stride: i32, off: usize);

    /// Corresponds to `glEnableVertexAttribArray`.
    fn enable_vertex_attrib_array(&self, idx: u8);

    /// Corresponds to `glDeleteVertexArrays(1)`.
    fn delete_vertex_array(&self, id: u32);

    // Shader operations

    /// Corresponds to `glCreateShader`.
    fn create_shader(&self, ty: u32) -> u32;

    /// Corresponds to `glShaderSource`.
    fn shader_source(&self, id: u32, source: &ffi::CStr);

    /// Corresponds to `glCompileShader`.
    fn compile_shader(&self, id: u32);

    /// Corresponds to `glGetShaderiv(GL_COMPILE_STATUS)`.
    fn compile_status(&self, id: u32) -> bool;

    /// Corresponds to `glGetShaderInfoLog`.
    fn shader_info_log(&self, id: u32) -> String;

    /// Corresponds to `glDeleteShader`.
    fn delete_shader(&self, id: u32);

    // Program operations

    /// Corresponds to `glCreateProgram`.
    fn create_program(&self) -> u32;

    /// Corresponds to `glAttachShader`.
    fn attach_shader(&self, program: u32, shader: u32);

    /// Corresponds to `glLinkProgram`.
    fn link_program(&self, id: u32);

    /// Corresponds to `glGetProgramiv(GL_LINK_STATUS)`.
    fn link_status(&self, id: u32) -> bool;

    /// Corresponds to `glGetProgramInfoLog`.
    fn program_info_log(&self, id: u32) -> String;

    /// Corresponds to `glIsProgram`.
    fn is_program(&self, id: u32) -> bool;

    /// Corresponds to `glUseProgram`.
    fn use_program(&self, id: u32);

    /// Corresponds to `glDeleteProgram`.
    fn delete_program(&self, id: u32);

    // Uniform operations

    /// Corresponds to `glGetUniformLocation`.
    fn get_uniform_location(&self, id: u32, name: &ffi::CStr) -> i32;

    /// Corresponds to `glUniform1i`.
    fn uniform_1i(&self, location: i32, value: i32);

    /// Corresponds to `glUniform1f`.
    fn uniform_1f(&self, location: i32, value: f32);

    // Draw call operations

    /// Corresponds to `glDrawArrays`.
    fn draw_arrays(&self, mode: u32, offset: usize, count: usize);

    /// Corresponds to `glDrawElements`.
    fn draw_elements(&self, mode: u32, offset: usize, count: usize, ty: u32);

    /// Corresponds to `glReadPixels` with `GL_RGBA` / `GL_UNSIGNED_BYTE`.
    fn read_pixels(&self, x: u32, y: u32, w: u32, h: u32) -> Vec<u8>;
}

/// Function pointers to the OpenGL driver.
#[derive(Clone)]
pub struct Backend {
    gl: rc::Rc<Gl>,
}

impl Backend {
    /// Constructor.
    pub fn load<F>(mut func: F) -> Self
        where F: FnMut(&str) -> *const os::raw::c_void
    {
        let gl = rc::Rc::new(Gl::load_with(|sym| func(sym)));
        Backend { gl }
    }

    // Error checking

    /// Corresponds to `glGetError` plus an error check.
    pub fn check_error(&self) {
        let error = unsafe { self.gl.GetError() };
        if error != 0 {
            error!(target: "gl", "0x{:x}", error);
        }
    }
}

impl Api for Backend {
    fn clear(&self, ops: u32) {
        trace!(target: "gl", "glClear{:?}", (ops,));
        unsafe {
            self.gl.Clear(ops);
        }
        self.check_error();
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        trace!(target: "gl", "glClearColor{:?}", (r, g, b, a));
        unsafe {
            self.gl.ClearColor(r, g, b, a);
        }
        self.check_error();
    }

    fn polygon_mode(&self, face: u32, mode: u32) {
        trace!(target: "gl", "glPolygonMode{:?}", (face, mode));
        unsafe {
            self.gl.PolygonMode(face, mode);
        }
        self.check_error();
    }

    fn viewport(&self, x: u32, y: u32, w: u32, h: u32) {
        trace!(target: "gl", "glViewport{:?}", (x, y, w, h));
        unsafe {
            self.gl.Viewport(x as _, y as _, w as _, h as _);
        }
        self.check_error();
    }

    fn gen_buffer(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenBuffers(1) ");
            self.gl.GenBuffers(1, &mut id as *mut _)
        };
        trace!(target: "gl", " => {}", id);
        self.check_error();
        id
    }

    fn bind_buffer(&self, id: u32, ty: u32) {
        unsafe {
            trace!(target: "gl", "glBindBuffer{:?}", (ty, id));
            self.gl.BindBuffer(ty, id);
        }
        self.check_error();
    }

    fn buffer_data(&self, ty: u32, len: usize, ptr: *const os::raw::c_void, usage: u32) {
        unsafe {
            trace!(target: "gl", "glBufferData{:?}", (ty, len, ptr, usage));
            self.gl.BufferData(ty, len as _, ptr, usage);
        }
        self.check_error();
    }

    fn delete_buffer(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteBuffers{:?}", (1, id));
            self.gl.DeleteBuffers(1, &id as *const _);
        }
        self.check_error();
    }

    fn gen_vertex_array(&self) -> u32 {
        let mut id: u32 = 0;
        unsafe {
            trace!(target: "gl", "glGenVertexArrays(1) ");
            self.gl.GenVertexArrays(1, &mut id as *mut _);
            trace!(target: "gl", "=> {}", id);
        }
        self.check_error();
        id
    }

    fn bind_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glBindVertexArray{:?}", (id,));
            self.gl.BindVertexArray(id);
        }
        self.check_error();
    }

    fn vertex_attrib_pointer(&self, idx: u8, sz: i32, ty: u32, norm: bool, stride: i32, off: usize) {
        unsafe {
            trace!(target: "gl", "glVertexAttribPointer{:?}", (idx, sz, ty, norm, stride, off));
            self.gl.VertexAttribPointer(
                idx as _,
                sz as _,
                ty,
                if norm { TRUE } else { FALSE },
                stride as _,
                off as *const _,
            );
        }
        self.check_error();
    }

    fn enable_vertex_attrib_array(&self, idx: u8) {
        unsafe {
            trace!(target: "gl", "glEnableVertexAttribArray{:?}", (idx,));
            self.gl.EnableVertexAttribArray(idx as _);
        }
        self.check_error();
    }

    fn delete_vertex_array(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteVertexArrays{:?}", (1, id));
            self.gl.DeleteVertexArrays(1, &id as *const _);
        }
        self.check_error();
    }

    fn create_shader(&self, ty: u32) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateShader{:?} ", (ty,));
            self.gl.CreateShader(ty)
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    fn shader_source(&self, id: u32, source: &ffi::CStr) {
        unsafe {
            trace!(target: "gl", "glShaderSource{:?}", (id, source));
            let ptr = source.as_ptr();
            self.gl.ShaderSource(id, 1, &ptr as *const _, ptr::null());
        }
        self.check_error();
    }

    fn compile_shader(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glCompileShader{:?}", (id,));
            self.gl.CompileShader(id);
        }
        self.check_error();
    }

    fn compile_status(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glGetShaderiv{:?} ", (id, COMPILE_STATUS));
            self.gl.GetShaderiv(id, COMPILE_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    fn shader_info_log(&self, id: u32) -> String {
        let mut length = 0i32;
        unsafe {
            trace!(target: "gl", "glGetShaderiv{:?} ", (id, INFO_LOG_LENGTH));
            self.gl.GetShaderiv(id, INFO_LOG_LENGTH, &mut length as *mut _);
        }
        self.check_error();
        let mut log = vec![0u8; length.max(1) as usize];
        let mut written = 0i32;
        unsafe {
            trace!(target: "gl", "glGetShaderInfoLog{:?}", (id, log.len()));
            self.gl.GetShaderInfoLog(
                id,
                log.len() as _,
                &mut written as *mut _,
                log.as_mut_ptr() as *mut _,
            );
        }
        self.check_error();
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).into_owned()
    }

    fn delete_shader(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteShader{:?}", (id,));
            self.gl.DeleteShader(id);
        }
        self.check_error();
    }

    fn create_program(&self) -> u32 {
        let id = unsafe {
            trace!(target: "gl", "glCreateProgram() ");
            self.gl.CreateProgram()
        };
        trace!(target: "gl", "=> {}", id);
        self.check_error();
        id
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        unsafe {
            trace!(target: "gl", "glAttachShader{:?}", (program, shader));
            self.gl.AttachShader(program, shader);
        }
        self.check_error();
    }

    fn link_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glLinkProgram{:?}", (id,));
            self.gl.LinkProgram(id);
        }
        self.check_error();
    }

    fn link_status(&self, id: u32) -> bool {
        let mut status = 0i32;
        unsafe {
            trace!(target: "gl", "glGetProgramiv{:?} ", (id, LINK_STATUS));
            self.gl.GetProgramiv(id, LINK_STATUS, &mut status as *mut _);
            trace!(target: "gl", "=> {}", status);
        }
        self.check_error();
        status != 0
    }

    fn program_info_log(&self, id: u32) -> String {
        let mut length = 0i32;
        unsafe {
            trace!(target: "gl", "glGetProgramiv{:?} ", (id, INFO_LOG_LENGTH));
            self.gl.GetProgramiv(id, INFO_LOG_LENGTH, &mut length as *mut _);
        }
        self.check_error();
        let mut log = vec![0u8; length.max(1) as usize];
        let mut written = 0i32;
        unsafe {
            trace!(target: "gl", "glGetProgramInfoLog{:?}", (id, log.len()));
            self.gl.GetProgramInfoLog(
                id,
                log.len() as _,
                &mut written as *mut _,
                log.as_mut_ptr() as *mut _,
            );
        }
        self.check_error();
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).into_owned()
    }

    fn is_program(&self, id: u32) -> bool {
        let result = unsafe {
            trace!(target: "gl", "glIsProgram{:?} ", (id,));
            self.gl.IsProgram(id)
        };
        trace!(target: "gl", "=> {}", result);
        self.check_error();
        result == TRUE
    }

    fn use_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glUseProgram{:?}", (id,));
            self.gl.UseProgram(id);
        }
        self.check_error();
    }

    fn delete_program(&self, id: u32) {
        unsafe {
            trace!(target: "gl", "glDeleteProgram{:?}", (id,));
            self.gl.DeleteProgram(id);
        }
        self.check_error();
    }

    fn get_uniform_location(&self, id: u32, name: &ffi::CStr) -> i32 {
        let index;
        unsafe {
            trace!(target: "gl", "glGetUniformLocation{:?} ", (id, name));
            index = self.gl.GetUniformLocation(id, name.as_ptr());
            trace!(target: "gl", "=> {}", index);
        }
        self.check_error();
        index
    }

    fn uniform_1i(&self, location: i32, value: i32) {
        unsafe {
            trace!(target: "gl", "glUniform1i{:?}", (location, value));
            self.gl.Uniform1i(location, value);
        }
        self.check_error();
    }

    fn uniform_1f(&self, location: i32, value: f32) {
        unsafe {
            trace!(target: "gl", "glUniform1f{:?}", (location, value));
            self.gl.Uniform1f(location, value);
        }
        self.check_error();
    }

    fn draw_arrays(&self, mode: u32, offset: usize, count: usize) {
        unsafe {
            trace!(target: "gl", "glDrawArrays{:?}", (mode, offset, count));
            self.gl.DrawArrays(mode, offset as _, count as _);
        }
        self.check_error();
    }

    fn draw_elements(&self, mode: u32, offset: usize, count: usize, ty: u32) {
        unsafe {
            trace!(target: "gl", "glDrawElements{:?}", (mode, count, ty, offset));
            self.gl.DrawElements(mode, count as _, ty, offset as *const _);
        }
        self.check_error();
    }

    fn read_pixels(&self, x: u32, y: u32, w: u32, h: u32) -> Vec<u8> {
        let mut pixels = vec![0u8; w as usize * h as usize * 4];
        unsafe {
            trace!(target: "gl", "glReadPixels{:?}", (x, y, w, h, RGBA, UNSIGNED_BYTE));
            self.gl.ReadPixels(
                x as _,
                y as _,
                w as _,
                h as _,
                RGBA,
                UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut _,
            );
        }
        self.check_error();
        pixels
    }
}
