//! Window, context and logging setup shared by the demos.

#![allow(dead_code)]

use std::env;
use std::error::Error;

use glutin::dpi::LogicalSize;
use glutin::event_loop::EventLoop;
use glutin::window::WindowBuilder;
use glutin::{ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};

/// Window and context parameters.
#[derive(Clone, Debug)]
pub struct Settings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL version, always with a core profile.
    pub gl_version: (u8, u8),
    pub vsync: bool,
    pub visible: bool,
    pub clear_color: [f32; 4],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "OpenGL Window".to_string(),
            width: 800,
            height: 600,
            gl_version: (3, 3),
            vsync: true,
            visible: true,
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

/// Install `env_logger`, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_logging() {
    let mut builder = env_logger::Builder::new();
    match env::var("RUST_LOG") {
        Ok(filter) => {
            builder.parse_filters(&filter);
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Info);
        }
    }
    let _ = builder.try_init();
    log::debug!("logging initialized");
}

/// Open a window and make its context current on this thread.
pub fn open(
    settings: &Settings,
    event_loop: &EventLoop<()>,
) -> Result<WindowedContext<PossiblyCurrent>, Box<dyn Error>> {
    let window_builder = WindowBuilder::new()
        .with_title(settings.title.clone())
        .with_inner_size(LogicalSize::new(settings.width, settings.height))
        .with_visible(settings.visible);
    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(glutin::Api::OpenGl, settings.gl_version))
        .with_gl_profile(GlProfile::Core)
        .with_vsync(settings.vsync)
        .build_windowed(window_builder, event_loop)?;
    let context = unsafe { context.make_current() }.map_err(|(_, error)| error)?;
    log::info!(
        "opened {}x{} window with OpenGL {}.{} core",
        settings.width,
        settings.height,
        settings.gl_version.0,
        settings.gl_version.1,
    );
    Ok(context)
}

/// Create a factory bound to the context's function pointers.
pub fn factory(context: &WindowedContext<PossiblyCurrent>) -> shade::Factory {
    shade::init(|symbol| context.get_proc_address(symbol) as *const _)
}
