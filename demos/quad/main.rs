extern crate env_logger;
extern crate glutin;
extern crate log;
extern crate shade;

#[path = "../common.rs"]
mod common;

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use shade::pipeline::{PolygonMode, State, Viewport};
use shade::{mesh, Sources};

/// Overrides the directory the shader files are read from.
const SHADER_DIR_VAR: &str = "SHADE_SHADER_DIR";

fn shader_dir() -> PathBuf {
    match env::var_os(SHADER_DIR_VAR) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/shaders"),
    }
}

fn main() {
    common::init_logging();

    let settings = common::Settings::default();
    let event_loop = EventLoop::new();
    let context = match common::open(&settings, &event_loop) {
        Ok(context) => context,
        Err(error) => {
            log::error!("failed to create window: {}", error);
            std::process::exit(1);
        }
    };
    let factory = common::factory(&context);

    let sources = Sources::files("quad.vert.glsl", "quad.frag.glsl").with_base_dir(shader_dir());
    let program = match factory.program(&sources) {
        Ok(program) => program,
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    };
    let quad = mesh::upload(&factory, &mesh::QUAD, Some(&mesh::QUAD_INDICES[..]));
    let size = context.window().inner_size();
    let mut state = State {
        polygon_mode: PolygonMode::Line,
        viewport: Some(Viewport::new(size.width, size.height)),
    };
    let start = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::KeyboardInput {
                    input: KeyboardInput {
                        state: ElementState::Pressed,
                        virtual_keycode: Some(VirtualKeyCode::Escape),
                        ..
                    },
                    ..
                } => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    context.resize(size);
                    state.viewport = Some(Viewport::new(size.width, size.height));
                }
                _ => {}
            },
            Event::MainEventsCleared => context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                let [r, g, b, a] = settings.clear_color;
                factory.clear_color(r, g, b, a);

                let time = start.elapsed().as_secs_f32();
                factory.use_program(&program);
                factory.set_float(&program, "u_green", time.sin() / 2.0 + 0.5);
                factory.draw(&state, &quad.vertex_array, &quad.draw_call, &program);

                if let Err(error) = context.swap_buffers() {
                    log::error!("swap failed: {}", error);
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::LoopDestroyed => log::info!("shutting down"),
            _ => {}
        }
    });
}
