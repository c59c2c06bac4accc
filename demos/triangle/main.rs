extern crate env_logger;
extern crate glutin;
extern crate log;
extern crate shade;

#[path = "../common.rs"]
mod common;

use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use shade::{mesh, pipeline, Sources};

const VERTEX_SHADER: &str = "#version 330 core
layout (location = 0) in vec3 aPos;
layout (location = 1) in vec3 aColor;

out vec3 ourColor;

void main() {
    gl_Position = vec4(aPos, 1.0);
    ourColor = aColor;
}
";

const FRAGMENT_SHADER: &str = "#version 330 core
in vec3 ourColor;
out vec4 FragColor;

void main() {
    FragColor = vec4(ourColor, 1.0);
}
";

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

    let program = match factory.program(&Sources::inline(VERTEX_SHADER, FRAGMENT_SHADER)) {
        Ok(program) => program,
        Err(error) => {
            log::error!("{}", error);
            std::process::exit(1);
        }
    };
    let triangle = mesh::upload(&factory, &mesh::TRIANGLE, None);
    let mut state = pipeline::State::default();
    let size = context.window().inner_size();
    state.viewport = Some(pipeline::Viewport::new(size.width, size.height));

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
                    state.viewport = Some(pipeline::Viewport::new(size.width, size.height));
                }
                _ => {}
            },
            Event::MainEventsCleared => context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                let [r, g, b, a] = settings.clear_color;
                factory.clear_color(r, g, b, a);
                factory.draw(&state, &triangle.vertex_array, &triangle.draw_call, &program);
                if let Err(error) = context.swap_buffers() {
                    log::error!("swap failed: {}", error);
                    *control_flow = ControlFlow::Exit;
                }
            }
            _ => {}
        }
    });
}
