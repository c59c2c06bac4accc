//! Renders the quad once into a hidden window and checks the result.
//!
//! Usage: `cargo run --example readback [output.png]`

extern crate env_logger;
extern crate glutin;
extern crate image;
extern crate log;
extern crate shade;

#[path = "../common.rs"]
mod common;

use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use glutin::event_loop::EventLoop;
use shade::pipeline::{PolygonMode, State, Viewport};
use shade::{mesh, Source, Sources};

/// Largest allowed difference between the covered and the expected fraction
/// of the viewport.
const TOLERANCE: f32 = 0.01;

/// NDC spans `[-1, 1]` on both axes.
const NDC_AREA: f32 = 4.0;

fn is_white(pixel: &[u8]) -> bool {
    pixel[.. 3].iter().all(|&c| c > 200)
}

fn run(output: PathBuf) -> Result<bool, Box<dyn Error>> {
    let settings = common::Settings {
        title: "readback".to_string(),
        visible: false,
        vsync: false,
        ..Default::default()
    };
    let event_loop = EventLoop::new();
    let context = common::open(&settings, &event_loop)?;
    let factory = common::factory(&context);

    let shaders = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/shaders");
    let sources = Sources::new(
        Source::file("quad.vert.glsl"),
        Source::file("solid.frag.glsl"),
    ).with_base_dir(shaders);
    let program = factory.program(&sources)?;
    let quad = mesh::upload(&factory, &mesh::QUAD, Some(&mesh::QUAD_INDICES[..]));

    let size = context.window().inner_size();
    if size.width == 0 || size.height == 0 {
        return Err("window has no drawable area".into());
    }
    let viewport = Viewport::new(size.width, size.height);
    let state = State {
        polygon_mode: PolygonMode::Fill,
        viewport: Some(viewport),
    };
    factory.clear_color(0.0, 0.0, 0.0, 1.0);
    factory.use_program(&program);
    factory.set_bool(&program, "u_white", true);
    factory.draw(&state, &quad.vertex_array, &quad.draw_call, &program);
    let pixels = factory.read_pixels(viewport);

    let total = (viewport.w * viewport.h) as f32;
    let covered = pixels.chunks_exact(4).filter(|pixel| is_white(pixel)).count() as f32;
    let fraction = covered / total;
    let expected = mesh::covered_area(&mesh::QUAD, &mesh::QUAD_INDICES) / NDC_AREA;
    log::info!("covered {:.4} of the viewport, expected {:.4}", fraction, expected);

    let at = |x: u32, y: u32| {
        let i = ((y * viewport.w + x) * 4) as usize;
        &pixels[i .. i + 4]
    };
    let (w, h) = (viewport.w, viewport.h);
    let centre = is_white(at(w / 2, h / 2));
    let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)]
        .iter()
        .all(|&(x, y)| !is_white(at(x, y)));

    let frame = image::RgbaImage::from_raw(w, h, pixels)
        .ok_or("framebuffer size does not match the viewport")?;
    image::imageops::flip_vertical(&frame).save(&output)?;
    log::info!("wrote {}", output.display());

    Ok((fraction - expected).abs() <= TOLERANCE && centre && corners)
}

fn main() {
    common::init_logging();
    let output = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("readback.png"));
    match run(output) {
        Ok(true) => log::info!("quad covers the central quarter"),
        Ok(false) => {
            log::error!("quad coverage mismatch");
            process::exit(1);
        }
        Err(error) => {
            log::error!("{}", error);
            process::exit(2);
        }
    }
}
