extern crate shade;
extern crate tempfile;

use std::fs;

use shade::{Error, Source, Sources, Stage};

const VERTEX: &str = "#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos, 1.0);
}
";

#[test]
fn file_sources_are_read_verbatim_from_the_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("first_shader.vert.glsl"), VERTEX).unwrap();
    fs::write(dir.path().join("first_shader.frag.glsl"), "void main() {}\n").unwrap();

    let sources = Sources::files("first_shader.vert.glsl", "first_shader.frag.glsl")
        .with_base_dir(dir.path());
    assert_eq!(sources.load(Stage::Vertex).unwrap(), VERTEX);
    assert_eq!(sources.load(Stage::Fragment).unwrap(), "void main() {}\n");
}

#[test]
fn inline_and_file_sources_mix() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solid.frag");
    fs::write(&path, "out vec4 FragColor;").unwrap();

    // Absolute paths win over the base directory.
    let sources = Sources::new(Source::inline(VERTEX), Source::file(&path))
        .with_base_dir("unused");
    assert_eq!(sources.load(Stage::Vertex).unwrap(), VERTEX);
    assert_eq!(sources.load(Stage::Fragment).unwrap(), "out vec4 FragColor;");
}

#[test]
fn missing_file_is_a_read_error_for_that_stage() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("present.vert"), VERTEX).unwrap();

    let sources = Sources::files("present.vert", "absent.frag").with_base_dir(dir.path());
    assert!(sources.load(Stage::Vertex).is_ok());
    let error = sources.load(Stage::Fragment).unwrap_err();
    assert_eq!(error.stage(), Some(Stage::Fragment));
    match error {
        Error::Read { path, source, .. } => {
            assert_eq!(path, dir.path().join("absent.frag"));
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn demo_shaders_ship_with_the_crate() {
    let sources = Sources::files("quad.vert.glsl", "quad.frag.glsl")
        .with_base_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/demos/shaders"));
    let vertex = sources.load(Stage::Vertex).unwrap();
    let fragment = sources.load(Stage::Fragment).unwrap();
    assert!(vertex.contains("void main"));
    assert!(fragment.contains("uniform float u_green;"));
}
