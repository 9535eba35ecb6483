//! Integration tests for the LayoutEngine API
//!
//! These tests cover input documents, configuration files, state descriptions
//! and SVG output.

use std::{fs, io::Write};

use sequin::{
    DiagramState, LayoutEngine, LayoutIssue, SequinError,
    config::AppConfig,
    draw::{EstimatedTextMeasure, Surface, SvgSurface, TextDefinition},
    model::{Actor, Signal},
};

const DOCUMENT: &str = r#"
[[actors]]
name = "Browser"

[[actors]]
name = "Server"

[[actors]]
name = "Worker"
created_by_signal = true

[[signals]]
from = "Browser"
to = "Server"
message = "POST /jobs"

[[signals]]
from = "Server"
to = "Worker"
message = "spawn"
kind = "actor_creation"

[[signals]]
from = "Worker"
to = "Worker"
message = "crunch numbers"

[[signals]]
from = "Server"
to = "Browser"
message = "202 Accepted"
line = "response"

[[signals]]
from = "Server"
to = "Worker"
message = "stop"
kind = "actor_deletion"

[[signals]]
from = "Server"
to = "Browser"
message = "done"
kind = "teleport"
"#;

fn estimated_engine() -> LayoutEngine {
    let config = AppConfig::from_toml_str("[text]\nmeasurement = \"estimated\"")
        .expect("Failed to parse config");
    LayoutEngine::new(config)
}

fn document_state(engine: &LayoutEngine) -> DiagramState {
    engine
        .layout_document(DOCUMENT)
        .expect("Failed to lay out document")
}

#[test]
fn test_engine_api_exists() {
    let engine = LayoutEngine::default();
    assert_eq!(engine.config(), &AppConfig::default());
}

#[test]
fn test_layout_document() {
    let engine = estimated_engine();
    let state = document_state(&engine);

    assert_eq!(state.actors().len(), 3);
    assert_eq!(state.signals().len(), 5);
    assert!(state.actor_by_name("Worker").unwrap().is_destroyed());
    assert_eq!(
        state.issues(),
        &[LayoutIssue::UnknownSignalKind {
            signal: 5,
            kind: "teleport".to_string()
        }]
    );
}

#[test]
fn test_layout_document_is_adjusted() {
    let engine = estimated_engine();
    let state = document_state(&engine);

    for signal in state.signals() {
        let label = signal.label().bounds();
        for actor in state.actors() {
            assert!(
                !label.straddles_x(actor.line_x()),
                "label {:?} straddles {}",
                signal.label().content(),
                actor.actor().name()
            );
        }
    }
}

#[test]
fn test_malformed_document() {
    let engine = estimated_engine();
    let result = engine.layout_document("[[actors]]\nname = ");
    assert!(matches!(result, Err(SequinError::Input(_))));
}

#[test]
fn test_describe_state() {
    let engine = estimated_engine();
    let state = document_state(&engine);
    let description = engine.describe_state(&state);

    assert!(description.contains("Browser"));
    assert!(description.contains("Worker"));
    assert!(description.contains("created by signal"));
    assert!(description.contains("self loop"));
    assert!(description.contains("unknown kind `teleport`"));
}

#[test]
fn test_render_svg() {
    let engine = estimated_engine();
    let state = document_state(&engine);
    let svg = engine.render_svg(&state).expect("Failed to render");

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    assert!(svg.contains("POST /jobs"));
    assert!(svg.contains("marker-end"));
    assert!(svg.contains("marker-start"));
    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn test_render_empty_state_is_export_error() {
    let engine = estimated_engine();
    let state = engine.layout(&[], &[]);
    assert!(matches!(
        engine.render_svg(&state),
        Err(SequinError::Export(_))
    ));
}

#[test]
fn test_write_svg() {
    let engine = estimated_engine();
    let state = engine.layout(
        &[Actor::new("A"), Actor::new("B")],
        &[Signal::new("A", "B", "hello")],
    );

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("diagram.svg");
    engine.write_svg(&state, &path).expect("Failed to write SVG");

    let content = fs::read_to_string(&path).expect("Failed to read SVG");
    assert!(content.contains("<svg"));
    assert!(content.contains("hello"));
}

#[test]
fn test_write_svg_to_missing_directory_is_io_error() {
    let engine = estimated_engine();
    let state = engine.layout(&[Actor::new("A")], &[]);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let result = engine.write_svg(&state, dir.path().join("missing").join("out.svg"));
    assert!(matches!(result, Err(SequinError::Io(_))));
}

#[test]
fn test_render_on_svg_surface_matches_state() {
    let engine = estimated_engine();
    let mut state = engine.layout(
        &[Actor::new("A"), Actor::new("B")],
        &[Signal::new("A", "B", "ping")],
    );
    engine.adjust(&mut state);

    let mut surface = SvgSurface::new(TextDefinition::new(), Box::new(EstimatedTextMeasure));
    engine.render(&state, &mut surface);

    let drawn = surface.content_bounds().expect("Surface should not be empty");
    let expected = state.bounds().expect("State should not be empty");
    assert_eq!(drawn.min_x(), expected.min_x());
    assert_eq!(drawn.max_x(), expected.max_x());
    assert_eq!(drawn.max_y(), expected.max_y());
}

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    writeln!(
        file,
        "[layout]\nactor_pitch = 300\n\n[text]\nmeasurement = \"estimated\""
    )
    .expect("Failed to write config");

    let config = AppConfig::load(file.path()).expect("Failed to load config");
    let engine = LayoutEngine::new(config);
    let state = engine.layout(&[Actor::new("A"), Actor::new("B")], &[]);

    assert_eq!(state.actor_by_name("B").unwrap().top_box().min_x(), 300.0);
}

#[test]
fn test_engine_reusability() {
    let engine = estimated_engine();

    let first = engine.layout(&[Actor::new("A")], &[]);
    let second = engine.layout(&[Actor::new("X"), Actor::new("Y")], &[]);

    assert_eq!(first.actors().len(), 1);
    assert_eq!(second.actors().len(), 2);
    assert!(second.actor_id("A").is_none());
}

#[test]
fn test_surface_trait_is_object_safe() {
    let mut surface = SvgSurface::new(TextDefinition::new(), Box::new(EstimatedTextMeasure));
    let dynamic: &mut dyn Surface = &mut surface;
    let handle = dynamic.draw_cross(sequin::geometry::Point::new(0.0, 0.0), 10.0);
    assert_ne!(handle.0, handle.1);
}
