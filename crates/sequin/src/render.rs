//! Projection of a diagram state onto a drawing surface.

use log::debug;

use sequin_core::draw::{LineOptions, RenderLayer, Surface, TextOptions};

use crate::{
    element::{ActorElement, Direction, SignalElement, SignalShape},
    state::DiagramState,
};

/// Draws every actor and signal of `state` on `surface`.
pub(crate) fn render<S: Surface>(state: &DiagramState, surface: &mut S) {
    for actor in state.actors() {
        draw_actor(actor, surface);
    }
    for signal in state.signals() {
        draw_signal(signal, surface);
    }
    debug!(
        actors_count = state.actors().len(),
        signals_count = state.signals().len();
        "Diagram drawn on surface"
    );
}

fn draw_actor<S: Surface>(actor: &ActorElement, surface: &mut S) {
    let lifeline = actor.lifeline();
    surface.draw_line(
        lifeline.from(),
        lifeline.to(),
        LineOptions::new().with_layer(RenderLayer::Lifeline),
    );

    let name = actor.label().content();
    surface.draw_rect(actor.top_box());
    surface.draw_text(actor.label().position(), name, TextOptions::centered());

    if let Some(bottom) = actor.bottom_box() {
        surface.draw_rect(bottom);
        surface.draw_text(bottom.center(), name, TextOptions::centered());
    }

    if let Some([first, _]) = actor.cross() {
        let bounds = first.bounds();
        surface.draw_cross(bounds.center(), bounds.width());
    }
}

fn draw_signal<S: Surface>(signal: &SignalElement, surface: &mut S) {
    let dashed = signal.is_dashed();
    let base = if dashed {
        LineOptions::new().with_dashed()
    } else {
        LineOptions::new()
    };

    match signal.shape() {
        SignalShape::Straight { line, direction } => {
            let options = match direction {
                Direction::Forward => base.with_end_marker(),
                Direction::Backward => base.with_start_marker(),
            };
            surface.draw_line(line.from(), line.to(), options);
        }
        SignalShape::SelfLoop { segments } => {
            let [first, second, last] = segments;
            surface.draw_line(first.from(), first.to(), base);
            surface.draw_line(second.from(), second.to(), base);
            surface.draw_line(last.from(), last.to(), base.with_end_marker());
        }
        SignalShape::Terminal => {}
    }

    let label = signal.label();
    if !label.content().is_empty() {
        surface.draw_text(label.position(), label.content(), TextOptions::new());
    }
}

#[cfg(test)]
mod tests {
    use sequin_core::{
        draw::{Handle, TextAnchor},
        geometry::{Bounds, Point},
    };

    use super::*;
    use crate::{
        config::LayoutConfig,
        layout::placement::Placement,
        model::{Actor, LineType, Signal, SignalKind},
    };

    #[derive(Debug, PartialEq)]
    enum Call {
        Rect(Bounds),
        Text(Point, String, TextAnchor),
        Line(Point, Point, LineOptions),
        Cross(Point, f32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<Call>,
    }

    impl RecordingSurface {
        fn record(&mut self, call: Call) -> Handle {
            self.calls.push(call);
            Handle::new(self.calls.len() - 1)
        }

        fn lines(&self) -> Vec<&LineOptions> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Line(_, _, options) => Some(options),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn draw_rect(&mut self, bounds: Bounds) -> Handle {
            self.record(Call::Rect(bounds))
        }

        fn draw_text(&mut self, position: Point, text: &str, options: TextOptions) -> Handle {
            self.record(Call::Text(position, text.to_string(), options.anchor()))
        }

        fn draw_line(&mut self, from: Point, to: Point, options: LineOptions) -> Handle {
            self.record(Call::Line(from, to, options))
        }

        fn draw_cross(&mut self, center: Point, width: f32) -> (Handle, Handle) {
            let handle = self.record(Call::Cross(center, width));
            (handle, handle)
        }

        fn bounding_box(&self, _handle: Handle) -> Option<Bounds> {
            None
        }

        fn translate(&mut self, _handles: &[Handle], _dx: f32) {}

        fn extend(&mut self, _handle: Handle, _x1: f32, _x2: f32) {}
    }

    fn draw(actors: &[Actor], signals: &[Signal]) -> RecordingSurface {
        let config = LayoutConfig::default();
        let text = sequin_core::draw::TextDefinition::new();
        let mut placement = Placement::new(
            &config,
            &text,
            &sequin_core::draw::EstimatedTextMeasure,
        );
        placement.place_actors(actors);
        for (index, signal) in signals.iter().enumerate() {
            placement.place_signal(index, signal);
        }
        let state = placement.finish();

        let mut surface = RecordingSurface::default();
        render(&state, &mut surface);
        surface
    }

    #[test]
    fn test_actor_primitives() {
        let surface = draw(&[Actor::new("A")], &[]);

        assert_eq!(surface.calls.len(), 5);
        assert!(matches!(surface.calls[0], Call::Line(..)));
        assert!(
            matches!(&surface.calls[2], Call::Text(_, name, TextAnchor::Middle) if name == "A")
        );
        assert!(matches!(surface.calls[3], Call::Rect(_)));
    }

    #[test]
    fn test_markers_and_dashes() {
        let surface = draw(
            &[Actor::new("A"), Actor::new("B")],
            &[
                Signal::new("A", "B", "call"),
                Signal::new("B", "A", "return").with_line_type(LineType::Response),
                Signal::new("A", "A", "loop"),
            ],
        );

        // Two life lines, then the signal lines.
        let lines = surface.lines();
        assert_eq!(lines.len(), 2 + 1 + 1 + 3);
        assert_eq!(*lines[2], LineOptions::new().with_end_marker());
        assert_eq!(
            *lines[3],
            LineOptions::new().with_start_marker().with_dashed()
        );
        assert_eq!(*lines[4], LineOptions::new());
        assert_eq!(*lines[5], LineOptions::new());
        assert_eq!(*lines[6], LineOptions::new().with_end_marker());
    }

    #[test]
    fn test_line_layers() {
        let surface = draw(
            &[Actor::new("A"), Actor::new("B")],
            &[Signal::new("A", "A", "loop")],
        );

        let layers: Vec<RenderLayer> = surface
            .lines()
            .iter()
            .map(|options| options.layer())
            .collect();
        assert_eq!(
            layers,
            vec![
                RenderLayer::Lifeline,
                RenderLayer::Lifeline,
                RenderLayer::Arrow,
                RenderLayer::Arrow,
                RenderLayer::Arrow,
            ]
        );
    }

    #[test]
    fn test_destroyed_actor_gets_cross_and_no_bottom_box() {
        let surface = draw(
            &[Actor::new("A"), Actor::new("B")],
            &[Signal::new("A", "B", "kill").with_kind(SignalKind::ActorDeletion)],
        );

        let crosses: Vec<&Call> = surface
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Cross(..)))
            .collect();
        assert_eq!(crosses, vec![&Call::Cross(Point::new(250.0, 100.0), 20.0)]);

        let rects = surface
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Rect(_)))
            .count();
        assert_eq!(rects, 3);
    }
}
