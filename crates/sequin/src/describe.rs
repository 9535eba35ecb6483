//! Human-readable summary of a diagram state.

use std::fmt;

use sequin_core::geometry::{Bounds, Segment};

use crate::{
    element::{ActorElement, Direction, SignalElement, SignalShape},
    state::DiagramState,
};

/// Displays every actor, signal and issue of a [`DiagramState`].
pub(crate) struct StateDescription<'a> {
    state: &'a DiagramState,
}

impl<'a> StateDescription<'a> {
    pub(crate) fn new(state: &'a DiagramState) -> Self {
        Self { state }
    }

    fn write_actor(&self, f: &mut fmt::Formatter<'_>, actor: &ActorElement) -> fmt::Result {
        write!(
            f,
            "  {}: box {}, life line x={} y={}..{}",
            actor.actor().name(),
            BoundsDisplay(actor.top_box()),
            actor.line_x(),
            actor.lifeline().from().y(),
            actor.lifeline().to().y(),
        )?;
        if let Some(bottom) = actor.bottom_box() {
            write!(f, ", bottom box {}", BoundsDisplay(bottom))?;
        }
        if actor.actor().is_created_by_signal() {
            f.write_str(", created by signal")?;
        }
        if actor.is_destroyed() {
            write!(f, ", destroyed at y={}", actor.lifeline().to().y())?;
        }
        writeln!(
            f,
            ", signals in={} out={} self={}",
            actor.incoming().len(),
            actor.outgoing().len(),
            actor.self_signals().len()
        )
    }

    fn write_signal(&self, f: &mut fmt::Formatter<'_>, signal: &SignalElement) -> fmt::Result {
        let name = |id| {
            self.state
                .actor(id)
                .map(|actor: &ActorElement| actor.actor().name().to_string())
                .unwrap_or_default()
        };

        write!(
            f,
            "  #{} {} {} {} -> {}: ",
            signal.index(),
            signal.kind(),
            signal.line_type(),
            name(signal.actor_a()),
            name(signal.actor_b()),
        )?;
        match signal.shape() {
            SignalShape::Straight { line, direction } => {
                let direction = match direction {
                    Direction::Forward => "forward",
                    Direction::Backward => "backward",
                };
                write!(f, "{direction} line {}", SegmentDisplay(*line))?;
            }
            SignalShape::SelfLoop { segments } => {
                f.write_str("self loop")?;
                for segment in segments {
                    write!(f, " {}", SegmentDisplay(*segment))?;
                }
            }
            SignalShape::Terminal => f.write_str("terminal")?,
        }
        writeln!(
            f,
            ", label {:?} {}",
            signal.label().content(),
            BoundsDisplay(signal.label().bounds())
        )
    }
}

impl fmt::Display for StateDescription<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Diagram: {} actors, {} signals, final offset {}",
            self.state.actors().len(),
            self.state.signals().len(),
            self.state.final_offset_y()
        )?;

        writeln!(f, "Actors:")?;
        for id in self.state.horizontal_order() {
            if let Some(actor) = self.state.actor(id) {
                self.write_actor(f, actor)?;
            }
        }

        writeln!(f, "Signals:")?;
        for signal in self.state.signals() {
            self.write_signal(f, signal)?;
        }

        if !self.state.issues().is_empty() {
            writeln!(f, "Issues:")?;
            for issue in self.state.issues() {
                writeln!(f, "  {issue}")?;
            }
        }
        Ok(())
    }
}

struct BoundsDisplay(Bounds);

impl fmt::Display for BoundsDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}, {:.1}x{:.1})",
            self.0.min_x(),
            self.0.min_y(),
            self.0.width(),
            self.0.height()
        )
    }
}

struct SegmentDisplay(Segment);

impl fmt::Display for SegmentDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1})->({:.1}, {:.1})",
            self.0.from().x(),
            self.0.from().y(),
            self.0.to().x(),
            self.0.to().y()
        )
    }
}
