//! Projection of a signal onto the current actor geometry.
//!
//! Placement and every re-bind after an adjustment move use the same
//! projection, so a signal's line endpoints and label anchor always follow
//! its actors.

use sequin_core::geometry::{Point, Segment};

use crate::{
    config::LayoutConfig,
    element::{ActorElement, Direction, SignalElement, SignalShape},
    model::SignalKind,
};

/// Recomputes the shape and label position of `signal` from `actors`.
pub(crate) fn project(signal: &mut SignalElement, actors: &[ActorElement], config: &LayoutConfig) {
    let source = &actors[signal.actor_a().index()];
    let target = &actors[signal.actor_b().index()];
    let y = config.actor_height() + signal.offset_y();
    let label_size = signal.label().size();

    let (shape, label_position) = if signal.is_self() {
        let x = source.line_x();
        if signal.kind() == SignalKind::ActorDeletion {
            let label_x = x + config.cross_width() / 2.0 + config.label_offset_x();
            (
                SignalShape::Terminal,
                Point::new(label_x, y - config.label_offset_y()),
            )
        } else {
            let w = config.self_signal_width();
            let h = config.self_signal_height();
            let segments = [
                Segment::horizontal(x, x + w, y),
                Segment::vertical(x + w, y, y + h),
                Segment::horizontal(x + w, x, y + h),
            ];
            (
                SignalShape::SelfLoop { segments },
                Point::new(x + w + config.label_offset_x(), y + h / 2.0),
            )
        }
    } else {
        let from_x = source.line_x();
        let to_x = if signal.kind() == SignalKind::ActorCreation {
            target.top_box().min_x()
        } else {
            target.line_x()
        };

        let (direction, left_x, right_x) = if from_x <= to_x {
            (Direction::Forward, from_x, to_x)
        } else {
            (Direction::Backward, to_x, from_x)
        };

        let label_x = match direction {
            Direction::Forward => left_x + config.label_offset_x(),
            Direction::Backward => right_x - config.label_offset_x() - label_size.width(),
        };

        (
            SignalShape::Straight {
                line: Segment::horizontal(left_x, right_x, y),
                direction,
            },
            Point::new(label_x, y - config.label_offset_y()),
        )
    };

    signal.set_shape(shape);
    signal.label_mut().set_position(label_position);
}
