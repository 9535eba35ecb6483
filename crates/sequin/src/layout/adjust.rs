//! Auto-adjustment of a placed diagram.
//!
//! Adjustment relaxes the first-draft layout into one where every actor box
//! fits its name, adjacent boxes keep the minimum gap, and no signal label
//! straddles a life line. It only ever moves actors to the right, and every
//! move shifts a whole suffix of the horizontal order, so actors are never
//! reordered.
//!
//! # Sweeps
//!
//! A sweep walks the actors sorted by the left edge of their box:
//!
//! 1. **Resize** boxes narrower than their label plus padding.
//! 2. **Respace** consecutive boxes closer than the minimum gap.
//! 3. **De-overlap** every signal label from the life lines it straddles.
//!
//! Signals attached to moved actors are re-projected after every individual
//! move. Sweeps repeat until one changes nothing or the configured limit is
//! reached.

use log::{debug, info, warn};

use crate::{
    config::LayoutConfig,
    element::{ActorId, Direction, SignalId, SignalShape},
    model::SignalKind,
    state::DiagramState,
};

/// Geometry changes smaller than this are treated as no change.
const EPSILON: f32 = 1e-3;

/// Summary of an adjustment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AdjustOutcome {
    pub sweeps: usize,
    pub converged: bool,
}

/// Adjusts `state` in place until it reaches a fixed point.
pub(crate) fn adjust(state: &mut DiagramState, config: &LayoutConfig) -> AdjustOutcome {
    info!(actors_count = state.actors().len(); "Adjusting layout");

    for sweep in 1..=config.max_sweeps() {
        if !run_sweep(state, config) {
            info!(sweeps = sweep; "Layout adjusted");
            return AdjustOutcome {
                sweeps: sweep,
                converged: true,
            };
        }
        debug!(sweep; "Sweep moved actors");
    }

    warn!(
        max_sweeps = config.max_sweeps();
        "Adjustment stopped before reaching a fixed point"
    );
    AdjustOutcome {
        sweeps: config.max_sweeps(),
        converged: false,
    }
}

/// Runs one sweep and returns `true` if any geometry changed.
fn run_sweep(state: &mut DiagramState, config: &LayoutConfig) -> bool {
    // Resizing keeps left edges and shifts move whole suffixes, so the order
    // stays valid for the whole sweep.
    let order = state.horizontal_order();

    let mut changed = false;
    for &id in &order {
        changed |= resize(state, id, config);
    }
    changed |= respace(state, &order, config);
    changed |= deoverlap(state, &order, config);
    changed
}

fn resize(state: &mut DiagramState, id: ActorId, config: &LayoutConfig) -> bool {
    let actor = &state.actors()[id.index()];
    let required = actor.label().size().width() + 2.0 * config.actor_padding();
    let current = actor.top_box().width();
    if current + EPSILON >= required {
        return false;
    }

    debug!(
        actor = actor.actor().name().to_string(),
        from = current,
        to = required;
        "Actor box resized"
    );
    state.actor_mut(id).resize(required);
    state.rebind_actors(&[id], config);
    true
}

fn respace(state: &mut DiagramState, order: &[ActorId], config: &LayoutConfig) -> bool {
    let mut changed = false;
    for position in 1..order.len() {
        let left = state.actors()[order[position - 1].index()].top_box();
        let right = state.actors()[order[position].index()].top_box();
        let deficit = config.min_gap() - (right.min_x() - left.max_x());
        if deficit > EPSILON {
            shift_suffix(state, order, position, deficit, config);
            changed = true;
        }
    }
    changed
}

fn deoverlap(state: &mut DiagramState, order: &[ActorId], config: &LayoutConfig) -> bool {
    let mut checked = vec![false; state.signals().len()];
    let mut changed = false;

    for &id in order {
        let signals: Vec<SignalId> = state.actors()[id.index()].signals().collect();
        for signal in signals {
            if std::mem::replace(&mut checked[signal.index()], true) {
                continue;
            }
            if let Some((position, dx)) = label_conflict(state, order, signal, config) {
                shift_suffix(state, order, position, dx, config);
                changed = true;
            }
        }
    }
    changed
}

/// Finds the shift that moves the label of `signal` clear of the life lines it
/// straddles.
///
/// Returns the position in `order` where the shifted suffix starts, and the
/// shift distance.
fn label_conflict(
    state: &DiagramState,
    order: &[ActorId],
    signal: SignalId,
    config: &LayoutConfig,
) -> Option<(usize, f32)> {
    let element = &state.signals()[signal.index()];
    let label = element.label().bounds();
    let anchor = order.iter().position(|&id| id == element.actor_a())?;
    let padding = config.signal_padding();

    let right_anchored = matches!(
        element.shape(),
        SignalShape::Straight {
            direction: Direction::Backward,
            ..
        }
    );

    if right_anchored {
        // The label ends left of its anchor line: push the anchor and
        // everything after it past the furthest straddled line.
        let furthest = order[..anchor]
            .iter()
            .map(|&id| state.actors()[id.index()].line_x())
            .filter(|&x| label.straddles_x(x))
            .max_by(f32::total_cmp)?;
        let dx = furthest - label.min_x() + padding;
        (dx > EPSILON).then_some((anchor, dx))
    } else {
        // The label starts right of its anchor line: push the nearest
        // straddled obstacle and everything after it past the label end.
        let (position, obstacle) = order
            .iter()
            .enumerate()
            .skip(anchor + 1)
            .map(|(position, &id)| {
                let actor = &state.actors()[id.index()];
                let obstacle = if element.kind() == SignalKind::ActorCreation
                    && id == element.actor_b()
                {
                    actor.top_box().min_x()
                } else {
                    actor.line_x()
                };
                (position, obstacle)
            })
            .filter(|&(_, x)| label.straddles_x(x))
            .min_by(|a, b| a.1.total_cmp(&b.1))?;
        let dx = label.max_x() - obstacle + padding;
        (dx > EPSILON).then_some((position, dx))
    }
}

/// Shifts every actor from `position` onwards in `order` right by `dx` and
/// re-binds their signals.
fn shift_suffix(
    state: &mut DiagramState,
    order: &[ActorId],
    position: usize,
    dx: f32,
    config: &LayoutConfig,
) {
    let moved = &order[position..];
    for &id in moved {
        state.actor_mut(id).translate_x(dx);
    }
    debug!(
        from_actor = moved.first().map(|id| id.index()).unwrap_or_default(),
        moved_count = moved.len(),
        dx;
        "Actors shifted right"
    );
    state.rebind_actors(moved, config);
}
