//! First-draft placement of actors and signals.
//!
//! Placement runs once over the ordered input. Actors get their initial boxes
//! at a fixed pitch, signals are stacked top to bottom at a fixed pitch, actor
//! creations synthesize boxes and deletions end life lines. The result may
//! still contain overlapping labels; adjustment repairs those afterwards.

use std::collections::HashSet;

use log::{debug, info, warn};

use sequin_core::{
    draw::{TextAnchor, TextDefinition, TextMeasure},
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    LayoutIssue,
    config::LayoutConfig,
    element::{ActorElement, ActorId, Label, SignalElement},
    layout::projection,
    model::{Actor, Signal, SignalKind},
    state::DiagramState,
};

/// Builds the first-draft [`DiagramState`] of a diagram.
pub(crate) struct Placement<'a> {
    config: &'a LayoutConfig,
    text: &'a TextDefinition,
    measure: &'a dyn TextMeasure,
    state: DiagramState,
    offset_y: f32,
}

impl<'a> Placement<'a> {
    pub(crate) fn new(
        config: &'a LayoutConfig,
        text: &'a TextDefinition,
        measure: &'a dyn TextMeasure,
    ) -> Self {
        Self {
            config,
            text,
            measure,
            state: DiagramState::default(),
            offset_y: config.signal_pitch(),
        }
    }

    /// Records issues found before placement, such as unreadable input records.
    pub(crate) fn report_all(&mut self, issues: impl IntoIterator<Item = LayoutIssue>) {
        for issue in issues {
            self.report(issue);
        }
    }

    /// Places every actor that exists from the top of the diagram.
    ///
    /// Actors created by a signal are only registered as declared; their box is
    /// synthesized when the creating signal is placed.
    pub(crate) fn place_actors(&mut self, actors: &[Actor]) {
        let mut declared: HashSet<Id> = HashSet::new();
        let mut slot = 0;

        for actor in actors {
            if !declared.insert(actor.name()) {
                self.report(LayoutIssue::DuplicateActor {
                    actor: actor.name().to_string(),
                });
                continue;
            }
            if actor.is_created_by_signal() {
                continue;
            }

            let origin = Point::new(slot as f32 * self.config.actor_pitch(), 0.0);
            let id = self.add_actor(actor.clone(), origin);
            debug!(actor = actor.name().to_string(), id = id.index(); "Actor placed");
            slot += 1;
        }
    }

    /// Places one signal at the current offset.
    ///
    /// `index` is the position of the signal in the input order and is used
    /// to report issues.
    pub(crate) fn place_signal(&mut self, index: usize, signal: &Signal) {
        let y = self.config.actor_height() + self.offset_y;

        let placed = match signal.kind() {
            SignalKind::ActorCreation => self.place_creation(index, signal, y),
            SignalKind::ActorDeletion => self.place_deletion(index, signal, y),
            SignalKind::Simple => self.place_simple(index, signal),
        };

        if placed {
            let pitches = if signal.is_self() && signal.kind() == SignalKind::Simple {
                2.0
            } else {
                1.0
            };
            self.offset_y += pitches * self.config.signal_pitch();
        }
    }

    /// Extends the life lines of every surviving actor to the bottom of the
    /// diagram and returns the finished state.
    pub(crate) fn finish(mut self) -> DiagramState {
        let bottom_y = self.offset_y + self.config.actor_height();
        let height = self.config.actor_height();
        for index in 0..self.state.actors().len() {
            let actor = self.state.actor_mut(ActorId::new(index));
            if !actor.is_destroyed() {
                actor.finish(bottom_y, height);
            }
        }
        self.state.set_final_offset_y(self.offset_y);

        info!(
            actors_count = self.state.actors().len(),
            signals_count = self.state.signals().len(),
            issues_count = self.state.issues().len(),
            final_offset_y = self.offset_y;
            "Placement finished"
        );
        self.state
    }

    fn place_simple(&mut self, index: usize, signal: &Signal) -> bool {
        let Some((a, b)) = self.resolve_pair(index, signal) else {
            return false;
        };
        self.add_signal(index, a, b, signal);
        true
    }

    fn place_creation(&mut self, index: usize, signal: &Signal, y: f32) -> bool {
        let Some(a) = self.resolve(index, signal.actor_a()) else {
            return false;
        };
        let target = signal.actor_b();
        if signal.is_self() || self.state.live_actor(target).is_some() {
            self.report(LayoutIssue::DuplicateCreation {
                signal: index,
                actor: target.to_string(),
            });
            return false;
        }
        // A destroyed name stays dead for the rest of the diagram.
        if self.state.contains_name(target) {
            self.report(LayoutIssue::UnresolvedActor {
                signal: index,
                actor: target.to_string(),
            });
            return false;
        }

        let source_x = self.state.actors()[a.index()].line_x();
        let origin = Point::new(
            source_x + self.config.creation_width(),
            y - self.config.actor_height() / 2.0,
        );
        let actor = Actor::created_by_signal(&signal.actor_b().to_string());
        let b = self.add_actor(actor, origin);
        debug!(
            actor = signal.actor_b().to_string(),
            id = b.index(),
            y;
            "Actor created by signal"
        );

        self.add_signal(index, a, b, signal);
        true
    }

    fn place_deletion(&mut self, index: usize, signal: &Signal, y: f32) -> bool {
        let Some((a, b)) = self.resolve_pair(index, signal) else {
            return false;
        };
        self.add_signal(index, a, b, signal);

        let cross_width = self.config.cross_width();
        self.state.actor_mut(b).destroy(y, cross_width);
        debug!(actor = signal.actor_b().to_string(), y; "Actor destroyed");
        true
    }

    fn add_actor(&mut self, actor: Actor, origin: Point) -> ActorId {
        let top_box = Bounds::new_from_top_left(
            origin,
            Size::new(self.config.actor_width(), self.config.actor_height()),
        );
        let label_size = self
            .measure
            .measure(&actor.name().to_string(), self.text);
        self.state
            .add_actor(ActorElement::new(actor, top_box, label_size))
    }

    fn add_signal(&mut self, index: usize, a: ActorId, b: ActorId, signal: &Signal) {
        let label_size = self.measure.measure(signal.message(), self.text);
        let label = Label::new(signal.message(), label_size, TextAnchor::Start);
        let mut element = SignalElement::new(
            index,
            a,
            b,
            signal.kind(),
            signal.line_type(),
            self.offset_y,
            label,
        );
        projection::project(&mut element, self.state.actors(), self.config);

        let id = self.state.add_signal(element);
        debug!(
            signal = index,
            id = id.index(),
            kind = signal.kind().name(),
            offset_y = self.offset_y;
            "Signal placed"
        );
    }

    fn resolve_pair(&mut self, index: usize, signal: &Signal) -> Option<(ActorId, ActorId)> {
        let a = self.resolve(index, signal.actor_a())?;
        let b = self.resolve(index, signal.actor_b())?;
        Some((a, b))
    }

    fn resolve(&mut self, index: usize, name: Id) -> Option<ActorId> {
        let id = self.state.live_actor(name);
        if id.is_none() {
            self.report(LayoutIssue::UnresolvedActor {
                signal: index,
                actor: name.to_string(),
            });
        }
        id
    }

    fn report(&mut self, issue: LayoutIssue) {
        warn!(issue:% = issue; "Layout issue");
        self.state.push_issue(issue);
    }
}
