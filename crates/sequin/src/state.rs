//! The owned result of a layout.

use indexmap::IndexMap;

use sequin_core::{geometry::Bounds, identifier::Id};

use crate::{
    LayoutIssue,
    config::LayoutConfig,
    element::{ActorElement, ActorId, SignalElement, SignalId},
    layout::projection,
};

/// Actors, signals and issues of a laid-out diagram.
///
/// Elements are addressed by [`ActorId`] and [`SignalId`], stable indices that
/// never change once placement created the element.
#[derive(Debug, Clone, Default)]
pub struct DiagramState {
    actors: Vec<ActorElement>,
    names: IndexMap<Id, ActorId>,
    signals: Vec<SignalElement>,
    final_offset_y: f32,
    issues: Vec<LayoutIssue>,
}

impl DiagramState {
    /// Actor elements in registry order.
    pub fn actors(&self) -> &[ActorElement] {
        &self.actors
    }

    pub fn signals(&self) -> &[SignalElement] {
        &self.signals
    }

    pub fn actor(&self, id: ActorId) -> Option<&ActorElement> {
        self.actors.get(id.index())
    }

    pub fn signal(&self, id: SignalId) -> Option<&SignalElement> {
        self.signals.get(id.index())
    }

    /// Looks up the element of the actor called `name`.
    pub fn actor_id(&self, name: &str) -> Option<ActorId> {
        self.names.get(&Id::new(name)).copied()
    }

    /// Looks up the element of the actor called `name`.
    pub fn actor_by_name(&self, name: &str) -> Option<&ActorElement> {
        self.actor_id(name).and_then(|id| self.actor(id))
    }

    /// Vertical offset reached after the last signal.
    pub fn final_offset_y(&self) -> f32 {
        self.final_offset_y
    }

    /// Problems found while laying out, in discovery order.
    pub fn issues(&self) -> &[LayoutIssue] {
        &self.issues
    }

    /// Actor ids sorted by the left edge of their top box, ties broken by
    /// registry order.
    pub fn horizontal_order(&self) -> Vec<ActorId> {
        let mut order: Vec<ActorId> = (0..self.actors.len()).map(ActorId::new).collect();
        order.sort_by(|a, b| {
            let a_x = self.actors[a.index()].top_box().min_x();
            let b_x = self.actors[b.index()].top_box().min_x();
            a_x.total_cmp(&b_x).then(a.cmp(b))
        });
        order
    }

    /// Smallest bounds containing every box, line and label.
    pub fn bounds(&self) -> Option<Bounds> {
        let actor_bounds = self.actors.iter().flat_map(|actor| {
            let mut parts = vec![
                actor.top_box(),
                actor.label().bounds(),
                actor.lifeline().bounds(),
            ];
            parts.extend(actor.bottom_box());
            parts.extend(actor.cross().into_iter().flatten().map(|stroke| stroke.bounds()));
            parts
        });
        let signal_bounds = self.signals.iter().flat_map(|signal| {
            let mut parts: Vec<Bounds> = signal
                .shape()
                .segments()
                .into_iter()
                .map(|segment| segment.bounds())
                .collect();
            parts.push(signal.label().bounds());
            parts
        });

        actor_bounds
            .chain(signal_bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    pub(crate) fn actor_mut(&mut self, id: ActorId) -> &mut ActorElement {
        &mut self.actors[id.index()]
    }

    /// Returns the live element of `name`, ignoring destroyed actors.
    pub(crate) fn live_actor(&self, name: Id) -> Option<ActorId> {
        self.names
            .get(&name)
            .copied()
            .filter(|id| !self.actors[id.index()].is_destroyed())
    }

    pub(crate) fn contains_name(&self, name: Id) -> bool {
        self.names.contains_key(&name)
    }

    pub(crate) fn add_actor(&mut self, element: ActorElement) -> ActorId {
        let id = ActorId::new(self.actors.len());
        self.names.insert(element.actor().name(), id);
        self.actors.push(element);
        id
    }

    /// Registers a signal and records it on the actors it connects.
    pub(crate) fn add_signal(&mut self, element: SignalElement) -> SignalId {
        let id = SignalId::new(self.signals.len());
        let (a, b) = (element.actor_a(), element.actor_b());
        if a == b {
            self.actors[a.index()].add_self_signal(id);
        } else {
            self.actors[a.index()].add_outgoing(id);
            self.actors[b.index()].add_incoming(id);
        }
        self.signals.push(element);
        id
    }

    pub(crate) fn set_final_offset_y(&mut self, offset_y: f32) {
        self.final_offset_y = offset_y;
    }

    pub(crate) fn push_issue(&mut self, issue: LayoutIssue) {
        self.issues.push(issue);
    }

    /// Re-projects the given signals onto the current actor geometry.
    pub(crate) fn rebind_signals(
        &mut self,
        ids: impl IntoIterator<Item = SignalId>,
        config: &LayoutConfig,
    ) {
        let Self {
            actors, signals, ..
        } = self;
        for id in ids {
            projection::project(&mut signals[id.index()], actors, config);
        }
    }

    /// Re-projects every signal attached to one of `moved`.
    pub(crate) fn rebind_actors(&mut self, moved: &[ActorId], config: &LayoutConfig) {
        let mut ids: Vec<SignalId> = moved
            .iter()
            .flat_map(|id| self.actors[id.index()].signals())
            .collect();
        ids.sort();
        ids.dedup();
        self.rebind_signals(ids, config);
    }
}
