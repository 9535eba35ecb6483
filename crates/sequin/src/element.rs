//! Drawn projections of actors and signals.
//!
//! Elements hold their geometry explicitly. Placement creates them once and
//! adjustment only mutates their geometry, never which actors a signal
//! connects.
//!
//! # Overview
//!
//! - [`ActorElement`] - Top box, life line, optional bottom box and
//!   destruction cross of an actor, plus the signals attached to it.
//! - [`SignalElement`] - Line, self loop or terminal shape of a signal, plus
//!   its label.
//! - [`Label`] - A measured text with its anchor point.
//! - [`ActorId`] / [`SignalId`] - Stable indices into a
//!   [`DiagramState`](crate::DiagramState).

use std::fmt;

use sequin_core::{
    draw::TextAnchor,
    geometry::{Bounds, Point, Segment, Size},
};

use crate::model::{Actor, LineType, SignalKind};

/// Stable index of an actor element in its diagram state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(usize);

impl ActorId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable index of a signal element in its diagram state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignalId(usize);

impl SignalId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A measured text placed at an anchor point.
///
/// For [`TextAnchor::Start`] the position is the left end of the baseline; for
/// [`TextAnchor::Middle`] it is the center of the text.
///
/// # Examples
///
/// ```
/// # use sequin::element::Label;
/// # use sequin_core::{draw::TextAnchor, geometry::{Point, Size}};
/// let label = Label::new("ping", Size::new(40.0, 20.0), TextAnchor::Start)
///     .with_position(Point::new(55.0, 95.0));
///
/// let bounds = label.bounds();
/// assert_eq!(bounds.min_x(), 55.0);
/// assert_eq!(bounds.max_x(), 95.0);
/// assert_eq!(bounds.min_y(), 75.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    content: String,
    position: Point,
    size: Size,
    anchor: TextAnchor,
}

impl Label {
    pub fn new(content: impl Into<String>, size: Size, anchor: TextAnchor) -> Self {
        Self {
            content: content.into(),
            position: Point::default(),
            size,
            anchor,
        }
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Returns the box the rendered text occupies.
    pub fn bounds(&self) -> Bounds {
        match self.anchor {
            TextAnchor::Start => Bounds::new_from_top_left(
                Point::new(
                    self.position.x(),
                    self.position.y() - self.size.height(),
                ),
                self.size,
            ),
            TextAnchor::Middle => Bounds::new_from_center(self.position, self.size),
        }
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn translate_x(&mut self, dx: f32) {
        self.position = self.position.translate_x(dx);
    }
}

/// The drawn projection of an [`Actor`].
///
/// The life line always runs at the horizontal center of the top box; every
/// geometry change re-anchors the life line, the bottom box and the
/// destruction cross together.
#[derive(Debug, Clone)]
pub struct ActorElement {
    actor: Actor,
    top_box: Bounds,
    label: Label,
    bottom_box: Option<Bounds>,
    lifeline: Segment,
    cross: Option<[Segment; 2]>,
    incoming: Vec<SignalId>,
    outgoing: Vec<SignalId>,
    self_signals: Vec<SignalId>,
}

impl ActorElement {
    /// Creates an element whose life line starts, still empty, at the bottom
    /// of `top_box`.
    pub(crate) fn new(actor: Actor, top_box: Bounds, label_size: Size) -> Self {
        let center = top_box.center();
        let label = Label::new(actor.name().to_string(), label_size, TextAnchor::Middle)
            .with_position(center);
        let lifeline = Segment::vertical(center.x(), top_box.max_y(), top_box.max_y());

        Self {
            actor,
            top_box,
            label,
            bottom_box: None,
            lifeline,
            cross: None,
            incoming: Vec::new(),
            outgoing: Vec::new(),
            self_signals: Vec::new(),
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn top_box(&self) -> Bounds {
        self.top_box
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Bottom box, present only for actors alive at the end of the diagram.
    pub fn bottom_box(&self) -> Option<Bounds> {
        self.bottom_box
    }

    pub fn lifeline(&self) -> Segment {
        self.lifeline
    }

    /// The two strokes of the destruction cross, if the actor was destroyed.
    pub fn cross(&self) -> Option<[Segment; 2]> {
        self.cross
    }

    /// The x-coordinate of the life line.
    pub fn line_x(&self) -> f32 {
        self.lifeline.from().x()
    }

    pub fn is_destroyed(&self) -> bool {
        self.actor.is_destroyed()
    }

    pub fn incoming(&self) -> &[SignalId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[SignalId] {
        &self.outgoing
    }

    pub fn self_signals(&self) -> &[SignalId] {
        &self.self_signals
    }

    /// All attached signals: incoming, then outgoing, then self-signals.
    pub fn signals(&self) -> impl Iterator<Item = SignalId> + '_ {
        self.incoming
            .iter()
            .chain(&self.outgoing)
            .chain(&self.self_signals)
            .copied()
    }

    pub(crate) fn add_incoming(&mut self, id: SignalId) {
        self.incoming.push(id);
    }

    pub(crate) fn add_outgoing(&mut self, id: SignalId) {
        self.outgoing.push(id);
    }

    pub(crate) fn add_self_signal(&mut self, id: SignalId) {
        self.self_signals.push(id);
    }

    /// Rigidly shifts every part of the actor horizontally.
    pub(crate) fn translate_x(&mut self, dx: f32) {
        self.top_box = self.top_box.translate_x(dx);
        self.label.translate_x(dx);
        self.bottom_box = self.bottom_box.map(|bottom| bottom.translate_x(dx));
        self.lifeline = self.lifeline.translate_x(dx);
        self.cross = self
            .cross
            .map(|strokes| strokes.map(|stroke| stroke.translate_x(dx)));
    }

    /// Grows or shrinks the boxes to `width`, keeping their left edge, and
    /// recenters everything hanging from the top box.
    pub(crate) fn resize(&mut self, width: f32) {
        let old_x = self.line_x();
        self.top_box = self.top_box.with_width(width);
        self.bottom_box = self.bottom_box.map(|bottom| bottom.with_width(width));

        let dx = self.top_box.center().x() - old_x;
        self.label.translate_x(dx);
        self.lifeline = self.lifeline.translate_x(dx);
        self.cross = self
            .cross
            .map(|strokes| strokes.map(|stroke| stroke.translate_x(dx)));
    }

    /// Ends the life line at `y` and marks it with a cross of `width`.
    pub(crate) fn destroy(&mut self, y: f32, width: f32) {
        let x = self.line_x();
        let half = width / 2.0;

        self.lifeline = Segment::vertical(x, self.lifeline.from().y(), y);
        self.cross = Some([
            Segment::new(
                Point::new(x - half, y - half),
                Point::new(x + half, y + half),
            ),
            Segment::new(
                Point::new(x - half, y + half),
                Point::new(x + half, y - half),
            ),
        ]);
        self.actor.mark_destroyed();
    }

    /// Extends the life line down to `y` and places a bottom box there.
    pub(crate) fn finish(&mut self, y: f32, height: f32) {
        self.lifeline = Segment::vertical(self.line_x(), self.lifeline.from().y(), y);
        self.bottom_box = Some(Bounds::new_from_top_left(
            Point::new(self.top_box.min_x(), y),
            Size::new(self.top_box.width(), height),
        ));
    }
}

/// Horizontal direction of a straight signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Source left of destination; the arrow head is at the line end.
    Forward,
    /// Source right of destination; the arrow head is at the line start.
    Backward,
}

/// Geometry of a drawn signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalShape {
    /// One line, always stored left to right.
    Straight { line: Segment, direction: Direction },
    /// Three connected segments leaving and re-entering the same life line.
    /// Only the last one carries an arrow head.
    SelfLoop { segments: [Segment; 3] },
    /// No line: the signal is only a label next to a destruction cross.
    Terminal,
}

impl SignalShape {
    /// Returns every drawn segment of the shape.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Self::Straight { line, .. } => vec![*line],
            Self::SelfLoop { segments } => segments.to_vec(),
            Self::Terminal => Vec::new(),
        }
    }
}

/// The drawn projection of a [`Signal`](crate::model::Signal).
#[derive(Debug, Clone)]
pub struct SignalElement {
    index: usize,
    actor_a: ActorId,
    actor_b: ActorId,
    kind: SignalKind,
    line_type: LineType,
    offset_y: f32,
    shape: SignalShape,
    label: Label,
}

impl SignalElement {
    /// Creates an element with a label of the given measured size. The shape
    /// and label position are filled in when the signal is projected onto
    /// its actors.
    pub(crate) fn new(
        index: usize,
        actor_a: ActorId,
        actor_b: ActorId,
        kind: SignalKind,
        line_type: LineType,
        offset_y: f32,
        label: Label,
    ) -> Self {
        Self {
            index,
            actor_a,
            actor_b,
            kind,
            line_type,
            offset_y,
            shape: SignalShape::Terminal,
            label,
        }
    }

    /// Position of the signal in the input order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Source actor.
    pub fn actor_a(&self) -> ActorId {
        self.actor_a
    }

    /// Destination actor.
    pub fn actor_b(&self) -> ActorId {
        self.actor_b
    }

    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    pub fn line_type(&self) -> LineType {
        self.line_type
    }

    /// Vertical offset of the signal below the actor boxes.
    pub fn offset_y(&self) -> f32 {
        self.offset_y
    }

    pub fn shape(&self) -> &SignalShape {
        &self.shape
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn is_self(&self) -> bool {
        self.actor_a == self.actor_b
    }

    /// Responses are dashed; creation lines are always solid.
    pub fn is_dashed(&self) -> bool {
        self.line_type == LineType::Response && self.kind != SignalKind::ActorCreation
    }

    pub(crate) fn set_shape(&mut self, shape: SignalShape) {
        self.shape = shape;
    }

    pub(crate) fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn element(x: f32) -> ActorElement {
        ActorElement::new(
            Actor::new("A"),
            Bounds::new_from_top_left(Point::new(x, 0.0), Size::new(100.0, 50.0)),
            Size::new(20.0, 17.0),
        )
    }

    #[test]
    fn test_new_actor_element() {
        let actor = element(200.0);
        assert_eq!(actor.line_x(), 250.0);
        assert_eq!(actor.lifeline().from().y(), 50.0);
        assert_eq!(actor.lifeline().bounds().height(), 0.0);
        assert_eq!(actor.label().position(), Point::new(250.0, 25.0));
        assert_eq!(actor.label().content(), "A");
        assert!(actor.bottom_box().is_none());
        assert!(actor.cross().is_none());
    }

    #[test]
    fn test_finish_adds_bottom_box() {
        let mut actor = element(0.0);
        actor.finish(150.0, 50.0);

        assert_eq!(actor.lifeline().to().y(), 150.0);
        let bottom = actor.bottom_box().unwrap();
        assert_eq!(bottom.min_y(), 150.0);
        assert_eq!(bottom.width(), 100.0);
        assert_eq!(bottom.center().x(), actor.line_x());
    }

    #[test]
    fn test_destroy_ends_lifeline_with_cross() {
        let mut actor = element(200.0);
        actor.destroy(300.0, 20.0);

        assert!(actor.is_destroyed());
        assert_eq!(actor.lifeline().to().y(), 300.0);
        let [first, second] = actor.cross().unwrap();
        assert_eq!(first.bounds().center(), Point::new(250.0, 300.0));
        assert_eq!(second.bounds().center(), Point::new(250.0, 300.0));
        assert_eq!(first.width(), 20.0);
    }

    #[test]
    fn test_translate_moves_everything() {
        let mut actor = element(0.0);
        actor.finish(150.0, 50.0);
        actor.translate_x(30.0);

        assert_eq!(actor.top_box().min_x(), 30.0);
        assert_eq!(actor.line_x(), 80.0);
        assert_eq!(actor.label().position().x(), 80.0);
        assert_eq!(actor.bottom_box().unwrap().min_x(), 30.0);
    }

    #[test]
    fn test_resize_keeps_left_edge_and_recenters() {
        let mut actor = element(200.0);
        actor.destroy(300.0, 20.0);
        actor.resize(140.0);

        assert_eq!(actor.top_box().min_x(), 200.0);
        assert_eq!(actor.top_box().width(), 140.0);
        assert_approx_eq!(f32, actor.line_x(), 270.0);
        assert_approx_eq!(f32, actor.label().position().x(), 270.0);
        let [first, _] = actor.cross().unwrap();
        assert_approx_eq!(f32, first.bounds().center().x(), 270.0);
    }

    #[test]
    fn test_signals_order() {
        let mut actor = element(0.0);
        actor.add_outgoing(SignalId::new(0));
        actor.add_incoming(SignalId::new(1));
        actor.add_self_signal(SignalId::new(2));

        let ids: Vec<usize> = actor.signals().map(SignalId::index).collect();
        assert_eq!(ids, vec![1, 0, 2]);
    }

    #[test]
    fn test_centered_label_bounds() {
        let label = Label::new("A", Size::new(20.0, 10.0), TextAnchor::Middle)
            .with_position(Point::new(50.0, 25.0));
        let bounds = label.bounds();
        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.max_x(), 60.0);
        assert_eq!(bounds.min_y(), 20.0);
    }

    #[test]
    fn test_dashed_only_for_responses() {
        let label = Label::new("", Size::default(), TextAnchor::Start);
        let response = SignalElement::new(
            0,
            ActorId::new(0),
            ActorId::new(1),
            SignalKind::Simple,
            LineType::Response,
            50.0,
            label.clone(),
        );
        let creation = SignalElement::new(
            1,
            ActorId::new(0),
            ActorId::new(1),
            SignalKind::ActorCreation,
            LineType::Response,
            100.0,
            label,
        );
        assert!(response.is_dashed());
        assert!(!creation.is_dashed());
    }
}
