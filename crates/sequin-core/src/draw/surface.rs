//! The drawing surface contract.
//!
//! A [`Surface`] receives the primitives of a laid-out diagram. It is an output
//! sink: the layout engine keeps all geometry in its own model and never reads
//! positions back from a surface. Bounding-box queries, translation and
//! extension are still part of the contract so that callers can inspect or
//! post-process what was drawn.
//!
//! Every effect must be visible immediately: a [`Surface::bounding_box`] query
//! issued right after a draw, translate or extend call reflects that call.

use crate::{
    draw::RenderLayer,
    geometry::{Bounds, Point},
};

/// Opaque reference to a primitive drawn on a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(usize);

impl Handle {
    /// Creates a handle from the surface's own primitive index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the primitive index this handle refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Marker, dash and layer options of a drawn line.
///
/// Lines land on [`RenderLayer::Arrow`] unless another layer is chosen.
///
/// # Examples
///
/// ```
/// # use sequin_core::draw::{LineOptions, RenderLayer};
/// let response = LineOptions::new().with_start_marker().with_dashed();
/// assert!(response.start_marker());
/// assert!(!response.end_marker());
/// assert!(response.dashed());
/// assert_eq!(response.layer(), RenderLayer::Arrow);
///
/// let lifeline = LineOptions::new().with_layer(RenderLayer::Lifeline);
/// assert_eq!(lifeline.layer(), RenderLayer::Lifeline);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LineOptions {
    start_marker: bool,
    end_marker: bool,
    dashed: bool,
    layer: RenderLayer,
}

impl LineOptions {
    /// A plain solid line without markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arrow head at the start of the line.
    pub fn with_start_marker(mut self) -> Self {
        self.start_marker = true;
        self
    }

    /// Adds an arrow head at the end of the line.
    pub fn with_end_marker(mut self) -> Self {
        self.end_marker = true;
        self
    }

    /// Draws the line dashed.
    pub fn with_dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    /// Draws the line on `layer`.
    pub fn with_layer(mut self, layer: RenderLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn start_marker(self) -> bool {
        self.start_marker
    }

    pub fn end_marker(self) -> bool {
        self.end_marker
    }

    pub fn dashed(self) -> bool {
        self.dashed
    }

    pub fn layer(self) -> RenderLayer {
        self.layer
    }
}

/// Horizontal anchoring of a drawn text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    /// The position is the left end of the baseline.
    #[default]
    Start,
    /// The position is the center of the text.
    Middle,
}

impl TextAnchor {
    /// Returns the SVG `text-anchor` value
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// Options of a drawn text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    anchor: TextAnchor,
}

impl TextOptions {
    /// Left-anchored text on its baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text centered on its position.
    pub fn centered() -> Self {
        Self {
            anchor: TextAnchor::Middle,
        }
    }

    pub fn anchor(self) -> TextAnchor {
        self.anchor
    }
}

/// A drawing surface for diagram primitives.
pub trait Surface {
    /// Draws a rectangle and returns its handle.
    fn draw_rect(&mut self, bounds: Bounds) -> Handle;

    /// Draws `text` at `position` and returns its handle.
    fn draw_text(&mut self, position: Point, text: &str, options: TextOptions) -> Handle;

    /// Draws a straight line and returns its handle.
    fn draw_line(&mut self, from: Point, to: Point, options: LineOptions) -> Handle;

    /// Draws an X of `width` centered on `center` on the life-line layer,
    /// returning both strokes.
    fn draw_cross(&mut self, center: Point, width: f32) -> (Handle, Handle);

    /// Returns the current bounding box of a drawn primitive, or `None` if the
    /// handle is unknown to this surface.
    fn bounding_box(&self, handle: Handle) -> Option<Bounds>;

    /// Rigidly shifts the given primitives horizontally by `dx`.
    fn translate(&mut self, handles: &[Handle], dx: f32);

    /// Reassigns the horizontal span of a line to `x1..x2`, keeping its
    /// y-coordinates. Has no effect on primitives that are not lines.
    fn extend(&mut self, handle: Handle, x1: f32, x2: f32);
}
