//! Drawing support for laid-out sequence diagrams.
//!
//! # Overview
//!
//! - [`TextMeasure`] and its implementations measure label widths before
//!   anything is drawn, so placement never needs a draw-measure-redraw cycle.
//! - [`Surface`] is the contract of a drawing surface: draw primitives,
//!   bounding-box queries, rigid translation and re-spanning of lines.
//! - [`SvgSurface`] is a [`Surface`] that collects primitives and serializes
//!   them into an SVG document, grouped by [`RenderLayer`].
//! - [`StrokeDefinition`] describes how lines are stroked.

mod layer;
mod stroke;
mod surface;
mod svg_surface;
mod text;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use surface::{Handle, LineOptions, Surface, TextAnchor, TextOptions};
pub use svg_surface::SvgSurface;
pub use text::{EstimatedTextMeasure, ShapedTextMeasure, TextDefinition, TextMeasure};
