//! SVG implementation of the drawing surface.
//!
//! [`SvgSurface`] records every primitive with its geometry, answers bounding
//! box queries from that record, and serializes the whole drawing into an SVG
//! document on demand.
//!
//! # Example
//!
//! ```
//! # use sequin_core::draw::{EstimatedTextMeasure, LineOptions, Surface, SvgSurface, TextDefinition, TextOptions};
//! # use sequin_core::geometry::{Bounds, Point, Size};
//! let mut surface = SvgSurface::new(TextDefinition::new(), Box::new(EstimatedTextMeasure));
//!
//! let rect = surface.draw_rect(Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0)));
//! let line = surface.draw_line(
//!     Point::new(50.0, 100.0),
//!     Point::new(250.0, 100.0),
//!     LineOptions::new().with_end_marker(),
//! );
//! surface.draw_text(Point::new(55.0, 95.0), "ping", TextOptions::new());
//!
//! surface.translate(&[rect], 10.0);
//! assert_eq!(surface.bounding_box(rect).unwrap().min_x(), 10.0);
//!
//! let svg = surface.render();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("marker-end"));
//! ```

use std::collections::BTreeSet;

use log::debug;
use svg::{self, node::element as svg_element};

use crate::{
    apply_stroke,
    color::Color,
    draw::{
        Handle, LayeredOutput, LineOptions, RenderLayer, StrokeDefinition, Surface,
        TextAnchor, TextDefinition, TextMeasure, TextOptions,
    },
    geometry::{Bounds, Point, Segment, Size},
};

/// Space left around the drawing inside the document.
const DOCUMENT_MARGIN: f32 = 20.0;

const START_MARKER_ID: &str = "arrow-start";
const END_MARKER_ID: &str = "arrow-end";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MarkerKind {
    Start,
    End,
}

#[derive(Debug, Clone)]
enum Primitive {
    Rect {
        bounds: Bounds,
    },
    Text {
        position: Point,
        content: String,
        options: TextOptions,
        size: Size,
    },
    Line {
        segment: Segment,
        options: LineOptions,
    },
}

impl Primitive {
    fn bounds(&self) -> Bounds {
        match self {
            Self::Rect { bounds } => *bounds,
            Self::Text {
                position,
                options,
                size,
                ..
            } => match options.anchor() {
                TextAnchor::Start => Bounds::new_from_top_left(
                    Point::new(position.x(), position.y() - size.height()),
                    *size,
                ),
                TextAnchor::Middle => Bounds::new_from_center(*position, *size),
            },
            Self::Line { segment, .. } => segment.bounds(),
        }
    }

    fn translate_x(&mut self, dx: f32) {
        match self {
            Self::Rect { bounds } => *bounds = bounds.translate_x(dx),
            Self::Text { position, .. } => *position = position.translate_x(dx),
            Self::Line { segment, .. } => *segment = segment.translate_x(dx),
        }
    }

    fn layer(&self) -> RenderLayer {
        match self {
            Self::Rect { .. } => RenderLayer::Content,
            Self::Text { .. } => RenderLayer::Text,
            Self::Line { options, .. } => options.layer(),
        }
    }
}

/// A [`Surface`] that produces an SVG document.
#[derive(Debug)]
pub struct SvgSurface {
    text: TextDefinition,
    measure: Box<dyn TextMeasure>,
    primitives: Vec<Primitive>,
}

impl SvgSurface {
    /// Creates an empty surface.
    ///
    /// # Arguments
    ///
    /// * `text` - Font used for every drawn text.
    /// * `measure` - Measurement used to answer text bounding-box queries.
    pub fn new(text: TextDefinition, measure: Box<dyn TextMeasure>) -> Self {
        Self {
            text,
            measure,
            primitives: Vec::new(),
        }
    }

    /// Returns the number of primitives drawn so far.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns `true` if nothing has been drawn.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Returns the smallest bounds containing every drawn primitive.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.primitives
            .iter()
            .map(Primitive::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Builds the SVG document of everything drawn so far.
    pub fn to_document(&self) -> svg::Document {
        let content = self.content_bounds().unwrap_or_default();
        let width = content.width() + DOCUMENT_MARGIN * 2.0;
        let height = content.height() + DOCUMENT_MARGIN * 2.0;

        let mut doc = svg::Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", width)
            .set("height", height)
            .set("fill", &Color::white());
        doc = doc.add(background);

        let markers = self.used_markers();
        if !markers.is_empty() {
            doc = doc.add(Self::marker_definitions(&markers));
        }

        let mut output = LayeredOutput::new();
        for primitive in &self.primitives {
            output.add_to_layer(primitive.layer(), self.render_primitive(primitive));
        }

        let mut main_group = svg_element::Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                DOCUMENT_MARGIN - content.min_x(),
                DOCUMENT_MARGIN - content.min_y()
            ),
        );
        for node in output.render() {
            main_group = main_group.add(node);
        }

        debug!(
            primitives_count = self.primitives.len(),
            width, height; "SVG document built"
        );

        doc.add(main_group)
    }

    /// Serializes the drawing into an SVG string.
    pub fn render(&self) -> String {
        self.to_document().to_string()
    }

    fn used_markers(&self) -> BTreeSet<MarkerKind> {
        let mut markers = BTreeSet::new();
        for primitive in &self.primitives {
            if let Primitive::Line { options, .. } = primitive {
                if options.start_marker() {
                    markers.insert(MarkerKind::Start);
                }
                if options.end_marker() {
                    markers.insert(MarkerKind::End);
                }
            }
        }
        markers
    }

    fn render_primitive(&self, primitive: &Primitive) -> Box<dyn svg::Node> {
        match primitive {
            Primitive::Rect { bounds } => {
                let rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height())
                    .set("fill", &Color::white());
                Box::new(apply_stroke!(rect, &StrokeDefinition::solid()))
            }
            Primitive::Text {
                position,
                content,
                options,
                ..
            } => {
                let mut text = svg_element::Text::new(content.as_str())
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("text-anchor", options.anchor().to_svg_value())
                    .set("font-family", self.text.font_family())
                    .set("font-size", self.text.font_size());
                if options.anchor() == TextAnchor::Middle {
                    text = text.set("dominant-baseline", "middle");
                }
                Box::new(text)
            }
            Primitive::Line { segment, options } => {
                let stroke = if options.dashed() {
                    StrokeDefinition::dashed()
                } else {
                    StrokeDefinition::solid()
                };
                let mut line = svg_element::Line::new()
                    .set("x1", segment.from().x())
                    .set("y1", segment.from().y())
                    .set("x2", segment.to().x())
                    .set("y2", segment.to().y());
                line = apply_stroke!(line, &stroke);

                if options.start_marker() {
                    line = line.set("marker-start", format!("url(#{START_MARKER_ID})"));
                }
                if options.end_marker() {
                    line = line.set("marker-end", format!("url(#{END_MARKER_ID})"));
                }
                Box::new(line)
            }
        }
    }

    fn marker_definitions(markers: &BTreeSet<MarkerKind>) -> svg_element::Definitions {
        let mut defs = svg_element::Definitions::new();
        for marker in markers {
            defs = defs.add(Self::create_marker(*marker));
        }
        defs
    }

    fn create_marker(kind: MarkerKind) -> svg_element::Marker {
        let color = Color::default();
        let (id, ref_x, path) = match kind {
            MarkerKind::Start => (START_MARKER_ID, 1, "M 10 0 L 0 5 L 10 10 z"),
            MarkerKind::End => (END_MARKER_ID, 9, "M 0 0 L 10 5 L 0 10 z"),
        };

        svg_element::Marker::new()
            .set("id", id)
            .set("viewBox", "0 0 10 10")
            .set("refX", ref_x)
            .set("refY", 5)
            .set("markerWidth", 6)
            .set("markerHeight", 6)
            .set("orient", "auto")
            .add(
                svg_element::Path::new()
                    .set("d", path)
                    .set("fill", &color)
                    .set("fill-opacity", color.alpha()),
            )
    }

    fn push(&mut self, primitive: Primitive) -> Handle {
        self.primitives.push(primitive);
        Handle::new(self.primitives.len() - 1)
    }
}

impl Surface for SvgSurface {
    fn draw_rect(&mut self, bounds: Bounds) -> Handle {
        self.push(Primitive::Rect { bounds })
    }

    fn draw_text(&mut self, position: Point, text: &str, options: TextOptions) -> Handle {
        let size = self.measure.measure(text, &self.text);
        self.push(Primitive::Text {
            position,
            content: text.to_string(),
            options,
            size,
        })
    }

    fn draw_line(&mut self, from: Point, to: Point, options: LineOptions) -> Handle {
        self.push(Primitive::Line {
            segment: Segment::new(from, to),
            options,
        })
    }

    fn draw_cross(&mut self, center: Point, width: f32) -> (Handle, Handle) {
        let half = width / 2.0;
        let options = LineOptions::new().with_layer(RenderLayer::Lifeline);
        let first = self.draw_line(
            Point::new(center.x() - half, center.y() - half),
            Point::new(center.x() + half, center.y() + half),
            options,
        );
        let second = self.draw_line(
            Point::new(center.x() - half, center.y() + half),
            Point::new(center.x() + half, center.y() - half),
            options,
        );
        (first, second)
    }

    fn bounding_box(&self, handle: Handle) -> Option<Bounds> {
        self.primitives.get(handle.index()).map(Primitive::bounds)
    }

    fn translate(&mut self, handles: &[Handle], dx: f32) {
        for handle in handles {
            if let Some(primitive) = self.primitives.get_mut(handle.index()) {
                primitive.translate_x(dx);
            }
        }
    }

    fn extend(&mut self, handle: Handle, x1: f32, x2: f32) {
        if let Some(Primitive::Line { segment, .. }) = self.primitives.get_mut(handle.index()) {
            *segment = segment.extend(x1, x2);
        }
    }
}
