//! Geometric primitives for diagram layout and positioning.
//!
//! This module provides the geometric types Sequin uses to hold the geometry
//! of every diagram element explicitly, independently of any drawing surface.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Segment`] - A straight line segment between two points
//!
//! # Coordinate System
//!
//! Sequin uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward; actors are laid out along it
//! - **Y-axis**: Increases downward; signals are laid out along it

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use sequin_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
///
/// let shifted = p1.translate_x(30.0);
/// assert_eq!(shifted.x(), 40.0);
/// assert_eq!(shifted.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f32) -> Self {
        self.x = x;
        self
    }

    /// Moves the point horizontally by `dx`.
    pub fn translate_x(self, dx: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a center point and a size
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the bounds resized to `width`, keeping the left edge in place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sequin_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(100.0, 50.0));
    /// let wider = bounds.with_width(140.0);
    /// assert_eq!(wider.min_x(), 10.0);
    /// assert_eq!(wider.max_x(), 150.0);
    /// assert_eq!(wider.center().x(), 80.0);
    /// ```
    pub fn with_width(mut self, width: f32) -> Self {
        self.max_x = self.min_x + width;
        self
    }

    /// Merges two bounds to create a larger bounds that contains both.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Moves the bounds horizontally by `dx`.
    pub fn translate_x(&self, dx: f32) -> Self {
        self.translate(Point::new(dx, 0.0))
    }

    /// Returns true if the vertical line at `x` passes strictly through the
    /// inside of the bounds.
    ///
    /// Touching an edge is not straddling.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sequin_core::geometry::{Bounds, Point, Size};
    /// let label = Bounds::new_from_top_left(Point::new(55.0, 80.0), Size::new(60.0, 20.0));
    /// assert!(label.straddles_x(100.0));
    /// assert!(!label.straddles_x(115.0));
    /// assert!(!label.straddles_x(40.0));
    /// ```
    pub fn straddles_x(self, x: f32) -> bool {
        self.min_x < x && x < self.max_x
    }
}

/// A straight line segment between two points.
///
/// Segments carry the geometry of life lines, signal lines, self-loop parts
/// and destruction-cross strokes. Horizontal segments can be re-spanned with
/// [`Segment::extend`], which keeps their y-coordinates.
///
/// # Examples
///
/// ```
/// # use sequin_core::geometry::{Point, Segment};
/// let line = Segment::new(Point::new(50.0, 100.0), Point::new(250.0, 100.0));
/// assert_eq!(line.min_x(), 50.0);
/// assert_eq!(line.max_x(), 250.0);
///
/// let extended = line.extend(50.0, 300.0);
/// assert_eq!(extended.to().x(), 300.0);
/// assert_eq!(extended.to().y(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Segment {
    from: Point,
    to: Point,
}

impl Segment {
    /// Creates a segment running from `from` to `to`.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Creates a vertical segment at `x` spanning `y1` to `y2`.
    pub fn vertical(x: f32, y1: f32, y2: f32) -> Self {
        Self::new(Point::new(x, y1), Point::new(x, y2))
    }

    /// Creates a horizontal segment at `y` spanning `x1` to `x2`.
    pub fn horizontal(x1: f32, x2: f32, y: f32) -> Self {
        Self::new(Point::new(x1, y), Point::new(x2, y))
    }

    /// Returns the starting point of the segment
    pub fn from(self) -> Point {
        self.from
    }

    /// Returns the end point of the segment
    pub fn to(self) -> Point {
        self.to
    }

    /// Returns the smallest x-coordinate of the two endpoints
    pub fn min_x(self) -> f32 {
        self.from.x.min(self.to.x)
    }

    /// Returns the largest x-coordinate of the two endpoints
    pub fn max_x(self) -> f32 {
        self.from.x.max(self.to.x)
    }

    /// Rigidly moves the segment horizontally by `dx`.
    pub fn translate_x(self, dx: f32) -> Self {
        Self {
            from: self.from.translate_x(dx),
            to: self.to.translate_x(dx),
        }
    }

    /// Reassigns the horizontal span of the segment, keeping both y-coordinates.
    pub fn extend(self, x1: f32, x2: f32) -> Self {
        Self {
            from: self.from.with_x(x1),
            to: self.to.with_x(x2),
        }
    }

    /// Returns the smallest bounds containing both endpoints.
    pub fn bounds(self) -> Bounds {
        Bounds {
            min_x: self.min_x(),
            min_y: self.from.y.min(self.to.y),
            max_x: self.max_x(),
            max_y: self.from.y.max(self.to.y),
        }
    }
}
