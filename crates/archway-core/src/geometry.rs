//! Geometric primitives for diagram layout and positioning.
//!
//! This module provides the geometric types used throughout Archway for
//! calculating positions, sizes, and bounding boxes of diagram elements.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding/margin values for four sides
//!
//! # Coordinate System
//!
//! Archway uses the screen coordinate system shared by SVG and most whiteboard
//! document formats:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! - **Origin**: Top-left corner at `(0, 0)`
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases downward

use serde::{Deserialize, Serialize};

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use archway_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
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

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Multiplies both coordinates by the given factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
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

    /// Component-wise maximum, used to size uniform grid cells.
    pub fn max(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }

    /// Stacks `other` below `self`.
    pub fn merge_vertical(self, other: Size) -> Self {
        Self {
            width: self.width.max(other.width),
            height: self.height + other.height,
        }
    }
}

/// A rectangular bounding box with minimum and maximum coordinates.
///
/// Positioned nodes, groups, and text primitives all carry a `Bounds`; the
/// four edge midpoints are the anchor candidates used by connection routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
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

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Midpoint of the top edge
    pub fn top_center(self) -> Point {
        Point::new(self.center().x, self.min_y)
    }

    /// Midpoint of the bottom edge
    pub fn bottom_center(self) -> Point {
        Point::new(self.center().x, self.max_y)
    }

    /// Midpoint of the left edge
    pub fn left_center(self) -> Point {
        Point::new(self.min_x, self.center().y)
    }

    /// Midpoint of the right edge
    pub fn right_center(self) -> Point {
        Point::new(self.max_x, self.center().y)
    }

    /// Returns true if `point` lies on the rectangle outline (not strictly
    /// inside, not outside), within `tolerance`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archway_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
    /// assert!(bounds.is_on_boundary(Point::new(100.0, 25.0), 0.001));
    /// assert!(!bounds.is_on_boundary(Point::new(50.0, 25.0), 0.001));
    /// assert!(!bounds.is_on_boundary(Point::new(150.0, 25.0), 0.001));
    /// ```
    pub fn is_on_boundary(self, point: Point, tolerance: f32) -> bool {
        let within_x = point.x >= self.min_x - tolerance && point.x <= self.max_x + tolerance;
        let within_y = point.y >= self.min_y - tolerance && point.y <= self.max_y + tolerance;
        if !within_x || !within_y {
            return false;
        }

        (point.x - self.min_x).abs() <= tolerance
            || (point.x - self.max_x).abs() <= tolerance
            || (point.y - self.min_y).abs() <= tolerance
            || (point.y - self.max_y).abs() <= tolerance
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use archway_core::geometry::{Bounds, Point, Size};
    /// let header = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 30.0));
    /// let content = Bounds::new_from_top_left(Point::new(10.0, 40.0), Size::new(120.0, 80.0));
    ///
    /// let combined = header.merge(&content);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.width(), 130.0);
    /// assert_eq!(combined.height(), 120.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds outward by `insets` on each side.
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// Per-side padding applied around a bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Returns the top inset value
    pub fn top(self) -> f32 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f32 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f32 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f32 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.2);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.2);
    }

    #[test]
    fn test_point_add_sub() {
        let p1 = Point::new(5.0, 8.0);
        let p2 = Point::new(2.0, 3.0);
        assert_eq!(p1.add_point(p2), Point::new(7.0, 11.0));
        assert_eq!(p1.sub_point(p2), Point::new(3.0, 5.0));
    }

    #[test]
    fn test_point_midpoint() {
        let midpoint = Point::new(0.0, 0.0).midpoint(Point::new(4.0, 6.0));
        assert_eq!(midpoint.x(), 2.0);
        assert_eq!(midpoint.y(), 3.0);
    }

    #[test]
    fn test_point_hypot_and_scale() {
        assert_eq!(Point::new(3.0, 4.0).hypot(), 5.0);
        assert_eq!(Point::new(2.0, 3.0).scale(2.5), Point::new(5.0, 7.5));
    }

    #[test]
    fn test_size_merge_vertical() {
        let merged = Size::new(100.0, 40.0).merge_vertical(Size::new(60.0, 30.0));
        assert_eq!(merged.width(), 100.0);
        assert_eq!(merged.height(), 70.0);
    }

    #[test]
    fn test_bounds_edge_midpoints() {
        let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(100.0, 40.0));

        assert_eq!(bounds.top_center(), Point::new(60.0, 20.0));
        assert_eq!(bounds.bottom_center(), Point::new(60.0, 60.0));
        assert_eq!(bounds.left_center(), Point::new(10.0, 40.0));
        assert_eq!(bounds.right_center(), Point::new(110.0, 40.0));
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_top_left(Point::new(100.0, 100.0), Size::new(50.0, 50.0));
        let padded = bounds.add_padding(Insets::uniform(20.0));

        assert_approx_eq!(f32, padded.min_x(), 80.0);
        assert_approx_eq!(f32, padded.min_y(), 80.0);
        assert_approx_eq!(f32, padded.width(), 90.0);
        assert_approx_eq!(f32, padded.height(), 90.0);
    }

    #[test]
    fn test_bounds_is_on_boundary_corners_and_interior() {
        let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));

        assert!(bounds.is_on_boundary(Point::new(0.0, 0.0), 0.0));
        assert!(bounds.is_on_boundary(Point::new(10.0, 5.0), 0.0));
        assert!(!bounds.is_on_boundary(Point::new(5.0, 5.0), 0.0));
        assert!(!bounds.is_on_boundary(Point::new(5.0, 11.0), 0.0));
    }

    proptest! {
        #[test]
        fn prop_merge_contains_both(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 1.0f32..300.0, ah in 1.0f32..300.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 1.0f32..300.0, bh in 1.0f32..300.0,
        ) {
            let a = Bounds::new_from_top_left(Point::new(ax, ay), Size::new(aw, ah));
            let b = Bounds::new_from_top_left(Point::new(bx, by), Size::new(bw, bh));
            let merged = a.merge(&b);

            prop_assert!(merged.min_x() <= a.min_x() && merged.min_x() <= b.min_x());
            prop_assert!(merged.min_y() <= a.min_y() && merged.min_y() <= b.min_y());
            prop_assert!(merged.max_x() >= a.max_x() && merged.max_x() >= b.max_x());
            prop_assert!(merged.max_y() >= a.max_y() && merged.max_y() >= b.max_y());
        }
    }
}
