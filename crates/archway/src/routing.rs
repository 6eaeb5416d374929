//! Connection routing between positioned rectangles.
//!
//! A connection attaches to the midpoint of the rectangle edges that face
//! each other. When the horizontal displacement between the two centers
//! dominates, the left/right edges are used; otherwise, ties included, the
//! top/bottom edges. Anchors therefore always lie exactly on a rectangle
//! outline.

use archway_core::geometry::{Bounds, Point};

use crate::config::LabelPlacement;

/// The two anchor points of a connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    from_point: Point,
    to_point: Point,
}

impl Route {
    pub fn from_point(&self) -> Point {
        self.from_point
    }

    pub fn to_point(&self) -> Point {
        self.to_point
    }

    pub fn midpoint(&self) -> Point {
        self.from_point.midpoint(self.to_point)
    }

    /// Where the connection's label goes.
    ///
    /// With [`LabelPlacement::Perpendicular`] the midpoint is pushed `offset`
    /// units along the left-hand normal of the segment. Zero-length segments
    /// have no normal and keep the midpoint.
    pub fn label_position(&self, placement: LabelPlacement, offset: f32) -> Point {
        let midpoint = self.midpoint();
        if placement == LabelPlacement::Midpoint {
            return midpoint;
        }

        let delta = self.to_point.sub_point(self.from_point);
        let length = delta.hypot();
        if length <= f32::EPSILON {
            return midpoint;
        }

        let normal = Point::new(delta.y() / length, -delta.x() / length);
        midpoint.add_point(normal.scale(offset))
    }
}

/// Computes the anchor points for a connection from `from` to `to`.
///
/// # Examples
///
/// ```
/// # use archway::routing::route;
/// # use archway_core::geometry::{Bounds, Point, Size};
/// let upper = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
/// let lower = Bounds::new_from_top_left(Point::new(0.0, 200.0), Size::new(100.0, 50.0));
///
/// let route = route(upper, lower);
/// assert_eq!(route.from_point(), Point::new(50.0, 50.0));
/// assert_eq!(route.to_point(), Point::new(50.0, 200.0));
/// ```
pub fn route(from: Bounds, to: Bounds) -> Route {
    let delta = to.center().sub_point(from.center());

    let (from_point, to_point) = if delta.x().abs() > delta.y().abs() {
        if delta.x() > 0.0 {
            (from.right_center(), to.left_center())
        } else {
            (from.left_center(), to.right_center())
        }
    } else if delta.y() >= 0.0 {
        (from.bottom_center(), to.top_center())
    } else {
        (from.top_center(), to.bottom_center())
    };

    Route {
        from_point,
        to_point,
    }
}
