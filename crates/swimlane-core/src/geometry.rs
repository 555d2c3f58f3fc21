//! Geometric primitives for element bounds.
//!
//! This module provides the small set of geometric types the element model
//! needs to keep bounds, move elements and pin boundary events to their host.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Swimlane uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```

/// A 2D point representing a position in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use swimlane_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let delta = p1.sub_point(p2);
/// assert_eq!(delta.x(), 5.0);
/// assert_eq!(delta.y(), 15.0);
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

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

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

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Moves the bounds by the specified offset.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane_core::geometry::{Bounds, Point, Size};
    /// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::new(50.0, 30.0));
    ///
    /// let moved = bounds.translate(Point::new(100.0, 50.0));
    /// assert_eq!(moved.min_x(), 110.0);
    /// assert_eq!(moved.min_y(), 70.0);
    /// assert_eq!(moved.width(), 50.0);
    /// ```
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }

    /// Moves these bounds so that their center sits on the nearest point of
    /// `outline`'s border. The size is preserved.
    ///
    /// The center is first clamped into `outline`, then pushed out to the
    /// closest of the four edges. Ties prefer left, right, top, bottom in that
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use swimlane_core::geometry::{Bounds, Point, Size};
    /// let task = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 60.0));
    /// let event = Bounds::new_from_center(Point::new(90.0, 30.0), Size::new(20.0, 20.0));
    ///
    /// let pinned = event.snap_center_to_outline(task);
    /// assert_eq!(pinned.center(), Point::new(100.0, 30.0));
    /// ```
    pub fn snap_center_to_outline(self, outline: Bounds) -> Self {
        let center = self.center();
        let x = center.x.max(outline.min_x).min(outline.max_x);
        let y = center.y.max(outline.min_y).min(outline.max_y);

        let candidates = [
            (x - outline.min_x, Point::new(outline.min_x, y)),
            (outline.max_x - x, Point::new(outline.max_x, y)),
            (y - outline.min_y, Point::new(x, outline.min_y)),
            (outline.max_y - y, Point::new(x, outline.max_y)),
        ];

        let mut snapped = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.0 < snapped.0 {
                snapped = *candidate;
            }
        }

        Self::new_from_center(snapped.1, self.to_size())
    }

    /// Returns true if `point` lies on the border of these bounds, within `epsilon`.
    pub fn outline_contains(self, point: Point, epsilon: f32) -> bool {
        let within_x = point.x >= self.min_x - epsilon && point.x <= self.max_x + epsilon;
        let within_y = point.y >= self.min_y - epsilon && point.y <= self.max_y + epsilon;
        let on_vertical =
            (point.x - self.min_x).abs() <= epsilon || (point.x - self.max_x).abs() <= epsilon;
        let on_horizontal =
            (point.y - self.min_y).abs() <= epsilon || (point.y - self.max_y).abs() <= epsilon;

        (on_vertical && within_y) || (on_horizontal && within_x)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::{approx_eq, assert_approx_eq};
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_sub() {
        let p = Point::new(5.0, 7.0).sub_point(Point::new(2.0, 10.0));
        assert_eq!(p, Point::new(3.0, -3.0));
    }

    #[test]
    fn test_point_is_zero() {
        assert!(Point::default().is_zero());
        assert!(!Point::new(0.0, 1.0).is_zero());
    }

    #[test]
    fn test_bounds_from_center() {
        let bounds = Bounds::new_from_center(Point::new(50.0, 40.0), Size::new(20.0, 10.0));

        assert_approx_eq!(f32, bounds.min_x(), 40.0);
        assert_approx_eq!(f32, bounds.min_y(), 35.0);
        assert_approx_eq!(f32, bounds.max_x(), 60.0);
        assert_approx_eq!(f32, bounds.max_y(), 45.0);
        assert_eq!(bounds.center(), Point::new(50.0, 40.0));
    }

    #[test]
    fn test_snap_from_inside_picks_nearest_edge() {
        let host = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 60.0));
        let event = Bounds::new_from_center(Point::new(40.0, 55.0), Size::new(30.0, 30.0));

        let snapped = event.snap_center_to_outline(host);

        assert_eq!(snapped.center(), Point::new(40.0, 60.0));
        assert_approx_eq!(f32, snapped.width(), 30.0);
        assert_approx_eq!(f32, snapped.height(), 30.0);
    }

    #[test]
    fn test_snap_from_outside_clamps_to_corner_edge() {
        let host = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 60.0));
        let event = Bounds::new_from_center(Point::new(-50.0, -50.0), Size::new(20.0, 20.0));

        let snapped = event.snap_center_to_outline(host);

        assert_eq!(snapped.center(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_snap_is_stable_on_outline() {
        let host = Bounds::new_from_top_left(Point::new(10.0, 10.0), Size::new(80.0, 40.0));
        let event = Bounds::new_from_center(Point::new(90.0, 20.0), Size::new(20.0, 20.0));

        let snapped = event.snap_center_to_outline(host);

        assert_eq!(snapped, event);
    }

    #[test]
    fn test_outline_contains() {
        let host = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 60.0));

        assert!(host.outline_contains(Point::new(0.0, 30.0), 0.001));
        assert!(host.outline_contains(Point::new(50.0, 60.0), 0.001));
        assert!(!host.outline_contains(Point::new(50.0, 30.0), 0.001));
        assert!(!host.outline_contains(Point::new(150.0, 60.0), 0.001));
    }

    // ====================
    // Strategies
    // ====================

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (point_strategy(), 1.0f32..500.0, 1.0f32..500.0)
            .prop_map(|(p, w, h)| Bounds::new_from_top_left(p, Size::new(w, h)))
    }

    // ====================
    // Property checks
    // ====================

    /// Snapping always lands the center on the outline and keeps the size.
    fn check_snap_lands_on_outline(event: Bounds, host: Bounds) -> Result<(), TestCaseError> {
        let snapped = event.snap_center_to_outline(host);

        prop_assert!(host.outline_contains(snapped.center(), 0.01));
        prop_assert!(approx_eq!(
            f32,
            snapped.width(),
            event.width(),
            epsilon = 0.01
        ));
        prop_assert!(approx_eq!(
            f32,
            snapped.height(),
            event.height(),
            epsilon = 0.01
        ));
        Ok(())
    }

    /// Snapping an already snapped box changes nothing.
    fn check_snap_is_idempotent(event: Bounds, host: Bounds) -> Result<(), TestCaseError> {
        let once = event.snap_center_to_outline(host);
        let twice = once.snap_center_to_outline(host);

        prop_assert!(approx_eq!(f32, once.min_x(), twice.min_x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, once.min_y(), twice.min_y(), epsilon = 0.01));
        Ok(())
    }

    proptest! {
        #[test]
        fn snap_lands_on_outline(event in bounds_strategy(), host in bounds_strategy()) {
            check_snap_lands_on_outline(event, host)?;
        }

        #[test]
        fn snap_is_idempotent(event in bounds_strategy(), host in bounds_strategy()) {
            check_snap_is_idempotent(event, host)?;
        }
    }
}
