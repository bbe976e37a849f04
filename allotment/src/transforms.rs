//! Conversion between a bed's local frame and the shared world frame.
//!
//! A bed's local origin sits at one of its corners. Local X runs along the
//! bed's length (`height`) and local Y along its width. Rotation is measured
//! in degrees, clockwise in screen coordinates, about the local origin: a
//! positive rotation turns local +X towards local +Y.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};

/// World placement of a bed: position of its local origin and its rotation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedTransform {
    pub x: f64,
    pub y: f64,
    /// Clockwise rotation in degrees. Not required to lie in `[0, 360)`.
    pub rotation_deg: f64,
}

impl BedTransform {
    /// Creates a new transform.
    pub fn new(x: f64, y: f64, rotation_deg: f64) -> Self {
        Self { x, y, rotation_deg }
    }

    /// Converts a bed-local point to world coordinates.
    pub fn to_world(&self, local: Point) -> Point {
        bed_to_world(local, self)
    }

    /// Converts a world point to bed-local coordinates.
    pub fn to_local(&self, world: Point) -> Point {
        world_to_bed(world, self)
    }
}

/// Converts degrees to radians.
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Converts radians to degrees.
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Reduces any angle in degrees into `[0, 360)` using floored modulo.
pub fn normalize_angle(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        // folds -0.0 into 0.0
        normalized + 0.0
    }
}

/// Transforms a point from bed-local coordinates to world coordinates.
pub fn bed_to_world(local: Point, transform: &BedTransform) -> Point {
    let rad = degrees_to_radians(transform.rotation_deg);
    let (sin, cos) = rad.sin_cos();
    Point::new(
        transform.x + local.x * cos - local.y * sin,
        transform.y + local.x * sin + local.y * cos,
    )
}

/// Transforms a point from world coordinates to bed-local coordinates.
///
/// Exact inverse of [`bed_to_world`].
pub fn world_to_bed(world: Point, transform: &BedTransform) -> Point {
    let rad = degrees_to_radians(-transform.rotation_deg);
    let (sin, cos) = rad.sin_cos();
    let dx = world.x - transform.x;
    let dy = world.y - transform.y;
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Returns the four corners of a bed in world coordinates.
///
/// Order is local `(0,0)`, `(height,0)`, `(height,width)`, `(0,width)`:
/// top-left, top-right, bottom-right, bottom-left for an unrotated bed.
pub fn bed_corners(width: f64, height: f64, transform: &BedTransform) -> [Point; 4] {
    [
        Point::new(0.0, 0.0),
        Point::new(height, 0.0),
        Point::new(height, width),
        Point::new(0.0, width),
    ]
    .map(|corner| bed_to_world(corner, transform))
}

/// Checks whether a world point lies inside a bed. Edges count as inside.
pub fn is_point_in_bed(point: Point, width: f64, height: f64, transform: &BedTransform) -> bool {
    let local = world_to_bed(point, transform);
    local.x >= 0.0 && local.x <= height && local.y >= 0.0 && local.y <= width
}

/// Axis-aligned world bounding box of a possibly rotated bed.
pub fn bed_bounding_box(width: f64, height: f64, transform: &BedTransform) -> BoundingBox {
    let [first, rest @ ..] = bed_corners(width, height, transform);
    rest.into_iter()
        .fold(BoundingBox::around(first), BoundingBox::expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn angle_conversions() {
        assert_eq!(degrees_to_radians(0.0), 0.0);
        assert!(close(degrees_to_radians(90.0), PI / 2.0));
        assert!(close(degrees_to_radians(360.0), 2.0 * PI));
        assert_eq!(radians_to_degrees(0.0), 0.0);
        assert!(close(radians_to_degrees(PI), 180.0));
        assert!(close(radians_to_degrees(degrees_to_radians(-725.5)), -725.5));
    }

    #[test]
    fn normalize_keeps_range() {
        assert_eq!(normalize_angle(45.0), 45.0);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert_eq!(normalize_angle(359.0), 359.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(450.0), 90.0);
        assert_eq!(normalize_angle(720.0), 0.0);
    }

    #[test]
    fn normalize_negative_angles() {
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(-180.0), 180.0);
        let zero = normalize_angle(-360.0);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
        let tiny = normalize_angle(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn unrotated_translation() {
        let t = BedTransform::new(5.0, 10.0, 0.0);
        assert_eq!(bed_to_world(Point::new(0.0, 0.0), &t), Point::new(5.0, 10.0));
        let p = bed_to_world(Point::new(2.0, 3.0), &t);
        assert!(close(p.x, 7.0) && close(p.y, 13.0));
        let back = world_to_bed(Point::new(5.0, 10.0), &t);
        assert!(close(back.x, 0.0) && close(back.y, 0.0));
    }

    #[test]
    fn clockwise_rotation_turns_x_towards_y() {
        let p = bed_to_world(Point::new(1.0, 0.0), &BedTransform::new(0.0, 0.0, 90.0));
        assert!(close(p.x, 0.0) && close(p.y, 1.0));
        let p = bed_to_world(Point::new(1.0, 0.0), &BedTransform::new(0.0, 0.0, 180.0));
        assert!(close(p.x, -1.0) && close(p.y, 0.0));
    }

    #[test]
    fn round_trip() {
        let t = BedTransform::new(3.0, 7.0, 45.0);
        let local = Point::new(2.0, 1.0);
        let back = t.to_local(t.to_world(local));
        assert!(close(back.x, local.x));
        assert!(close(back.y, local.y));
    }

    #[test]
    fn corners_unrotated() {
        let corners = bed_corners(2.0, 4.0, &BedTransform::default());
        assert_eq!(
            corners,
            [
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 2.0),
                Point::new(0.0, 2.0),
            ]
        );
    }

    #[test]
    fn corners_quarter_turn() {
        let corners = bed_corners(2.0, 4.0, &BedTransform::new(0.0, 0.0, 90.0));
        assert!(close(corners[0].x, 0.0) && close(corners[0].y, 0.0));
        assert!(close(corners[1].x, 0.0) && close(corners[1].y, 4.0));
        assert!(close(corners[2].x, -2.0) && close(corners[2].y, 4.0));
    }

    #[test]
    fn point_containment() {
        let t = BedTransform::default();
        assert!(is_point_in_bed(Point::new(1.0, 1.0), 2.0, 4.0, &t));
        assert!(!is_point_in_bed(Point::new(10.0, 10.0), 2.0, 4.0, &t));
        assert!(is_point_in_bed(Point::new(0.0, 0.0), 2.0, 4.0, &t));
        assert!(is_point_in_bed(Point::new(4.0, 2.0), 2.0, 4.0, &t));
        // y = 3.0 lies past the bed width
        assert!(!is_point_in_bed(Point::new(1.0, 3.0), 2.0, 4.0, &t));
    }

    #[test]
    fn bounding_box_unrotated() {
        let bbox = bed_bounding_box(2.0, 4.0, &BedTransform::new(1.0, 1.0, 0.0));
        assert!(close(bbox.min_x, 1.0));
        assert!(close(bbox.min_y, 1.0));
        assert!(close(bbox.max_x, 5.0));
        assert!(close(bbox.max_y, 3.0));
    }

    #[test]
    fn bounding_box_grows_when_rotated() {
        let flat = bed_bounding_box(2.0, 4.0, &BedTransform::default());
        let bbox = bed_bounding_box(2.0, 4.0, &BedTransform::new(0.0, 0.0, 45.0));
        assert!(bbox.min_x < 0.0);
        assert!(bbox.max_x > 2.8);
        assert!(bbox.max_y > 2.8);
        assert!(bbox.width() > flat.width());
        assert!(bbox.height() > flat.height());
    }

    #[test]
    fn zero_extent_collapses_to_origin() {
        let t = BedTransform::new(1.0, 1.0, 30.0);
        for c in bed_corners(0.0, 0.0, &t) {
            assert!(close(c.x, 1.0) && close(c.y, 1.0));
        }
        let bbox = bed_bounding_box(0.0, 0.0, &t);
        assert!(close(bbox.width(), 0.0) && close(bbox.height(), 0.0));
        assert!(close(bbox.min_x, 1.0) && close(bbox.min_y, 1.0));
        assert!(is_point_in_bed(Point::new(1.0, 1.0), 0.0, 0.0, &t));
        assert!(!is_point_in_bed(Point::new(1.1, 1.0), 0.0, 0.0, &t));
    }

    #[test]
    fn zero_width_bed_is_a_segment() {
        let t = BedTransform::default();
        let bbox = bed_bounding_box(0.0, 3.0, &t);
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 3.0, 0.0));
        assert!(is_point_in_bed(Point::new(1.5, 0.0), 0.0, 3.0, &t));
        assert!(!is_point_in_bed(Point::new(1.5, 0.1), 0.0, 3.0, &t));
    }
}
