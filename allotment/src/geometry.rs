//! Basic 2D geometry primitives shared by the planner.

use serde::{Deserialize, Serialize};

/// Representation of a 2D point in metres.
///
/// Whether the point is in a bed's local frame or the world frame is decided
/// by the function it is passed to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a box from its corner extents.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Zero-size box at a single point.
    pub fn around(p: Point) -> Self {
        Self::new(p.x, p.y, p.x, p.y)
    }

    /// Returns this box grown just enough to include `p`.
    pub fn expanded(self, p: Point) -> Self {
        Self::new(
            self.min_x.min(p.x),
            self.min_y.min(p.y),
            self.max_x.max(p.x),
            self.max_y.max(p.y),
        )
    }

    /// Extent along X.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along Y.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns `true` when `other` lies entirely inside this box (edges inclusive).
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}
