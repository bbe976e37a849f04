//! Core library for the allotment planner.
//!
//! The geometric heart of the crate lives in [`transforms`] (bed-local and
//! world coordinate conversion) and [`sections`] (lengthwise bed sections
//! derived from cut positions). Both are pure functions over plain values.

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod model;
pub mod sections;
pub mod snap;
pub mod transforms;
pub mod validation;

pub use error::{PlannerError, Result};
pub use geometry::{BoundingBox, Point};
pub use sections::{
    length_split_sections, optimal_cut_position, section_name, Section, SectionBounds,
};
pub use transforms::{
    bed_bounding_box, bed_corners, bed_to_world, degrees_to_radians, is_point_in_bed,
    normalize_angle, radians_to_degrees, world_to_bed, BedTransform,
};
