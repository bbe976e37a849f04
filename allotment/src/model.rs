//! Plot, bed, season and section plan records.
//!
//! These mirror the records the planner's storage and API layers exchange.
//! Geometry questions are answered by delegating to [`crate::transforms`] and
//! [`crate::sections`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point};
use crate::sections::{length_split_sections, optimal_cut_position, Section};
use crate::transforms::{bed_bounding_box, bed_corners, is_point_in_bed, BedTransform};

/// Smallest distance kept between a moved cut and either end of the bed.
pub const CUT_EDGE_MARGIN: f64 = 0.1;

/// Measurement units of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Meters,
    Feet,
}

/// Shape of a plot boundary. Only rectangles are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryType {
    #[default]
    Rect,
}

/// Size of a rectangular plot, with its origin at world `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBoundary {
    pub width: f64,
    pub height: f64,
}

impl PlotBoundary {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }
}

/// A rectangular planting area placed within a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    pub id: String,
    #[serde(default)]
    pub plot_id: String,
    pub name: String,
    pub x: f64,
    pub y: f64,
    /// Extent along local Y.
    pub width: f64,
    /// Extent along local X, the bed's length.
    pub height: f64,
    #[serde(default)]
    pub rotation_deg: f64,
    #[serde(default)]
    pub is_locked: bool,
}

impl Bed {
    pub fn new(id: &str, name: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            plot_id: String::new(),
            name: name.to_string(),
            x,
            y,
            width,
            height,
            rotation_deg: 0.0,
            is_locked: false,
        }
    }

    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn transform(&self) -> BedTransform {
        BedTransform::new(self.x, self.y, self.rotation_deg)
    }

    /// World corners in local order `(0,0)`, `(h,0)`, `(h,w)`, `(0,w)`.
    pub fn corners(&self) -> [Point; 4] {
        bed_corners(self.width, self.height, &self.transform())
    }

    pub fn bounding_box(&self) -> BoundingBox {
        bed_bounding_box(self.width, self.height, &self.transform())
    }

    /// Returns `true` when the world point hits this bed.
    pub fn contains(&self, point: Point) -> bool {
        is_point_in_bed(point, self.width, self.height, &self.transform())
    }

    /// Footprint in square metres; rotation does not change it.
    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Only mode of subdividing a bed: cuts across its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMode {
    #[default]
    LengthSplits,
}

/// Cut positions along a bed's length, in metres from its local origin.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LengthSplitDefinition {
    pub cuts: Vec<f64>,
}

impl LengthSplitDefinition {
    pub fn new(cuts: Vec<f64>) -> Self {
        Self { cuts }
    }

    /// Adds a cut in the middle of the largest gap and keeps cuts sorted.
    pub fn with_added_cut(&self, bed_height: f64) -> Self {
        let mut cuts = self.cuts.clone();
        cuts.push(optimal_cut_position(bed_height, &self.cuts));
        cuts.sort_by(f64::total_cmp);
        Self { cuts }
    }

    /// Removes the cut at `index`. Out of range indices leave the cuts as they are.
    pub fn with_removed_cut(&self, index: usize) -> Self {
        let mut cuts = self.cuts.clone();
        if index < cuts.len() {
            cuts.remove(index);
        }
        Self { cuts }
    }

    /// Moves the cut at `index` to `value`, clamped to
    /// `[CUT_EDGE_MARGIN, bed_height - CUT_EDGE_MARGIN]`, then re-sorts.
    pub fn with_moved_cut(&self, index: usize, value: f64, bed_height: f64) -> Self {
        let mut cuts = self.cuts.clone();
        if let Some(cut) = cuts.get_mut(index) {
            *cut = CUT_EDGE_MARGIN.max(value.min(bed_height - CUT_EDGE_MARGIN));
            cuts.sort_by(f64::total_cmp);
        }
        Self { cuts }
    }
}

/// How one bed is subdivided during one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BedSectionPlan {
    pub id: String,
    #[serde(default)]
    pub season_id: String,
    pub bed_id: String,
    #[serde(default)]
    pub mode: SectionMode,
    #[serde(default)]
    pub definition: LengthSplitDefinition,
}

impl BedSectionPlan {
    pub fn new(id: &str, season_id: &str, bed_id: &str, cuts: Vec<f64>) -> Self {
        Self {
            id: id.to_string(),
            season_id: season_id.to_string(),
            bed_id: bed_id.to_string(),
            mode: SectionMode::LengthSplits,
            definition: LengthSplitDefinition::new(cuts),
        }
    }

    /// Sections of `bed` under this plan.
    pub fn sections(&self, bed: &Bed) -> Vec<Section> {
        match self.mode {
            SectionMode::LengthSplits => {
                length_split_sections(bed.width, bed.height, &self.definition.cuts, &self.id, &bed.id)
            }
        }
    }
}

/// A time-bounded growing period of a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,
    #[serde(default)]
    pub plot_id: String,
    pub label: String,
    /// `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// `YYYY-MM-DD`, on or after `start_date`.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub bed_section_plans: Vec<BedSectionPlan>,
}

impl Season {
    pub fn new(id: &str, label: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.to_string(),
            plot_id: String::new(),
            label: label.to_string(),
            start_date,
            end_date,
            bed_section_plans: Vec::new(),
        }
    }

    pub fn plan_for_bed(&self, bed_id: &str) -> Option<&BedSectionPlan> {
        self.bed_section_plans.iter().find(|p| p.bed_id == bed_id)
    }

    pub fn plan_for_bed_mut(&mut self, bed_id: &str) -> Option<&mut BedSectionPlan> {
        self.bed_section_plans.iter_mut().find(|p| p.bed_id == bed_id)
    }

    /// Returns `true` when `date` falls within the season, both ends inclusive.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// The outer rectangle holding beds, together with its seasons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub boundary_type: BoundaryType,
    pub boundary: PlotBoundary,
    #[serde(default)]
    pub beds: Vec<Bed>,
    #[serde(default)]
    pub seasons: Vec<Season>,
}

impl Plot {
    pub fn new(id: &str, name: &str, width: f64, height: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            units: Units::Meters,
            boundary_type: BoundaryType::Rect,
            boundary: PlotBoundary { width, height },
            beds: Vec::new(),
            seasons: Vec::new(),
        }
    }

    pub fn bed(&self, id: &str) -> Option<&Bed> {
        self.beds.iter().find(|b| b.id == id)
    }

    pub fn season(&self, id: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.id == id)
    }

    pub fn season_mut(&mut self, id: &str) -> Option<&mut Season> {
        self.seasons.iter_mut().find(|s| s.id == id)
    }

    /// Topmost bed under a world point. Later beds are drawn above earlier ones.
    pub fn bed_at(&self, point: Point) -> Option<&Bed> {
        self.beds.iter().rev().find(|b| b.contains(point))
    }

    /// Beds whose rotated footprint leaves the plot boundary.
    pub fn beds_outside_boundary(&self) -> Vec<&Bed> {
        let bounds = self.boundary.bounding_box();
        self.beds
            .iter()
            .filter(|b| !bounds.contains_box(&b.bounding_box()))
            .collect()
    }

    /// Sections of every bed that has a plan in `season_id`, in bed order.
    pub fn season_sections(&self, season_id: &str) -> Option<Vec<(&Bed, Vec<Section>)>> {
        let season = self.season(season_id)?;
        Some(
            self.beds
                .iter()
                .filter_map(|bed| {
                    season
                        .plan_for_bed(&bed.id)
                        .map(|plan| (bed, plan.sections(bed)))
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_plot() -> Plot {
        let mut plot = Plot::new("plot-1", "Allotment 7", 10.0, 8.0);
        plot.beds.push(Bed::new("bed-a", "Carrots", 1.0, 1.0, 1.2, 3.0));
        plot.beds.push(Bed::new("bed-b", "Beans", 2.0, 1.5, 1.0, 2.0));
        plot.beds
            .push(Bed::new("bed-c", "Squash", 9.0, 1.0, 1.0, 2.0).with_rotation(30.0));
        let mut season = Season::new("s-1", "Spring", date("2025-03-01"), date("2025-06-30"));
        season
            .bed_section_plans
            .push(BedSectionPlan::new("plan-1", "s-1", "bed-a", vec![1.0, 2.0]));
        plot.seasons.push(season);
        plot
    }

    #[test]
    fn bed_hit_test_prefers_topmost() {
        let plot = sample_plot();
        // inside both bed-a and bed-b
        assert_eq!(plot.bed_at(Point::new(2.5, 2.0)).unwrap().id, "bed-b");
        assert_eq!(plot.bed_at(Point::new(1.5, 1.5)).unwrap().id, "bed-a");
        assert!(plot.bed_at(Point::new(7.0, 7.0)).is_none());
    }

    #[test]
    fn bed_area_ignores_rotation() {
        let bed = Bed::new("b", "Leeks", 0.0, 0.0, 1.2, 3.0);
        assert!((bed.area() - 3.6).abs() < 1e-9);
        assert_eq!(bed.clone().with_rotation(45.0).area(), bed.area());
    }

    #[test]
    fn detects_beds_outside_boundary() {
        let plot = sample_plot();
        let outside: Vec<&str> = plot
            .beds_outside_boundary()
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(outside, vec!["bed-c"]);
    }

    #[test]
    fn plan_sections_use_bed_extent() {
        let plot = sample_plot();
        let per_bed = plot.season_sections("s-1").unwrap();
        assert_eq!(per_bed.len(), 1);
        let (bed, sections) = &per_bed[0];
        assert_eq!(bed.id, "bed-a");
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[2].bounds_local.x1, 3.0);
        assert_eq!(sections[2].bounds_local.y1, 1.2);
        assert!(plot.season_sections("missing").is_none());
    }

    #[test]
    fn season_dates_inclusive() {
        let plot = sample_plot();
        let season = plot.season("s-1").unwrap();
        assert!(season.contains_date(date("2025-03-01")));
        assert!(season.contains_date(date("2025-06-30")));
        assert!(!season.contains_date(date("2025-07-01")));
    }

    #[test]
    fn add_cut_uses_largest_gap() {
        let def = LengthSplitDefinition::new(vec![1.0]);
        let def = def.with_added_cut(3.0);
        assert_eq!(def.cuts, vec![1.0, 2.0]);
        let def = def.with_added_cut(3.0);
        assert_eq!(def.cuts, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn remove_cut_ignores_bad_index() {
        let def = LengthSplitDefinition::new(vec![0.5, 1.0, 2.0]);
        assert_eq!(def.with_removed_cut(1).cuts, vec![0.5, 2.0]);
        assert_eq!(def.with_removed_cut(9).cuts, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn moved_cut_is_clamped_and_sorted() {
        let def = LengthSplitDefinition::new(vec![1.0, 2.0]);
        assert_eq!(def.with_moved_cut(1, 0.5, 3.0).cuts, vec![0.5, 1.0]);
        assert_eq!(def.with_moved_cut(0, -3.0, 3.0).cuts, vec![0.1, 2.0]);
        let moved = def.with_moved_cut(0, 5.0, 3.0);
        assert_eq!(moved.cuts[0], 2.0);
        assert!((moved.cuts[1] - 2.9).abs() < 1e-12);
        assert_eq!(def.with_moved_cut(4, 1.5, 3.0), def);
    }

    #[test]
    fn serde_uses_camel_case() {
        let bed = Bed::new("b", "Herbs", 0.5, 0.5, 1.0, 2.0).with_rotation(90.0);
        let json = serde_json::to_value(&bed).unwrap();
        assert_eq!(json["rotationDeg"], 90.0);
        assert_eq!(json["isLocked"], false);
        let plan = BedSectionPlan::new("p", "s", "b", vec![1.0]);
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["mode"], "length_splits");
        assert_eq!(json["definition"]["cuts"][0], 1.0);
    }
}
