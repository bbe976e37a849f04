//! Lengthwise bed sections derived from cut positions.
//!
//! A cut is a distance along the bed's length (local X). Sections span the
//! full bed width and are bounded by consecutive cuts, with the bed's two
//! short edges as the outermost boundaries.

use serde::{Deserialize, Serialize};

/// Bounds of a section in the bed-local frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    /// Start along length.
    pub x0: f64,
    /// End along length.
    pub x1: f64,
    /// Start along width, always 0.
    pub y0: f64,
    /// End along width, always the bed width.
    pub y1: f64,
}

impl SectionBounds {
    /// Extent along the bed's length.
    pub fn length(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Planting area of the section.
    pub fn area(&self) -> f64 {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }
}

/// One section of a bed for a given section plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// `"{bed_section_plan_id}-{index}"`.
    pub id: String,
    pub bed_section_plan_id: String,
    pub bed_id: String,
    pub index: usize,
    pub name: String,
    pub bounds_local: SectionBounds,
}

impl Section {
    /// Display label, e.g. `"Section A"`.
    pub fn label(&self) -> String {
        format!("Section {}", self.name)
    }
}

/// Computes the sections of a bed split lengthwise at `cuts`.
///
/// Cuts outside the open interval `(0, bed_height)` are ignored. The rest are
/// sorted, so input order does not matter. Duplicate cuts are kept and give a
/// zero-length section. The result always holds `valid_cuts + 1` sections.
pub fn length_split_sections(
    bed_width: f64,
    bed_height: f64,
    cuts: &[f64],
    bed_section_plan_id: &str,
    bed_id: &str,
) -> Vec<Section> {
    let mut valid_cuts: Vec<f64> = cuts
        .iter()
        .copied()
        .filter(|&c| c > 0.0 && c < bed_height)
        .collect();
    if valid_cuts.len() != cuts.len() {
        log::debug!(
            "plan {}: ignoring {} cut(s) outside (0, {})",
            bed_section_plan_id,
            cuts.len() - valid_cuts.len(),
            bed_height
        );
    }
    valid_cuts.sort_by(f64::total_cmp);

    let mut boundaries = Vec::with_capacity(valid_cuts.len() + 2);
    boundaries.push(0.0);
    boundaries.extend(valid_cuts);
    boundaries.push(bed_height);

    boundaries
        .windows(2)
        .enumerate()
        .map(|(index, pair)| Section {
            id: format!("{}-{}", bed_section_plan_id, index),
            bed_section_plan_id: bed_section_plan_id.to_string(),
            bed_id: bed_id.to_string(),
            index,
            name: section_name(index),
            bounds_local: SectionBounds {
                x0: pair[0],
                x1: pair[1],
                y0: 0.0,
                y1: bed_width,
            },
        })
        .collect()
}

fn letter(offset: usize) -> char {
    u32::try_from(offset)
        .ok()
        .and_then(|o| o.checked_add(u32::from(b'A')))
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Letter name for a zero-based section index.
///
/// `0..26` map to `A..Z`. Larger indices use two letters where the high
/// letter is `index / 26 - 1`, so 26 is `AA` and 27 is `AB`. From index 702
/// on the high letter runs past `Z`.
pub fn section_name(index: usize) -> String {
    if index < 26 {
        return letter(index).to_string();
    }
    let first = index / 26 - 1;
    let second = index % 26;
    [letter(first), letter(second)].iter().collect()
}

/// Suggests where to add the next cut: the midpoint of the largest gap.
///
/// Unlike [`length_split_sections`], existing cuts are not range filtered.
/// Ties go to the first gap along the bed. The result is rounded to two
/// decimal places.
pub fn optimal_cut_position(bed_height: f64, existing_cuts: &[f64]) -> f64 {
    let mut sorted_cuts = existing_cuts.to_vec();
    sorted_cuts.sort_by(f64::total_cmp);

    let mut boundaries = Vec::with_capacity(sorted_cuts.len() + 2);
    boundaries.push(0.0);
    boundaries.extend(sorted_cuts);
    boundaries.push(bed_height);

    let mut max_gap = 0.0;
    let mut gap_start = 0.0;
    let mut gap_end = bed_height;
    for pair in boundaries.windows(2) {
        let gap = pair[1] - pair[0];
        if gap > max_gap {
            max_gap = gap;
            gap_start = pair[0];
            gap_end = pair[1];
        }
    }

    round_to_centimetres((gap_start + gap_end) / 2.0)
}

fn round_to_centimetres(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
