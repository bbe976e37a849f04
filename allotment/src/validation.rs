//! Input rules for plot documents.
//!
//! The geometry functions accept any real input. These checks sit in front of
//! them for data arriving from users or files, with the same limits the
//! planner's API applies.

use std::collections::HashSet;

use crate::error::{PlannerError, Result};
use crate::model::{Bed, Plot, Season};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_BED_SIZE: f64 = 100.0;
pub const MAX_PLOT_SIZE: f64 = 1000.0;

fn check_name(field: &str, name: &str) -> Result<()> {
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(PlannerError::validation(
            field,
            format!("must be 1 to {} characters, got {}", MAX_NAME_LEN, len),
        ));
    }
    Ok(())
}

fn check_size(field: &str, value: f64, max: f64) -> Result<()> {
    if !(value > 0.0 && value <= max) {
        return Err(PlannerError::validation(
            field,
            format!("must be in (0, {}], got {}", max, value),
        ));
    }
    Ok(())
}

pub fn validate_bed(bed: &Bed) -> Result<()> {
    check_name("bed name", &bed.name)?;
    if !(bed.x >= 0.0) {
        return Err(PlannerError::validation("bed x", format!("must be >= 0, got {}", bed.x)));
    }
    if !(bed.y >= 0.0) {
        return Err(PlannerError::validation("bed y", format!("must be >= 0, got {}", bed.y)));
    }
    check_size("bed width", bed.width, MAX_BED_SIZE)?;
    check_size("bed height", bed.height, MAX_BED_SIZE)?;
    if !(0.0..=360.0).contains(&bed.rotation_deg) {
        return Err(PlannerError::validation(
            "bed rotation",
            format!("must be in [0, 360], got {}", bed.rotation_deg),
        ));
    }
    Ok(())
}

/// Checks the plot's own fields; beds and seasons are not visited.
pub fn validate_plot(plot: &Plot) -> Result<()> {
    check_name("plot name", &plot.name)?;
    check_size("plot width", plot.boundary.width, MAX_PLOT_SIZE)?;
    check_size("plot height", plot.boundary.height, MAX_PLOT_SIZE)
}

pub fn validate_season(season: &Season) -> Result<()> {
    check_name("season label", &season.label)?;
    if season.start_date > season.end_date {
        return Err(PlannerError::validation(
            "season end date",
            "must be on or after the start date",
        ));
    }
    Ok(())
}

/// Cuts must be non-negative and strictly increasing.
pub fn validate_cuts(cuts: &[f64]) -> Result<()> {
    if let Some(c) = cuts.iter().find(|c| !(**c >= 0.0)) {
        return Err(PlannerError::validation(
            "cuts",
            format!("must be non-negative, got {}", c),
        ));
    }
    if cuts.windows(2).any(|pair| pair[1] <= pair[0]) {
        return Err(PlannerError::validation(
            "cuts",
            "must be monotonically increasing",
        ));
    }
    Ok(())
}

/// Validates a whole plot document, including cross references between
/// seasons, plans and beds.
pub fn validate_plot_document(plot: &Plot) -> Result<()> {
    validate_plot(plot)?;
    for bed in &plot.beds {
        validate_bed(bed)?;
    }
    for season in &plot.seasons {
        validate_season(season)?;
        let mut seen = HashSet::new();
        for plan in &season.bed_section_plans {
            if plot.bed(&plan.bed_id).is_none() {
                return Err(PlannerError::UnknownBed(plan.bed_id.clone()));
            }
            if !seen.insert(plan.bed_id.as_str()) {
                return Err(PlannerError::DuplicatePlan {
                    season_id: season.id.clone(),
                    bed_id: plan.bed_id.clone(),
                });
            }
            validate_cuts(&plan.definition.cuts)?;
        }
    }
    Ok(())
}
