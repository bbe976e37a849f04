//! Error type for document loading, validation and configuration.
//!
//! The geometry in [`crate::transforms`] and [`crate::sections`] is total and
//! never produces these.

use thiserror::Error;

/// Result type for planner operations that can fail.
pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// A field failed a validation rule.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// A section plan or lookup referenced a bed the plot does not have.
    #[error("unknown bed: {0}")]
    UnknownBed(String),

    /// Lookup of a season the plot does not have.
    #[error("unknown season: {0}")]
    UnknownSeason(String),

    /// More than one section plan for the same bed within a season.
    #[error("season {season_id} has more than one section plan for bed {bed_id}")]
    DuplicatePlan { season_id: String, bed_id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl PlannerError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
