//! Planner configuration.
//!
//! Settings are read from `allotment.toml` and may be overridden by
//! `ALLOTMENT_*` environment variables. Every field has a default, so a
//! missing file or section falls back silently.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::snap::{DEFAULT_PIXELS_PER_METER, DEFAULT_SNAP_STEP_DEG, DEFAULT_SNAP_THRESHOLD_DEG};

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "allotment.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PlannerConfig {
    /// Rotation snapping.
    pub snap: SnapConfig,
    /// Output formatting.
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Angle increment in degrees.
    pub step_deg: f64,
    /// Maximum distance in degrees from an increment that still snaps.
    pub threshold_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Decimal places for printed coordinates.
    pub precision: usize,
    /// Canvas scale.
    pub pixels_per_meter: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            step_deg: DEFAULT_SNAP_STEP_DEG,
            threshold_deg: DEFAULT_SNAP_THRESHOLD_DEG,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            precision: 3,
            pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        }
    }
}

impl PlannerConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Loads `allotment.toml` from the working directory, or the defaults
    /// when it does not exist.
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::load_from_file(DEFAULT_CONFIG_FILE)
        } else {
            Ok(Self::default())
        }
    }

    /// Applies `ALLOTMENT_*` environment overrides. Unparseable values are
    /// ignored with a warning.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    fn merge_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(key: &str, value: Option<String>) -> Option<T> {
            let value = value?;
            match value.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    log::warn!("ignoring {}={:?}: not a valid value", key, value);
                    None
                }
            }
        }

        if let Some(v) = parsed("ALLOTMENT_SNAP_STEP", lookup("ALLOTMENT_SNAP_STEP")) {
            self.snap.step_deg = v;
        }
        if let Some(v) = parsed("ALLOTMENT_SNAP_THRESHOLD", lookup("ALLOTMENT_SNAP_THRESHOLD")) {
            self.snap.threshold_deg = v;
        }
        if let Some(v) = parsed("ALLOTMENT_PRECISION", lookup("ALLOTMENT_PRECISION")) {
            self.display.precision = v;
        }
        if let Some(v) = parsed(
            "ALLOTMENT_PIXELS_PER_METER",
            lookup("ALLOTMENT_PIXELS_PER_METER"),
        ) {
            self.display.pixels_per_meter = v;
        }
    }
}
