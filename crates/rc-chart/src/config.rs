//! Chart configuration.
//!
//! Every field has a default, so a JSON file only needs the values it
//! changes:
//!
//! ```json
//! { "cell_size": 24, "ramp": [{ "pace": 330, "color": "#2b8cbe" }, { "pace": 270, "color": "#e34a33" }] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calendar::MONTHS_PER_YEAR;
use crate::error::{ChartError, Result};
use crate::pace::ColorRamp;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for `draw_calendar`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    /// Side of one day cell in user units. Default: **20**.
    pub cell_size: f64,

    /// Month labels, January first.
    pub month_names: [String; MONTHS_PER_YEAR],

    /// Day-cell fill per month, January first.
    pub month_colors: [String; MONTHS_PER_YEAR],

    /// Pace → marker colour breakpoints, slowest first.
    pub ramp: ColorRamp,

    /// Marker fill when a run has no pace colour (unknown duration, or
    /// faster than the ramp).
    pub no_pace_color: String,

    /// Marker `fill-opacity`. Default: **0.8**.
    pub marker_opacity: f64,

    pub font_family: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            month_names: [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]
            .map(String::from),
            month_colors: [
                "#DEEBF7", "#C6DBEF", "#E5F5E0", "#C7E9C0", "#FFF7BC", "#FEE391",
                "#FDD0A2", "#FDAE6B", "#FCBBA1", "#FC9272", "#EFEDF5", "#DADAEB",
            ]
            .map(String::from),
            ramp: ColorRamp::default(),
            no_pace_color: "#969696".into(),
            marker_opacity: 0.8,
            font_family: "sans-serif".into(),
        }
    }
}

impl ChartConfig {
    /// Parse a (partial) JSON configuration and validate it.
    ///
    /// # Errors
    /// Returns [`ChartError::JsonParse`] for malformed JSON or unknown keys,
    /// and [`ChartError::Config`] for out-of-range values.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ChartError::FileRead`] if the file cannot be read, otherwise
    /// as [`ChartConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ChartError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading chart config from {}", path.display());
        Self::from_json(&text)
    }

    /// # Errors
    /// Returns [`ChartError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 1.0 {
            return Err(ChartError::Config(format!(
                "cell_size must be greater than 1, got {}",
                self.cell_size
            )));
        }
        if !(0.0..=1.0).contains(&self.marker_opacity) {
            return Err(ChartError::Config(format!(
                "marker_opacity must be within 0..=1, got {}",
                self.marker_opacity
            )));
        }
        self.ramp.validate()
    }
}
