//! Editor preferences
//!
//! [`EditorConfig`] is persisted as YAML. Every field has a default, so
//! partial or older files still load; values are range-checked through the
//! `validated_*` accessors rather than on deserialization.
//!
//! ```ignore
//! use eqcurve_core::config::{default_config_path, load_config, save_config, EditorConfig};
//!
//! let path = default_config_path();
//! let mut config: EditorConfig = load_config(&path);
//! config.editor_height = 320.0;
//! save_config(&config, &path)?;
//! ```

mod io;
mod paths;

pub use io::{load_config, save_config};
pub use paths::{config_dir, default_config_path, EDITOR_CONFIG_FILE};

use crate::axis::{clamp_gain_range, DEFAULT_GAIN_RANGE_DB};
use crate::curve::DEFAULT_TENSION;
use crate::grid::DEFAULT_THUMB_SIZE;
use serde::{Deserialize, Serialize};

/// Height limits of the editor canvas (px)
pub const MIN_EDITOR_HEIGHT: f64 = 150.0;
pub const MAX_EDITOR_HEIGHT: f64 = 600.0;
pub const DEFAULT_EDITOR_HEIGHT: f64 = 200.0;

/// Clamp an editor height to [150, 600]; non-finite heights give the default
pub fn clamp_editor_height(height: f64) -> f64 {
    if height.is_finite() {
        height.clamp(MIN_EDITOR_HEIGHT, MAX_EDITOR_HEIGHT)
    } else {
        DEFAULT_EDITOR_HEIGHT
    }
}

/// User preferences for the curve editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas height in px
    /// Default: 200, valid range 150 - 600
    pub editor_height: f64,

    /// Draw the curve as true cubic segments; when off the curve is
    /// flattened into a coarse polyline
    /// Default: false
    pub high_quality: bool,

    /// Initial symmetric gain range in dB
    /// Default: 24
    pub default_gain_range_db: f64,

    /// Thumb edge length in px
    /// Default: 14
    pub thumb_size: f64,

    /// Spline tension (0.5 is the standard Catmull-Rom look)
    pub spline_tension: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editor_height: DEFAULT_EDITOR_HEIGHT,
            high_quality: false,
            default_gain_range_db: DEFAULT_GAIN_RANGE_DB,
            thumb_size: DEFAULT_THUMB_SIZE,
            spline_tension: DEFAULT_TENSION,
        }
    }
}

impl EditorConfig {
    /// Editor height clamped to [150, 600]
    pub fn validated_editor_height(&self) -> f64 {
        clamp_editor_height(self.editor_height)
    }

    /// Gain range clamped to the zoom limits
    pub fn validated_gain_range(&self) -> f64 {
        clamp_gain_range(self.default_gain_range_db)
    }

    pub fn validated_thumb_size(&self) -> f64 {
        if self.thumb_size.is_finite() && self.thumb_size >= 4.0 {
            self.thumb_size.min(64.0)
        } else {
            DEFAULT_THUMB_SIZE
        }
    }

    pub fn validated_tension(&self) -> f64 {
        if self.spline_tension.is_finite() {
            self.spline_tension.clamp(0.0, 1.0)
        } else {
            DEFAULT_TENSION
        }
    }
}
