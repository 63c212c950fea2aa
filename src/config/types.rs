//! Configuration type definitions.

use super::enums::ColorSpec;
use serde::{Deserialize, Serialize};

/// Canvas dimensions and background.
#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 320 - 7680)
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 240 - 4320)
    #[serde(default = "default_height")]
    pub height: u32,

    /// Background color - either a named color or an RGB array like
    /// `[0, 0, 0]`. Erase strokes paint with this color.
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Drawing-related settings.
///
/// Controls the pen defaults when a session starts. The pen color can be
/// changed at runtime with finger gestures or through the control plane.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default pen color - either a palette name (red, blue, green, yellow,
    /// purple, white) or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen thickness in pixels (valid range: 2 - 30)
    #[serde(default = "default_thickness")]
    pub default_thickness: u32,

    /// Eraser thickness in pixels (valid range: 10 - 200)
    #[serde(default = "default_eraser_thickness")]
    pub eraser_thickness: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            eraser_thickness: default_eraser_thickness(),
        }
    }
}

/// Shape recognition thresholds.
///
/// Most users won't need to change these from their defaults; they trade
/// recognition eagerness against false positives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// Minimum stroke length, in points, before classification is attempted
    /// (valid range: 3 - 100)
    #[serde(default = "default_min_points")]
    pub min_points: usize,

    /// Maximum mean residual, in pixels, for a stroke to count as a
    /// straight line (valid range: 1.0 - 200.0)
    #[serde(default = "default_line_error_threshold")]
    pub line_error_threshold: f64,

    /// Maximum radial standard deviation, as a fraction of the mean radius,
    /// for a closed stroke to count as a circle (valid range: 0.01 - 1.0)
    #[serde(default = "default_circle_std_threshold")]
    pub circle_std_threshold: f64,

    /// Hull simplification tolerance as a fraction of the hull perimeter
    /// (valid range: 0.005 - 0.2)
    #[serde(default = "default_polygon_epsilon")]
    pub polygon_epsilon: f64,

    /// Maximum side-length standard deviation, as a fraction of the mean
    /// side, for a quadrilateral to count as a square (valid range: 0.01 - 1.0)
    #[serde(default = "default_square_side_variance")]
    pub square_side_variance: f64,

    /// Minimum stroke length, in points, for the arrow classifier
    #[serde(default = "default_arrow_min_points")]
    pub arrow_min_points: usize,

    /// Maximum global mean residual, in pixels, for the arrow classifier;
    /// strokes that curve more than this are not arrow candidates
    #[serde(default = "default_arrow_curve_ceiling")]
    pub arrow_curve_ceiling: f64,

    /// Minimum local residual, in pixels, for a stroke third to count as
    /// the arrowhead bend
    #[serde(default = "default_arrow_residual_floor")]
    pub arrow_residual_floor: f64,

    /// How much more a third must bend than the opposite third to count as
    /// the arrowhead region
    #[serde(default = "default_arrow_residual_ratio")]
    pub arrow_residual_ratio: f64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            min_points: default_min_points(),
            line_error_threshold: default_line_error_threshold(),
            circle_std_threshold: default_circle_std_threshold(),
            polygon_epsilon: default_polygon_epsilon(),
            square_side_variance: default_square_side_variance(),
            arrow_min_points: default_arrow_min_points(),
            arrow_curve_ceiling: default_arrow_curve_ceiling(),
            arrow_residual_floor: default_arrow_residual_floor(),
            arrow_residual_ratio: default_arrow_residual_ratio(),
        }
    }
}

/// Gesture debouncing settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct GestureConfig {
    /// How long a finger count must be held, in seconds, before a color
    /// gesture is confirmed (valid range: 0.1 - 10.0)
    #[serde(default = "default_hold_time")]
    pub hold_time_secs: f64,

    /// Minimum gap between color changes, in seconds (valid range: 0.1 - 30.0)
    #[serde(default = "default_color_cooldown")]
    pub color_cooldown_secs: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_time_secs: default_hold_time(),
            color_cooldown_secs: default_color_cooldown(),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// How many strokes stay undoable (valid range: 1 - 1000). Older
    /// strokes remain on the canvas but can no longer be undone.
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history: default_max_history(),
        }
    }
}

/// PNG export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exports are written to; a leading `~` expands to the
    /// home directory. Created on first export if missing.
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template with chrono format specifiers; a `.png` extension
    /// is appended
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_thickness() -> u32 {
    5
}

fn default_eraser_thickness() -> u32 {
    70
}

fn default_min_points() -> usize {
    10
}

fn default_line_error_threshold() -> f64 {
    20.0
}

fn default_circle_std_threshold() -> f64 {
    0.25
}

fn default_polygon_epsilon() -> f64 {
    0.03
}

fn default_square_side_variance() -> f64 {
    0.2
}

fn default_arrow_min_points() -> usize {
    20
}

fn default_arrow_curve_ceiling() -> f64 {
    40.0
}

fn default_arrow_residual_floor() -> f64 {
    15.0
}

fn default_arrow_residual_ratio() -> f64 {
    1.5
}

fn default_hold_time() -> f64 {
    1.5
}

fn default_color_cooldown() -> f64 {
    2.0
}

fn default_max_history() -> usize {
    10
}

fn default_export_directory() -> String {
    "~/Pictures/AirCanvas".to_string()
}

fn default_filename_template() -> String {
    "air-canvas_%Y-%m-%d_%H-%M-%S".to_string()
}
