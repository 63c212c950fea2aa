//! Configuration file support for aircanvas.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/aircanvas/config.toml`. Settings include the canvas size,
//! drawing defaults, shape recognition thresholds, gesture timing, and export paths.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{
    CanvasConfig, DrawingConfig, ExportConfig, GestureConfig, HistoryConfig, RecognitionConfig,
};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 1280
/// height = 720
///
/// [drawing]
/// default_color = "red"
/// default_thickness = 5
///
/// [recognition]
/// min_points = 10
/// line_error_threshold = 20.0
///
/// [gestures]
/// hold_time_secs = 1.5
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Drawing tool defaults (color, pen and eraser thickness)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Shape recognition thresholds
    #[serde(default)]
    pub recognition: RecognitionConfig,

    /// Gesture hold and cooldown timing
    #[serde(default)]
    pub gestures: GestureConfig,

    /// Undo history bound
    #[serde(default)]
    pub history: HistoryConfig,

    /// PNG export directory and filename template
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause undefined behavior
    /// or rendering issues. Invalid values are clamped to the nearest valid value and a
    /// warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`: 320 - 7680, `canvas.height`: 240 - 4320
    /// - `default_thickness`: 2 - 30
    /// - `eraser_thickness`: 10 - 200
    /// - `min_points`: 3 - 100
    /// - recognition thresholds: see each field's documented range
    /// - `hold_time_secs`: 0.1 - 10.0, `color_cooldown_secs`: 0.1 - 30.0
    /// - `max_history`: 1 - 1000
    pub fn validate_and_clamp(&mut self) {
        // Canvas: 320x240 - 7680x4320
        if !(320..=7680).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 320-7680 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(320, 7680);
        }
        if !(240..=4320).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 240-4320 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(240, 4320);
        }

        // Pen thickness: 2 - 30
        if !(2..=30).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {}, clamping to 2-30 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(2, 30);
        }

        // Eraser thickness: 10 - 200
        if !(10..=200).contains(&self.drawing.eraser_thickness) {
            log::warn!(
                "Invalid eraser_thickness {}, clamping to 10-200 range",
                self.drawing.eraser_thickness
            );
            self.drawing.eraser_thickness = self.drawing.eraser_thickness.clamp(10, 200);
        }

        // Recognition minimum points: 3 - 100
        if !(3..=100).contains(&self.recognition.min_points) {
            log::warn!(
                "Invalid min_points {}, clamping to 3-100 range",
                self.recognition.min_points
            );
            self.recognition.min_points = self.recognition.min_points.clamp(3, 100);
        }

        // Line residual threshold: 1.0 - 200.0 pixels
        if !(1.0..=200.0).contains(&self.recognition.line_error_threshold) {
            log::warn!(
                "Invalid line_error_threshold {:.1}, clamping to 1.0-200.0 range",
                self.recognition.line_error_threshold
            );
            self.recognition.line_error_threshold =
                self.recognition.line_error_threshold.clamp(1.0, 200.0);
        }

        // Circle radial deviation: 0.01 - 1.0
        if !(0.01..=1.0).contains(&self.recognition.circle_std_threshold) {
            log::warn!(
                "Invalid circle_std_threshold {:.3}, clamping to 0.01-1.0 range",
                self.recognition.circle_std_threshold
            );
            self.recognition.circle_std_threshold =
                self.recognition.circle_std_threshold.clamp(0.01, 1.0);
        }

        // Hull simplification tolerance: 0.005 - 0.2
        if !(0.005..=0.2).contains(&self.recognition.polygon_epsilon) {
            log::warn!(
                "Invalid polygon_epsilon {:.3}, clamping to 0.005-0.2 range",
                self.recognition.polygon_epsilon
            );
            self.recognition.polygon_epsilon = self.recognition.polygon_epsilon.clamp(0.005, 0.2);
        }

        // Square side variance: 0.01 - 1.0
        if !(0.01..=1.0).contains(&self.recognition.square_side_variance) {
            log::warn!(
                "Invalid square_side_variance {:.3}, clamping to 0.01-1.0 range",
                self.recognition.square_side_variance
            );
            self.recognition.square_side_variance =
                self.recognition.square_side_variance.clamp(0.01, 1.0);
        }

        // Gesture hold: 0.1 - 10.0 seconds
        if !(0.1..=10.0).contains(&self.gestures.hold_time_secs) {
            log::warn!(
                "Invalid hold_time_secs {:.2}, clamping to 0.1-10.0 range",
                self.gestures.hold_time_secs
            );
            self.gestures.hold_time_secs = self.gestures.hold_time_secs.clamp(0.1, 10.0);
        }

        // Color cooldown: 0.1 - 30.0 seconds
        if !(0.1..=30.0).contains(&self.gestures.color_cooldown_secs) {
            log::warn!(
                "Invalid color_cooldown_secs {:.2}, clamping to 0.1-30.0 range",
                self.gestures.color_cooldown_secs
            );
            self.gestures.color_cooldown_secs = self.gestures.color_cooldown_secs.clamp(0.1, 30.0);
        }

        // Undo window: 1 - 1000 strokes
        if !(1..=1000).contains(&self.history.max_history) {
            log::warn!(
                "Invalid max_history {}, clamping to 1-1000 range",
                self.history.max_history
            );
            self.history.max_history = self.history.max_history.clamp(1, 1000);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/aircanvas/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("aircanvas");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at `~/.config/aircanvas/config.toml`.
    /// If the file doesn't exist, returns a Config with default values. All loaded values
    /// are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error here: the
    /// caller asked for this file specifically.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// The commented default configuration document.
    ///
    /// Printed by `aircanvas --print-config` so users can redirect it into
    /// their config directory as a starting point.
    pub fn default_toml() -> &'static str {
        include_str!("../../config.example.toml")
    }
}
