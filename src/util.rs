//! Utility functions for color names, arrowhead geometry, and export paths.
//!
//! This module provides:
//! - Name-to-color mapping for the control plane and config file
//! - Arrowhead geometry for recognized arrow strokes
//! - Timestamped export filename generation

use crate::draw::{Color, color::*};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Accepts every palette name plus "black" (the default background color,
/// which is valid in the config file but not selectable as a pen color).
///
/// # Arguments
/// * `name` - Color name string (case-insensitive)
///
/// # Returns
/// - `Some(Color)` if the name is recognized
/// - `None` otherwise
pub fn name_to_color(name: &str) -> Option<Color> {
    if name.eq_ignore_ascii_case("black") {
        return Some(BLACK);
    }
    palette_index(name).map(palette_color)
}

/// Maps a Color value to its human-readable name.
///
/// Uses approximate matching (threshold-based) to identify colors.
/// Used by the status output to display the current color name.
///
/// # Returns
/// A static string with the color name, or "custom" if the color doesn't
/// match any predefined color.
pub fn color_to_name(color: &Color) -> &'static str {
    // Match colors approximately with 0.1 tolerance
    if color.r > 0.9 && color.g < 0.1 && color.b < 0.1 {
        "red"
    } else if color.r < 0.1 && color.g < 0.1 && color.b > 0.9 {
        "blue"
    } else if color.r < 0.1 && color.g > 0.9 && color.b < 0.1 {
        "green"
    } else if color.r > 0.9 && color.g > 0.9 && color.b < 0.1 {
        "yellow"
    } else if color.r > 0.9 && color.g < 0.1 && color.b > 0.9 {
        "purple"
    } else if color.r > 0.9 && color.g > 0.9 && color.b > 0.9 {
        "white"
    } else if color.r < 0.1 && color.g < 0.1 && color.b < 0.1 {
        "black"
    } else {
        "custom"
    }
}

// ============================================================================
// Arrowhead Geometry
// ============================================================================

/// Calculates the base corners of a filled triangular arrowhead.
///
/// The head sits at `head` pointing away from `tail`. Its length and width
/// scale with the stroke thickness (length 3x, width 2x), and the length is
/// capped at 30% of the shaft so short arrows keep a visible shaft.
///
/// # Arguments
/// * `tail` - Shaft start coordinate
/// * `head` - Shaft end coordinate (arrow tip)
/// * `thickness` - Stroke width in pixels
///
/// # Returns
/// Array of two points `[(left_x, left_y), (right_x, right_y)]` forming the
/// head base; the triangle is `head`, left, right. If the shaft is shorter
/// than 1 pixel, both points equal `head`.
pub fn arrowhead_base(
    tail: (i32, i32),
    head: (i32, i32),
    thickness: u32,
) -> [(f64, f64); 2] {
    let (hx, hy) = (head.0 as f64, head.1 as f64);
    let dx = hx - tail.0 as f64;
    let dy = hy - tail.1 as f64;
    let shaft_length = (dx * dx + dy * dy).sqrt();

    if shaft_length < 1.0 {
        // Shaft too short for a head
        return [(hx, hy), (hx, hy)];
    }

    let ux = dx / shaft_length;
    let uy = dy / shaft_length;

    let head_length = (3.0 * thickness as f64).min(shaft_length * 0.3);
    let head_width = 2.0 * thickness as f64;

    // Base center sits head_length back along the shaft
    let bx = hx - ux * head_length;
    let by = hy - uy * head_length;

    // Perpendicular unit vector
    let px = -uy;
    let py = ux;

    let half = head_width / 2.0;
    [
        (bx + px * half, by + py * half),
        (bx - px * half, by - py * half),
    ]
}

// ============================================================================
// Export Paths
// ============================================================================

/// Generate an export filename from a chrono template and the current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
///
/// # Returns
/// Generated filename with a `.png` extension
pub fn generate_filename(template: &str) -> String {
    let now = Local::now();
    format!("{}.png", now.format(template))
}

/// Ensure the export directory exists, creating it if necessary.
///
/// # Returns
/// The canonicalized path to the directory
pub fn ensure_directory_exists(directory: &Path) -> std::io::Result<PathBuf> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    // Canonicalize to resolve relative paths
    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
