//! Typed errors for the session control plane.

use crate::draw::CanvasError;
use thiserror::Error;

/// Errors returned by session control-plane operations.
///
/// Validation failures carry the offending value and the allowed set or
/// range; the session state is untouched when one is returned.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown color \"{name}\" (valid: red, blue, green, yellow, purple, white)")]
    UnknownColor { name: String },

    #[error("Thickness {value} out of range ({min}-{max})")]
    ThicknessOutOfRange { value: u32, min: u32, max: u32 },

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}
