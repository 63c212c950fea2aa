//! Session driver: the per-sample pipeline and the control plane.
//!
//! A session owns one stroke store, one mode controller, one recognizer and
//! one raster canvas. Pointer samples flow through [`Session::handle_sample`]
//! strictly in order; the synchronous control plane (undo, redo, clear, shape
//! conversion, color/thickness changes, export) runs between samples. Hosts
//! that need concurrent control access wrap the session in [`SharedSession`].

mod error;

pub use error::SessionError;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::config::{ColorSpec, Config, ExportConfig};
use crate::draw::color::{palette_color, palette_index, palette_name};
use crate::draw::{Canvas, CanvasError, Color, Stroke, StrokeKind};
use crate::input::{InputMode, InputModeController};
use crate::recognize::ShapeRecognizer;
use crate::store::StrokeStore;
use crate::util;
use log::{debug, info};
use serde::Serialize;

/// Minimum settable brush thickness in pixels.
pub const MIN_THICKNESS: u32 = 2;
/// Maximum settable brush thickness in pixels.
pub const MAX_THICKNESS: u32 = 30;

/// A session behind a lock, for hosts with concurrent control access.
pub type SharedSession = Arc<Mutex<Session>>;

/// One pointer sample from the upstream hand tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Fingertip position, absent when the tracker lost the fingertip
    pub pointer: Option<(i32, i32)>,
    /// Number of raised fingers reported with this sample
    pub finger_count: u8,
    /// Whether a hand was detected at all; a stale count is never trusted
    pub hand_detected: bool,
}

/// Snapshot of the session state for status queries.
#[derive(Debug, Clone, Serialize)]
pub struct Status {
    pub mode: &'static str,
    pub color: &'static str,
    pub color_index: usize,
    pub thickness: u32,
    pub eraser_thickness: u32,
    pub stroke_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub hand_detected: bool,
}

/// The drawing session: stroke state, input modes, and the raster they
/// composite onto.
pub struct Session {
    store: StrokeStore,
    controller: InputModeController,
    recognizer: ShapeRecognizer,
    canvas: Canvas,
    color: Color,
    thickness: u32,
    eraser_thickness: u32,
    hand_detected: bool,
    export: ExportConfig,
}

impl Session {
    /// Builds a session from a validated configuration.
    pub fn new(config: &Config) -> Result<Self, CanvasError> {
        let background = config.canvas.background.to_color();
        let canvas = Canvas::new(config.canvas.width, config.canvas.height, background)?;

        let mut controller = InputModeController::new(&config.gestures);
        let color = config.drawing.default_color.to_color();
        if let ColorSpec::Name(name) = &config.drawing.default_color
            && let Some(index) = palette_index(name)
        {
            controller.set_color_index(index);
        }

        info!(
            "Session ready: {}x{} canvas, {} undoable strokes",
            canvas.width(),
            canvas.height(),
            config.history.max_history
        );

        Ok(Self {
            store: StrokeStore::new(config.history.max_history),
            controller,
            recognizer: ShapeRecognizer::new(config.recognition.clone()),
            canvas,
            color,
            thickness: config.drawing.default_thickness,
            eraser_thickness: config.drawing.eraser_thickness,
            hand_detected: false,
            export: config.export.clone(),
        })
    }

    /// Wraps the session for shared access.
    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    /// Feeds one pointer sample taken at `now`.
    ///
    /// Without a detected hand the active stroke is committed and the stale
    /// finger count never reaches the mode controller. Otherwise the sample
    /// runs mode update, then stroke mutation, then incremental painting.
    pub fn handle_sample(&mut self, sample: &Sample, now: Instant) {
        if !sample.hand_detected {
            if self.hand_detected {
                debug!("Hand lost, committing active stroke");
            }
            self.hand_detected = false;
            self.store.stop_stroke();
            return;
        }
        self.hand_detected = true;

        let update = self.controller.update(sample.finger_count, now);

        // Strokes carry a single color; a mid-stroke change splits them so
        // incremental paint and redraw replay stay identical
        if update.color_action.is_some() {
            self.color = self.controller.color();
            self.store.stop_stroke();
        }
        if update.mode_changed {
            self.store.stop_stroke();
        }

        match (update.mode, sample.pointer) {
            (InputMode::Draw, Some(point)) => {
                self.feed_point(point, self.thickness, StrokeKind::Freehand);
            }
            (InputMode::Erase, Some(point)) => {
                self.feed_point(point, self.eraser_thickness, StrokeKind::Erase);
            }
            _ => {
                self.store.stop_stroke();
            }
        }
    }

    fn feed_point(&mut self, point: (i32, i32), thickness: u32, kind: StrokeKind) {
        let paint = match kind {
            StrokeKind::Erase => self.canvas.background(),
            _ => self.color,
        };
        match self.store.continue_stroke(point, self.color, thickness, kind) {
            Some((from, to)) => self.canvas.paint_segment(from, to, paint, thickness),
            None => self.canvas.paint_dot(point, paint, thickness),
        }
    }

    /// Wipes every stroke and repaints the background.
    pub fn clear(&mut self) {
        self.store.clear();
        self.canvas.clear();
        info!("Canvas cleared");
    }

    /// Removes the most recent undoable stroke, redrawing on success.
    pub fn undo(&mut self) -> bool {
        let undone = self.store.undo();
        if undone {
            self.canvas.redraw(self.store.strokes());
        }
        undone
    }

    /// Restores the most recently undone stroke, redrawing on success.
    pub fn redo(&mut self) -> bool {
        let redone = self.store.redo();
        if redone {
            self.canvas.redraw(self.store.strokes());
        }
        redone
    }

    /// Converts the last committed stroke into its recognized shape,
    /// redrawing on success.
    pub fn apply_shape_recognition(&mut self) -> bool {
        let replaced = self.store.apply_shape_recognition(&self.recognizer);
        if replaced {
            self.canvas.redraw(self.store.strokes());
        }
        replaced
    }

    /// Sets the pen color by palette name.
    ///
    /// Also moves the gesture cycle to the named color so the next color
    /// gesture continues from it. Any active stroke is committed first.
    pub fn set_color_by_name(&mut self, name: &str) -> Result<(), SessionError> {
        let index = palette_index(name).ok_or_else(|| SessionError::UnknownColor {
            name: name.to_string(),
        })?;
        self.store.stop_stroke();
        self.color = palette_color(index);
        self.controller.set_color_index(index);
        info!("Color set to {}", palette_name(index));
        Ok(())
    }

    /// Sets the pen thickness, validated against the settable range.
    pub fn set_brush_thickness(&mut self, thickness: u32) -> Result<(), SessionError> {
        if !(MIN_THICKNESS..=MAX_THICKNESS).contains(&thickness) {
            return Err(SessionError::ThicknessOutOfRange {
                value: thickness,
                min: MIN_THICKNESS,
                max: MAX_THICKNESS,
            });
        }
        self.store.stop_stroke();
        self.thickness = thickness;
        info!("Brush thickness set to {thickness}");
        Ok(())
    }

    /// Current session state for status queries and logs.
    pub fn status(&self) -> Status {
        Status {
            mode: self.controller.mode().name(),
            color: util::color_to_name(&self.color),
            color_index: self.controller.color_index(),
            thickness: self.thickness,
            eraser_thickness: self.eraser_thickness,
            stroke_count: self.store.strokes().len(),
            can_undo: self.store.can_undo(),
            can_redo: self.store.can_redo(),
            hand_detected: self.hand_detected,
        }
    }

    /// Committed strokes in replay order.
    pub fn strokes(&self) -> &[Stroke] {
        self.store.strokes()
    }

    /// The raster canvas the session paints onto.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Writes the composited raster to `path` as a PNG.
    pub fn export_png(&self, path: &Path) -> Result<(), SessionError> {
        self.canvas.export_png(path)?;
        Ok(())
    }

    /// Encodes the composited raster as a PNG into `writer`.
    pub fn export_to<W: Write>(&self, writer: &mut W) -> Result<(), SessionError> {
        self.canvas.export_to(writer)?;
        Ok(())
    }

    /// Exports into the configured directory under a timestamped name.
    ///
    /// Expands `~`, creates the directory if missing, and returns the path
    /// that was written.
    pub fn export_default(&self) -> Result<PathBuf, SessionError> {
        let directory = util::expand_tilde(&self.export.directory);
        let directory = util::ensure_directory_exists(&directory).map_err(CanvasError::Io)?;
        let path = directory.join(util::generate_filename(&self.export.filename_template));
        self.canvas.export_png(&path)?;
        Ok(path)
    }
}
