//! Offscreen raster surface backing the drawing session.
//!
//! Wraps a Cairo image surface plus its drawing context and exposes the few
//! operations the session needs: incremental segment painting, full redraws,
//! and PNG export.

use std::fs;
use std::path::Path;

use super::color::Color;
use super::render;
use super::stroke::Stroke;
use log::{debug, info};
use thiserror::Error;

/// Errors that can occur creating, painting, or exporting the raster.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Failed to create drawing surface: {0}")]
    Surface(#[from] cairo::Error),

    #[error("Failed to encode PNG: {0}")]
    PngEncode(#[from] cairo::IoError),

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// ARGB raster surface with a persistent Cairo context.
///
/// The surface holds the fully composited image; strokes are painted into it
/// incrementally as they happen and replayed wholesale after structural
/// mutations (undo, redo, shape replacement, clear).
pub struct Canvas {
    surface: cairo::ImageSurface,
    ctx: cairo::Context,
    width: u32,
    height: u32,
    background: Color,
}

impl Canvas {
    /// Creates a canvas cleared to the background color.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, CanvasError> {
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, width as i32, height as i32)?;
        let ctx = cairo::Context::new(&surface)?;
        render::render_background(&ctx, background);
        debug!("Created {}x{} canvas", width, height);
        Ok(Self {
            surface,
            ctx,
            width,
            height,
            background,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The background color erase strokes paint with.
    pub fn background(&self) -> Color {
        self.background
    }

    /// Clears the surface back to the background color.
    pub fn clear(&self) {
        render::render_background(&self.ctx, self.background);
    }

    /// Paints one incremental segment of an in-progress stroke.
    pub fn paint_segment(&self, from: (i32, i32), to: (i32, i32), color: Color, thickness: u32) {
        render::render_segment(&self.ctx, from, to, color, thickness);
    }

    /// Paints a single dot, used when a stroke begins.
    pub fn paint_dot(&self, at: (i32, i32), color: Color, thickness: u32) {
        render::render_polyline(&self.ctx, &[at], color, thickness);
    }

    /// Clears the surface and replays every stroke in order.
    pub fn redraw(&self, strokes: &[Stroke]) {
        self.clear();
        render::render_strokes(&self.ctx, strokes, self.background);
    }

    /// Writes the current surface contents to `path` as a PNG.
    pub fn export_png(&self, path: &Path) -> Result<(), CanvasError> {
        let mut file = fs::File::create(path)?;
        self.export_to(&mut file)?;
        info!("Exported canvas to {}", path.display());
        Ok(())
    }

    /// Encodes the current surface contents as a PNG into `writer`.
    pub fn export_to<W: std::io::Write>(&self, writer: &mut W) -> Result<(), CanvasError> {
        self.surface.flush();
        self.surface.write_to_png(writer)?;
        Ok(())
    }
}
