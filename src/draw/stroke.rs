//! Stroke and shape descriptor definitions.

use super::color::Color;
use serde::{Deserialize, Serialize};

/// Classification of a four-vertex or three-vertex hull.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonKind {
    Triangle,
    Square,
    Rectangle,
}

impl PolygonKind {
    /// Human-readable name for logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            PolygonKind::Triangle => "triangle",
            PolygonKind::Square => "square",
            PolygonKind::Rectangle => "rectangle",
        }
    }
}

/// Idealized geometric replacement for a hand-drawn stroke.
///
/// Produced by the shape recognizer; rendered instead of the raw point
/// sequence once a stroke has been converted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ShapeDescriptor {
    /// Circle around the stroke centroid
    Circle {
        /// Center (x, y) in pixels
        center: (i32, i32),
        /// Radius in pixels
        radius: i32,
    },
    /// Straight segment between the stroke endpoints
    Line {
        /// First input point
        start: (i32, i32),
        /// Last input point
        end: (i32, i32),
    },
    /// Closed polygon outline
    Polygon {
        /// Triangle, square or rectangle
        kind: PolygonKind,
        /// Hull vertices in winding order; the closing edge back to the
        /// first vertex is implicit
        vertices: Vec<(i32, i32)>,
    },
    /// Arrow shaft with a filled triangular head
    Arrow {
        /// Shaft start
        tail: (i32, i32),
        /// Shaft end, where the head is drawn
        head: (i32, i32),
    },
}

impl ShapeDescriptor {
    /// Short name for logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeDescriptor::Circle { .. } => "circle",
            ShapeDescriptor::Line { .. } => "line",
            ShapeDescriptor::Polygon { kind, .. } => kind.name(),
            ShapeDescriptor::Arrow { .. } => "arrow",
        }
    }
}

/// What a stroke paints when replayed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StrokeKind {
    /// Polyline through the recorded points in the stroke color
    Freehand,
    /// Polyline through the recorded points in the background color
    Erase,
    /// Idealized primitive replacing the recorded points
    Shape(ShapeDescriptor),
}

impl StrokeKind {
    /// Short name for logs and status output.
    pub fn name(&self) -> &'static str {
        match self {
            StrokeKind::Freehand => "freehand",
            StrokeKind::Erase => "erase",
            StrokeKind::Shape(descriptor) => descriptor.name(),
        }
    }
}

/// One continuous drawing action, stored as an ordered point sequence plus
/// style.
///
/// A stroke is mutated only while `complete` is false; after completion the
/// stroke store replaces it wholesale (shape conversion) but never edits it
/// in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stroke {
    /// Store-assigned identifier, unique within a session
    pub id: u64,
    /// Pen color (ignored for `Erase` strokes, which paint the background)
    pub color: Color,
    /// Stroke width in pixels
    pub thickness: u32,
    /// How the stroke is replayed
    pub kind: StrokeKind,
    /// Points in drawing order
    pub points: Vec<(i32, i32)>,
    /// Set once the stroke has been committed; never cleared afterwards
    pub complete: bool,
}

impl Stroke {
    /// Creates an in-progress stroke starting at `point`.
    pub fn begin(id: u64, point: (i32, i32), color: Color, thickness: u32, kind: StrokeKind) -> Self {
        Self {
            id,
            color,
            thickness,
            kind,
            points: vec![point],
            complete: false,
        }
    }

    /// The most recently recorded point, if any.
    pub fn last_point(&self) -> Option<(i32, i32)> {
        self.points.last().copied()
    }
}
