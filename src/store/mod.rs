//! Stroke capture and bounded undo/redo history.
//!
//! The store owns every stroke in the session: the committed list (replay
//! order), the single in-progress stroke, and the undo/redo stacks. It never
//! rasterizes; callers paint incremental segments themselves and run a full
//! redraw after structural mutations.

use std::collections::VecDeque;

use crate::draw::{Color, ShapeDescriptor, Stroke, StrokeKind};
use crate::recognize::ShapeRecognizer;
use log::debug;

/// Ordered stroke collection with a bounded undo window.
///
/// The undo stack holds stroke ids, not strokes, and is capped at
/// `max_history`. Strokes whose ids fall off the stack stay on the canvas
/// but can no longer be undone.
#[derive(Debug, Clone)]
pub struct StrokeStore {
    committed: Vec<Stroke>,
    current: Option<Stroke>,
    undo_stack: VecDeque<u64>,
    redo_stack: Vec<Stroke>,
    next_id: u64,
    max_history: usize,
}

impl StrokeStore {
    /// Creates an empty store whose undo window holds `max_history` strokes.
    pub fn new(max_history: usize) -> Self {
        Self {
            committed: Vec::new(),
            current: None,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            next_id: 1,
            max_history,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begins a new stroke at `point`, silently discarding any uncommitted
    /// current stroke.
    pub fn start_stroke(&mut self, point: (i32, i32), color: Color, thickness: u32, kind: StrokeKind) {
        if let Some(dropped) = self.current.take() {
            debug!("Discarding uncommitted stroke {} ({} points)", dropped.id, dropped.points.len());
        }
        let id = self.allocate_id();
        self.current = Some(Stroke::begin(id, point, color, thickness, kind));
    }

    /// Appends `point` to the active stroke, starting one if none is active.
    ///
    /// Returns the incremental segment `(previous, point)` for the caller to
    /// paint, or `None` when this call had to start a fresh stroke.
    pub fn continue_stroke(
        &mut self,
        point: (i32, i32),
        color: Color,
        thickness: u32,
        kind: StrokeKind,
    ) -> Option<((i32, i32), (i32, i32))> {
        match self.current.as_mut() {
            Some(stroke) => {
                let previous = stroke.last_point()?;
                stroke.points.push(point);
                Some((previous, point))
            }
            None => {
                self.start_stroke(point, color, thickness, kind);
                None
            }
        }
    }

    /// Commits the active stroke.
    ///
    /// Marks it complete, appends it to the committed list, pushes its id
    /// onto the undo stack (evicting the oldest id past the bound) and
    /// clears the redo stack.
    ///
    /// # Returns
    /// `true` if a stroke was committed, `false` when no stroke was active.
    pub fn stop_stroke(&mut self) -> bool {
        let Some(mut stroke) = self.current.take() else {
            return false;
        };
        if stroke.points.is_empty() {
            return false;
        }
        stroke.complete = true;
        debug!("Committing stroke {} ({} points)", stroke.id, stroke.points.len());
        self.push_undo_id(stroke.id);
        self.committed.push(stroke);
        self.redo_stack.clear();
        true
    }

    fn push_undo_id(&mut self, id: u64) {
        self.undo_stack.push_back(id);
        while self.undo_stack.len() > self.max_history {
            // The stroke itself stays on the canvas; only undoability lapses
            self.undo_stack.pop_front();
        }
    }

    /// Replaces the most recently committed stroke with its recognized shape.
    ///
    /// A content substitution, not a new commit: the replacement keeps the
    /// original color and thickness under a fresh id, takes the old stroke's
    /// position in the committed list and undo stack, and leaves the redo
    /// stack untouched.
    ///
    /// # Returns
    /// `true` on replacement; `false` when nothing is committed, the stroke
    /// is too short, or no classifier matched.
    pub fn apply_shape_recognition(&mut self, recognizer: &ShapeRecognizer) -> bool {
        let Some(last) = self.committed.last() else {
            debug!("Shape recognition requested with no committed strokes");
            return false;
        };
        if last.points.len() < recognizer.min_points() {
            debug!(
                "Stroke {} too short for shape recognition: {} points",
                last.id,
                last.points.len()
            );
            return false;
        }
        let Some(descriptor) = recognizer.recognize(&last.points) else {
            return false;
        };

        let old_id = last.id;
        let color = last.color;
        let thickness = last.thickness;
        let points = last.points.clone();
        let replacement = Stroke {
            id: self.allocate_id(),
            color,
            thickness,
            kind: StrokeKind::Shape(descriptor),
            points,
            complete: true,
        };
        debug!(
            "Replacing stroke {} with {} (new id {})",
            old_id,
            replacement.kind.name(),
            replacement.id
        );
        let new_id = replacement.id;
        let last_index = self.committed.len() - 1;
        self.committed[last_index] = replacement;
        if let Some(slot) = self.undo_stack.iter_mut().find(|id| **id == old_id) {
            *slot = new_id;
        }
        true
    }

    /// Removes the most recent undoable stroke from the canvas.
    ///
    /// # Returns
    /// `false` when the undo stack is empty; state is unchanged.
    pub fn undo(&mut self) -> bool {
        let Some(id) = self.undo_stack.pop_back() else {
            return false;
        };
        let Some(index) = self.committed.iter().position(|s| s.id == id) else {
            // Stack ids always reference committed strokes
            return false;
        };
        let stroke = self.committed.remove(index);
        debug!("Undo stroke {}", stroke.id);
        self.redo_stack.push(stroke);
        true
    }

    /// Restores the most recently undone stroke.
    ///
    /// # Returns
    /// `false` when the redo stack is empty.
    pub fn redo(&mut self) -> bool {
        let Some(stroke) = self.redo_stack.pop() else {
            return false;
        };
        debug!("Redo stroke {}", stroke.id);
        self.push_undo_id(stroke.id);
        self.committed.push(stroke);
        true
    }

    /// Empties the committed list, both stacks and the current stroke.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.current = None;
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Whether `undo` would succeed.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether `redo` would succeed.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Committed strokes in replay order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.committed
    }

    /// The in-progress stroke, if any.
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    /// The most recently committed stroke's shape descriptor, if it has one.
    pub fn last_shape(&self) -> Option<&ShapeDescriptor> {
        match self.committed.last().map(|s| &s.kind) {
            Some(StrokeKind::Shape(descriptor)) => Some(descriptor),
            _ => None,
        }
    }
}
