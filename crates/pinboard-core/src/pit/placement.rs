//! Deciding which note fills a pit.

use crate::canvas::Canvas;
use crate::shapes::{ADJACENT_NOTE_MARGIN, NOTE_CENTER_OFFSET, NOTE_SIZE, Note, Shape, ShapeId, rotate_vec};
use kurbo::Point;
use std::fmt;

/// Turns a pit into a note: reuses a neighbor or creates one.
pub trait AdjacentNotePolicy: fmt::Debug {
    /// Resolve the note for the pit centered at `pit` next to `source`.
    ///
    /// `page_rotation` is the source note's page rotation.
    fn resolve(
        &self,
        canvas: &mut Canvas,
        source: ShapeId,
        pit: Point,
        page_rotation: f64,
        create_if_missing: bool,
    ) -> Option<ShapeId>;
}

/// Reuse the front-most note sitting on the pit, otherwise create a new one
/// centered on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNotePlacement;

impl NearestNotePlacement {
    /// Squared distance between a neighbor's center and the pit under which
    /// the neighbor counts as occupying it.
    pub const MAX_CENTER_DIST2: f64 = NOTE_SIZE + ADJACENT_NOTE_MARGIN * ADJACENT_NOTE_MARGIN;

    /// The front-most note (other than `source`) occupying `pit`.
    pub fn find_existing(canvas: &Canvas, source: ShapeId, pit: Point) -> Option<ShapeId> {
        canvas
            .document
            .shapes_ordered()
            .rev()
            .filter(|shape| matches!(shape, Shape::Note(_)) && shape.id() != source)
            .find(|shape| {
                (shape.page_bounds().center() - pit).hypot2() < Self::MAX_CENTER_DIST2
                    && shape.hit_test(pit, 0.0)
            })
            .map(Shape::id)
    }

    fn create(canvas: &mut Canvas, source: ShapeId, pit: Point, page_rotation: f64) -> Option<ShapeId> {
        let Some(Shape::Note(source_note)) = canvas.shape(source) else {
            return None;
        };
        // Top-left such that the rotated center offset lands on the pit
        let top_left = pit - rotate_vec(NOTE_CENTER_OFFSET, page_rotation);
        let note = Note::continuing(source_note, top_left, page_rotation);
        match canvas.create_shape(Shape::Note(note)) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("Could not create note next to {source}: {e}");
                None
            }
        }
    }
}

impl AdjacentNotePolicy for NearestNotePlacement {
    fn resolve(
        &self,
        canvas: &mut Canvas,
        source: ShapeId,
        pit: Point,
        page_rotation: f64,
        create_if_missing: bool,
    ) -> Option<ShapeId> {
        if let Some(existing) = Self::find_existing(canvas, source, pit) {
            log::debug!("Pit next to {source} is taken by {existing}");
            return Some(existing);
        }
        if !create_if_missing {
            return None;
        }
        Self::create(canvas, source, pit, page_rotation)
    }
}
