//! Pits: the slots next to a note where a follow-up note can go.
//!
//! A note has one pit per clone handle. Pits are recomputed from the note's
//! current geometry every time they are needed.

mod placement;

pub use placement::{AdjacentNotePolicy, NearestNotePlacement};

use crate::canvas::Canvas;
use crate::handles::HandleId;
use crate::shapes::{ADJACENT_NOTE_MARGIN, NOTE_SIZE, Shape, ShapeId, affine_rotation, rotate_vec};
use kurbo::{Point, Vec2};

/// Centers of the pits around a note, in handle order (top, right, bottom,
/// left).
///
/// `grow_y` pushes the bottom pit down by the note's growth; `extra_height`
/// adds room for content that is not part of the note yet.
pub fn adjacent_positions(
    page_point: Point,
    page_rotation: f64,
    grow_y: f64,
    extra_height: f64,
) -> Vec<Point> {
    [
        Vec2::new(NOTE_SIZE * 0.5, NOTE_SIZE * -0.5 - ADJACENT_NOTE_MARGIN),
        Vec2::new(NOTE_SIZE * 1.5 + ADJACENT_NOTE_MARGIN, NOTE_SIZE * 0.5),
        Vec2::new(
            NOTE_SIZE * 0.5,
            NOTE_SIZE * 1.5 + ADJACENT_NOTE_MARGIN + grow_y + extra_height,
        ),
        Vec2::new(NOTE_SIZE * -0.5 - ADJACENT_NOTE_MARGIN, NOTE_SIZE * 0.5),
    ]
    .into_iter()
    .map(|offset| page_point + rotate_vec(offset, page_rotation))
    .collect()
}

/// Page placement of a note: its page point, rotation and pits.
#[derive(Debug, Clone, PartialEq)]
pub struct NotePits {
    pub page_point: Point,
    pub page_rotation: f64,
    pub pits: Vec<Point>,
}

/// Compute the pits of a note from its current geometry.
///
/// Returns `None` if `note_id` is missing or not a note.
pub fn note_pits(canvas: &Canvas, note_id: ShapeId) -> Option<NotePits> {
    let Some(Shape::Note(note)) = canvas.shape(note_id) else {
        return None;
    };
    let transform = canvas.page_transform(note_id)?;
    let page_point = transform * Point::ORIGIN;
    let page_rotation = affine_rotation(transform);
    let pits = adjacent_positions(page_point, page_rotation, note.grow_y, 0.0);
    Some(NotePits {
        page_point,
        page_rotation,
        pits,
    })
}

/// Resolve the pit behind `handle` of a note to a concrete neighbor note.
///
/// Returns `None` when the shape is not a note, has no transform, or the
/// handle has no pit. Otherwise the placement policy decides between an
/// existing neighbor and a new note.
pub fn resolve_pit(
    canvas: &mut Canvas,
    policy: &dyn AdjacentNotePolicy,
    note_id: ShapeId,
    handle: HandleId,
    create_if_missing: bool,
) -> Option<ShapeId> {
    let NotePits {
        page_rotation,
        pits,
        ..
    } = note_pits(canvas, note_id)?;
    let index = canvas
        .shape_handles(note_id)?
        .iter()
        .position(|h| h.id == handle)?;
    let pit = *pits.get(index)?;
    log::trace!("Handle {handle} of {note_id} maps to pit {index} at {pit:?}");
    policy.resolve(canvas, note_id, pit, page_rotation, create_if_missing)
}
