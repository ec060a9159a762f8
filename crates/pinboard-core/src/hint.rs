//! Binding hints: emphasize the shape an arrow terminal is attached to.

use crate::handles::HandleId;
use crate::session::{Cursor, CursorKind, SessionState};
use crate::shapes::{Shape, ShapeId, Terminal};

/// The shape a handle's terminal is bound to, if the handle is an arrow
/// terminal with a binding.
pub fn binding_hint_for(shape: &Shape, handle: HandleId) -> Option<ShapeId> {
    match shape {
        Shape::Arrow(arrow) => arrow.terminal(handle).and_then(Terminal::bound_shape_id),
        Shape::Note(_) => None,
    }
}

/// Ephemeral session overrides held by an interaction while it is active.
///
/// Acquired on entry, released on exit. `release` consumes the token, so an
/// interaction cannot release twice, and the coordinator owning the token is
/// the only place that can end it.
#[derive(Debug)]
#[must_use = "ephemeral overrides must be released on exit"]
pub struct EphemeralOverrides {
    hinted: Option<ShapeId>,
}

impl EphemeralOverrides {
    /// Apply the hint (if any) and the cursor override.
    pub fn acquire(session: &mut SessionState, hint: Option<ShapeId>, cursor: CursorKind) -> Self {
        if let Some(id) = hint {
            session.set_hinting_shapes(&[id]);
        }
        session.set_cursor(Cursor::new(cursor));
        Self { hinted: hint }
    }

    /// Clear hints and restore the default cursor.
    pub fn release(self, session: &mut SessionState) {
        if let Some(id) = self.hinted {
            log::trace!("Clearing binding hint on {id}");
        }
        session.set_hinting_shapes(&[]);
        session.set_cursor(Cursor::default());
    }
}
