use super::{Idle, PointerTarget, StateRequest, Transition};
use crate::canvas::Canvas;
use crate::shapes::ShapeId;

/// Editing the label of one shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditingShape {
    pub shape_id: ShapeId,
    pub select_all: bool,
}

impl EditingShape {
    pub(super) fn on_enter(canvas: &mut Canvas, shape_id: ShapeId, select_all: bool) -> Self {
        canvas.start_editing_with_label(shape_id, select_all);
        Self {
            shape_id,
            select_all,
        }
    }

    pub(super) fn on_exit(self, canvas: &mut Canvas) {
        canvas.stop_editing();
    }

    /// Pressing anywhere ends editing and is handled as if idle.
    pub(super) fn on_pointer_down(canvas: &mut Canvas, target: PointerTarget) -> Transition {
        match Idle::on_pointer_down(canvas, target) {
            Transition::Stay => Transition::To(StateRequest::Idle(None)),
            transition => transition,
        }
    }
}
