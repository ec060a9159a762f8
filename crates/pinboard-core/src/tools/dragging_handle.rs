use super::{InteractionInfo, StateRequest, Transition};
use crate::canvas::Canvas;
use crate::handles::HandleKind;
use crate::shapes::Shape;

/// Dragging a single handle of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggingHandle {
    pub info: InteractionInfo,
    /// Shape as it was before the drag, for rollback.
    original: Option<Shape>,
}

impl DraggingHandle {
    pub(super) fn on_enter(canvas: &mut Canvas, info: InteractionInfo) -> Self {
        log::debug!("Dragging handle {} of {}", info.handle.id, info.shape_id);
        Self {
            info,
            original: canvas.shape(info.shape_id).cloned(),
        }
    }

    pub(super) fn on_pointer_move(&mut self, canvas: &mut Canvas) -> Transition {
        let id = self.info.shape_id;
        // Only arrow terminals follow the pointer
        if self.info.handle.kind != HandleKind::Vertex {
            return Transition::Stay;
        }
        let Some(transform) = canvas.page_transform(id) else {
            log::warn!("Dragged shape {id} vanished");
            return Transition::To(StateRequest::Idle(None));
        };
        let local = transform.inverse() * canvas.input.current_page_point();
        let handle = self.info.handle.id;
        let result = canvas.update_shape(id, |shape| {
            if let Some(arrow) = shape.as_arrow_mut() {
                arrow.set_terminal_point(handle, local);
            }
        });
        if let Err(e) = result {
            log::warn!("Could not drag handle {handle} of {id}: {e}");
        }
        Transition::Stay
    }

    pub(super) fn on_complete(&mut self) -> Transition {
        Transition::To(StateRequest::Idle(None))
    }

    pub(super) fn on_cancel(&mut self, canvas: &mut Canvas) -> Transition {
        if let Some(original) = self.original.take() {
            let id = self.info.shape_id;
            if let Err(e) = canvas.update_shape(id, |shape| *shape = original) {
                log::warn!("Could not restore {id}: {e}");
            }
        }
        Transition::To(StateRequest::Idle(None))
    }
}
