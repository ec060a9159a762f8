use super::{InteractionInfo, PointerTarget, StateRequest, TargetKind, Transition};
use crate::canvas::Canvas;

/// Nothing in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Idle {
    /// The interaction that ended in idle, if it handed one back.
    pub info: Option<InteractionInfo>,
}

impl Idle {
    pub(super) fn on_enter(info: Option<InteractionInfo>) -> Self {
        Self { info }
    }

    pub(super) fn on_pointer_down(canvas: &mut Canvas, target: PointerTarget) -> Transition {
        match target {
            PointerTarget::Handle(handle) => Transition::To(StateRequest::PointingHandle(InteractionInfo {
                target: TargetKind::Handle,
                shape_id: handle.shape_id,
                handle,
                page_point: canvas.input.origin_page_point(),
            })),
            PointerTarget::Shape(id) => {
                canvas.select(id);
                Transition::Stay
            }
            PointerTarget::Canvas => {
                canvas.clear_selection();
                Transition::Stay
            }
        }
    }
}
