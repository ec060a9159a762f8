use super::{InteractionInfo, StateRequest, Transition};
use crate::canvas::Canvas;
use crate::shapes::ShapeId;
use kurbo::Point;

/// How the interaction that started a translate should be wrapped up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionEnd {
    /// Leave the session as the translate left it.
    Select,
    /// A note was pulled out of a pit; drop the hover the pull put on it.
    Note,
}

/// Work to do once a translate completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateFollowUp {
    EditLabel { shape_id: ShapeId, select_all: bool },
}

impl CreateFollowUp {
    fn into_request(self) -> StateRequest {
        match self {
            CreateFollowUp::EditLabel {
                shape_id,
                select_all,
            } => StateRequest::EditingShape {
                shape_id,
                select_all,
            },
        }
    }
}

/// Entry payload of [`Translating`].
#[derive(Debug, Clone, PartialEq)]
pub struct TranslateParams {
    pub info: InteractionInfo,
    pub on_interaction_end: InteractionEnd,
    /// The translate is part of creating a shape.
    pub is_creating: bool,
    /// Where to put the shape back on cancel when it existed before the
    /// interaction. `None` while creating means cancelling deletes it.
    pub cancel_position: Option<Point>,
    pub on_create: Option<CreateFollowUp>,
}

/// Moving a shape with the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Translating {
    params: TranslateParams,
    start_position: Point,
    start_pointer: Point,
}

impl Translating {
    pub(super) fn on_enter(canvas: &mut Canvas, params: TranslateParams) -> Self {
        let start_position = canvas
            .shape(params.info.shape_id)
            .map_or(Point::ZERO, |shape| shape.position());
        log::debug!(
            "Translating {} (creating: {}, end: {:?})",
            params.info.shape_id,
            params.is_creating,
            params.on_interaction_end
        );
        Self {
            params,
            start_position,
            start_pointer: canvas.input.current_page_point(),
        }
    }

    pub fn params(&self) -> &TranslateParams {
        &self.params
    }

    pub(super) fn on_pointer_move(&mut self, canvas: &mut Canvas) -> Transition {
        let id = self.params.info.shape_id;
        let delta = canvas.input.current_page_point() - self.start_pointer;
        let Some(parent_point) = canvas.point_in_parent_space(id, self.start_position + delta) else {
            log::warn!("Translated shape {id} vanished");
            return Transition::To(StateRequest::Idle(None));
        };
        if let Err(e) = canvas.update_shape(id, |shape| shape.set_position(parent_point)) {
            log::warn!("Could not move {id}: {e}");
        }
        Transition::Stay
    }

    pub(super) fn on_complete(&mut self, canvas: &mut Canvas) -> Transition {
        self.end_interaction(canvas);
        match self.params.on_create {
            Some(follow_up) => Transition::To(follow_up.into_request()),
            None => Transition::To(StateRequest::Idle(Some(self.params.info))),
        }
    }

    pub(super) fn on_cancel(&mut self, canvas: &mut Canvas) -> Transition {
        let id = self.params.info.shape_id;
        let result = match (self.params.is_creating, self.params.cancel_position) {
            (true, None) => canvas.remove_shape(id).map(|_| ()),
            (_, restore) => {
                let position = restore.unwrap_or(self.start_position);
                canvas.update_shape(id, |shape| shape.set_position(position))
            }
        };
        if let Err(e) = result {
            log::warn!("Could not roll back translate of {id}: {e}");
        }
        self.end_interaction(canvas);
        Transition::To(StateRequest::Idle(None))
    }

    fn end_interaction(&self, canvas: &mut Canvas) {
        match self.params.on_interaction_end {
            InteractionEnd::Select => {}
            InteractionEnd::Note => {
                if canvas.session.hovered() == Some(self.params.info.shape_id) {
                    canvas.set_hovered(None);
                }
            }
        }
    }
}
