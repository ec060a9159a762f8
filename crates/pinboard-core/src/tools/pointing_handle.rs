//! Pointer is down on a handle but has not started dragging yet.
//!
//! From here the press turns into one of: a handle drag, a note pulled out
//! of a pit and translated, label editing on a neighboring note, or nothing.

use super::{CreateFollowUp, InteractionEnd, InteractionInfo, StateRequest, TargetKind, TranslateParams, Transition};
use crate::canvas::Canvas;
use crate::hint::{EphemeralOverrides, binding_hint_for};
use crate::pit::{AdjacentNotePolicy, resolve_pit};
use crate::session::CursorKind;
use crate::shapes::{NOTE_CENTER_OFFSET, Shape, ShapeId, rotate_vec};

#[derive(Debug)]
pub struct PointingHandle {
    pub info: InteractionInfo,
    overrides: EphemeralOverrides,
}

impl PointingHandle {
    pub(super) fn on_enter(canvas: &mut Canvas, info: InteractionInfo) -> Self {
        let hint = canvas
            .shape(info.shape_id)
            .and_then(|shape| binding_hint_for(shape, info.handle.id));
        let overrides = EphemeralOverrides::acquire(&mut canvas.session, hint, CursorKind::Grabbing);
        Self { info, overrides }
    }

    pub(super) fn on_exit(self, canvas: &mut Canvas) {
        self.overrides.release(&mut canvas.session);
    }

    pub(super) fn on_pointer_up(&mut self, canvas: &mut Canvas, placement: &dyn AdjacentNotePolicy) -> Transition {
        if canvas.is_readonly() {
            return Transition::To(StateRequest::Idle(Some(self.info)));
        }
        if let Some(next) = self.note_pit(canvas, placement, false) {
            return Transition::To(StateRequest::EditingShape {
                shape_id: next,
                select_all: true,
            });
        }
        Transition::To(StateRequest::Idle(Some(self.info)))
    }

    pub(super) fn on_pointer_move(&mut self, canvas: &mut Canvas, placement: &dyn AdjacentNotePolicy) -> Transition {
        if !canvas.input.is_dragging() || canvas.is_readonly() {
            return Transition::Stay;
        }

        let before = canvas.document.len();
        if let Some(next) = self.note_pit(canvas, placement, true) {
            let created = canvas.document.len() > before;
            if let Some(transition) = self.pull_note(canvas, next, created) {
                return transition;
            }
        }
        self.start_dragging_handle(canvas)
    }

    pub(super) fn on_long_press(&mut self, canvas: &Canvas) -> Transition {
        self.start_dragging_handle(canvas)
    }

    pub(super) fn on_cancel(&mut self) -> Transition {
        self.cancel()
    }

    pub(super) fn on_complete(&mut self) -> Transition {
        self.cancel()
    }

    pub(super) fn on_interrupt(&mut self) -> Transition {
        self.cancel()
    }

    fn cancel(&self) -> Transition {
        Transition::To(StateRequest::Idle(None))
    }

    fn start_dragging_handle(&self, canvas: &Canvas) -> Transition {
        if canvas.is_readonly() {
            return Transition::Stay;
        }
        Transition::To(StateRequest::DraggingHandle(self.info))
    }

    /// Resolve the pit behind the pressed handle, if the shape is a note.
    fn note_pit(
        &self,
        canvas: &mut Canvas,
        placement: &dyn AdjacentNotePolicy,
        create_if_missing: bool,
    ) -> Option<ShapeId> {
        if !matches!(canvas.shape(self.info.shape_id), Some(Shape::Note(_))) {
            return None;
        }
        resolve_pit(
            canvas,
            placement,
            self.info.shape_id,
            self.info.handle.id,
            create_if_missing,
        )
    }

    /// Center `next` under the pointer, select it and hand it to translating.
    fn pull_note(&self, canvas: &mut Canvas, next: ShapeId, created: bool) -> Option<Transition> {
        let shape = canvas.shape(next)?;
        let (rotation, previous_position) = (shape.rotation(), shape.position());
        let pointer = canvas.point_in_parent_space(next, canvas.input.current_page_point())?;
        let position = pointer - rotate_vec(NOTE_CENTER_OFFSET, rotation);
        if let Err(e) = canvas.update_shape(next, |shape| shape.set_position(position)) {
            log::warn!("Could not move note {next} under the pointer: {e}");
            return None;
        }

        canvas.set_hovered(Some(next));
        canvas.select(next);
        log::debug!("Pulled note {next} out of {} (created: {created})", self.info.shape_id);

        Some(Transition::To(StateRequest::Translating(TranslateParams {
            info: InteractionInfo {
                target: TargetKind::Shape,
                shape_id: next,
                ..self.info
            },
            on_interaction_end: InteractionEnd::Note,
            is_creating: true,
            cancel_position: (!created).then_some(previous_position),
            on_create: Some(CreateFollowUp::EditLabel {
                shape_id: next,
                select_all: true,
            }),
        })))
    }
}

#[cfg(test)]
mod tests {
    use crate::canvas::Canvas;
    use crate::handles::{Handle, HandleId};
    use crate::input::PointerEvent;
    use crate::session::{Cursor, CursorKind};
    use crate::shapes::{Arrow, NOTE_CENTER_OFFSET, Note, Shape, ShapeId};
    use crate::tools::{
        CreateFollowUp, InteractionEnd, PointerTarget, SelectState, SelectTool, TargetKind, ToolEvent,
        ToolStateId,
    };
    use kurbo::{Point, Vec2};

    fn handle(canvas: &Canvas, id: ShapeId, handle_id: HandleId) -> Handle {
        canvas
            .shape_handles(id)
            .unwrap()
            .into_iter()
            .find(|h| h.id == handle_id)
            .unwrap()
    }

    fn press(canvas: &mut Canvas, tool: &mut SelectTool, id: ShapeId, handle_id: HandleId) -> Point {
        let h = handle(canvas, id, handle_id);
        let position = h.page_position(canvas.page_transform(id).unwrap());
        canvas.input.handle_pointer_event(PointerEvent::Down { position });
        assert_eq!(
            tool.dispatch(canvas, ToolEvent::PointerDown(PointerTarget::Handle(h))),
            ToolStateId::PointingHandle
        );
        position
    }

    fn move_to(canvas: &mut Canvas, tool: &mut SelectTool, position: Point) -> ToolStateId {
        canvas.input.handle_pointer_event(PointerEvent::Move { position });
        tool.dispatch(canvas, ToolEvent::PointerMove)
    }

    fn release(canvas: &mut Canvas, tool: &mut SelectTool) -> ToolStateId {
        let position = canvas.input.current_page_point();
        canvas.input.handle_pointer_event(PointerEvent::Up { position });
        tool.dispatch(canvas, ToolEvent::PointerUp)
    }

    /// A note with an arrow whose start is bound to it.
    fn bound_arrow(canvas: &mut Canvas) -> (ShapeId, ShapeId) {
        let note = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        let arrow = canvas
            .create_shape(Shape::Arrow(
                Arrow::new(Point::new(100.0, 100.0), Point::new(400.0, 100.0)).bind_start(note, Point::new(0.5, 0.5)),
            ))
            .unwrap();
        canvas.select(arrow);
        (note, arrow)
    }

    fn assert_overrides_released(canvas: &Canvas) {
        assert!(canvas.session.hinting_shapes().is_empty());
        assert_eq!(canvas.session.cursor(), Cursor::default());
    }

    #[test]
    fn test_enter_hints_bound_terminal() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let (note, arrow) = bound_arrow(&mut canvas);

        press(&mut canvas, &mut tool, arrow, HandleId::Start);
        assert_eq!(canvas.session.hinting_shapes(), &[note]);
        assert_eq!(canvas.session.cursor().kind, CursorKind::Grabbing);
    }

    #[test]
    fn test_enter_without_binding_leaves_hint_unset() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let (note, arrow) = bound_arrow(&mut canvas);

        press(&mut canvas, &mut tool, arrow, HandleId::End);
        assert!(canvas.session.hinting_shapes().is_empty());
        assert_eq!(canvas.session.cursor().kind, CursorKind::Grabbing);
        tool.dispatch(&mut canvas, ToolEvent::Cancel);

        canvas.select(note);
        press(&mut canvas, &mut tool, note, HandleId::Top);
        assert!(canvas.session.hinting_shapes().is_empty());
    }

    #[test]
    fn test_every_exit_path_releases_overrides() {
        let exits: [fn(&mut Canvas, &mut SelectTool) -> ToolStateId; 6] = [
            |c, t| release(c, t),
            |c, t| t.dispatch(c, ToolEvent::Cancel),
            |c, t| t.dispatch(c, ToolEvent::Complete),
            |c, t| t.dispatch(c, ToolEvent::Interrupt),
            |c, t| t.dispatch(c, ToolEvent::LongPress),
            |c, t| move_to(c, t, Point::new(100.0, 300.0)),
        ];
        for exit in exits {
            let mut canvas = Canvas::new();
            let mut tool = SelectTool::new();
            let (_, arrow) = bound_arrow(&mut canvas);
            press(&mut canvas, &mut tool, arrow, HandleId::Start);
            assert!(!canvas.session.hinting_shapes().is_empty());

            assert_ne!(exit(&mut canvas, &mut tool), ToolStateId::PointingHandle);
            assert_overrides_released(&canvas);
        }
    }

    #[test]
    fn test_drag_pulls_new_note_out_of_pit() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas
            .create_shape(Shape::Note(Note::new(Point::ZERO).with_rotation(0.3)))
            .unwrap();
        canvas.select(source);
        let origin = press(&mut canvas, &mut tool, source, HandleId::Right);

        // Under the drag threshold nothing happens
        assert_eq!(
            move_to(&mut canvas, &mut tool, origin + Vec2::new(1.0, 1.0)),
            ToolStateId::PointingHandle
        );
        assert_eq!(canvas.document.len(), 1);

        let pointer = origin + Vec2::new(180.0, 40.0);
        assert_eq!(move_to(&mut canvas, &mut tool, pointer), ToolStateId::Translating);
        assert_eq!(canvas.document.len(), 2);
        assert_overrides_released(&canvas);

        let SelectState::Translating(translating) = tool.state() else {
            panic!("expected translating");
        };
        let params = translating.params();
        let next = params.info.shape_id;
        assert_ne!(next, source);
        assert_eq!(params.info.target, TargetKind::Shape);
        assert_eq!(params.info.handle.id, HandleId::Right);
        assert_eq!(params.info.page_point, origin);
        assert_eq!(params.on_interaction_end, InteractionEnd::Note);
        assert!(params.is_creating);
        assert_eq!(params.cancel_position, None);
        assert_eq!(
            params.on_create,
            Some(CreateFollowUp::EditLabel {
                shape_id: next,
                select_all: true
            })
        );

        let created = canvas.shape(next).unwrap();
        assert!((created.rotation() - 0.3).abs() < 1e-12);
        let center = created.page_transform() * NOTE_CENTER_OFFSET.to_point();
        assert!((center - pointer).hypot() < 1e-9);
        assert_eq!(canvas.session.selected(), &[next]);
        assert_eq!(canvas.session.hovered(), Some(next));
    }

    #[test]
    fn test_drag_reuses_existing_neighbor() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        let neighbor = canvas
            .create_shape(Shape::Note(Note::new(Point::new(0.0, 220.0))))
            .unwrap();
        canvas.select(source);
        let origin = press(&mut canvas, &mut tool, source, HandleId::Bottom);

        move_to(&mut canvas, &mut tool, origin + Vec2::new(0.0, 60.0));
        assert_eq!(canvas.document.len(), 2);
        let SelectState::Translating(translating) = tool.state() else {
            panic!("expected translating");
        };
        assert_eq!(translating.params().info.shape_id, neighbor);
        assert_eq!(translating.params().cancel_position, Some(Point::new(0.0, 220.0)));

        // Cancelling puts the neighbor back instead of deleting it
        tool.dispatch(&mut canvas, ToolEvent::Cancel);
        assert_eq!(canvas.shape(neighbor).unwrap().position(), Point::new(0.0, 220.0));
    }

    #[test]
    fn test_release_opens_neighbor_label() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        let neighbor = canvas
            .create_shape(Shape::Note(Note::new(Point::new(-220.0, 0.0))))
            .unwrap();
        canvas.select(source);
        press(&mut canvas, &mut tool, source, HandleId::Left);

        assert_eq!(release(&mut canvas, &mut tool), ToolStateId::EditingShape);
        let editing = canvas.session.editing().unwrap();
        assert_eq!(editing.shape_id, neighbor);
        assert!(editing.select_all);
        assert_eq!(canvas.session.selected(), &[neighbor]);
        assert_overrides_released(&canvas);
    }

    #[test]
    fn test_release_without_neighbor_returns_to_idle_with_info() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        canvas.select(source);
        let origin = press(&mut canvas, &mut tool, source, HandleId::Top);

        assert_eq!(release(&mut canvas, &mut tool), ToolStateId::Idle);
        assert_eq!(canvas.document.len(), 1);
        let SelectState::Idle(idle) = tool.state() else {
            panic!("expected idle");
        };
        let info = idle.info.unwrap();
        assert_eq!(info.shape_id, source);
        assert_eq!(info.target, TargetKind::Handle);
        assert_eq!(info.handle.id, HandleId::Top);
        assert_eq!(info.page_point, origin);
    }

    #[test]
    fn test_release_on_arrow_returns_to_idle_with_info() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let (_, arrow) = bound_arrow(&mut canvas);
        press(&mut canvas, &mut tool, arrow, HandleId::End);

        assert_eq!(release(&mut canvas, &mut tool), ToolStateId::Idle);
        let SelectState::Idle(idle) = tool.state() else {
            panic!("expected idle");
        };
        assert_eq!(idle.info.map(|info| info.shape_id), Some(arrow));
    }

    #[test]
    fn test_long_press_starts_handle_drag_on_any_shape() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let (note, arrow) = bound_arrow(&mut canvas);

        press(&mut canvas, &mut tool, arrow, HandleId::Middle);
        assert_eq!(tool.dispatch(&mut canvas, ToolEvent::LongPress), ToolStateId::DraggingHandle);
        tool.dispatch(&mut canvas, ToolEvent::Complete);

        canvas.select(note);
        press(&mut canvas, &mut tool, note, HandleId::Bottom);
        assert_eq!(tool.dispatch(&mut canvas, ToolEvent::LongPress), ToolStateId::DraggingHandle);
        assert_eq!(canvas.document.len(), 2);
    }

    #[test]
    fn test_readonly_session_never_drags() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        canvas.select(source);
        canvas.set_readonly(true);
        let origin = press(&mut canvas, &mut tool, source, HandleId::Right);

        assert_eq!(
            move_to(&mut canvas, &mut tool, origin + Vec2::new(100.0, 0.0)),
            ToolStateId::PointingHandle
        );
        assert_eq!(tool.dispatch(&mut canvas, ToolEvent::LongPress), ToolStateId::PointingHandle);
        assert_eq!(canvas.document.len(), 1);

        assert_eq!(tool.dispatch(&mut canvas, ToolEvent::Interrupt), ToolStateId::Idle);
        assert_overrides_released(&canvas);
    }

    #[test]
    fn test_readonly_release_does_not_open_label() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        canvas
            .create_shape(Shape::Note(Note::new(Point::new(-220.0, 0.0))))
            .unwrap();
        canvas.select(source);
        canvas.set_readonly(true);
        press(&mut canvas, &mut tool, source, HandleId::Left);

        assert_eq!(release(&mut canvas, &mut tool), ToolStateId::Idle);
        assert_eq!(canvas.session.editing(), None);
        assert_eq!(canvas.session.selected(), &[source]);
        let SelectState::Idle(idle) = tool.state() else {
            panic!("expected idle");
        };
        assert_eq!(idle.info.map(|info| info.shape_id), Some(source));
    }

    #[test]
    fn test_pits_follow_source_moved_after_press() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let source = canvas.create_shape(Shape::Note(Note::new(Point::ZERO))).unwrap();
        // Sits in the right pit of the source's original spot
        let stale = canvas
            .create_shape(Shape::Note(Note::new(Point::new(220.0, 0.0))))
            .unwrap();
        // Sits in the right pit once the source has moved
        let neighbor = canvas
            .create_shape(Shape::Note(Note::new(Point::new(520.0, 0.0))))
            .unwrap();
        canvas.select(source);
        press(&mut canvas, &mut tool, source, HandleId::Right);

        canvas
            .update_shape(source, |shape| shape.set_position(Point::new(300.0, 0.0)))
            .unwrap();
        let pointer = Point::new(260.0, 100.0);
        assert_eq!(move_to(&mut canvas, &mut tool, pointer), ToolStateId::Translating);

        let SelectState::Translating(translating) = tool.state() else {
            panic!("expected translating");
        };
        assert_eq!(translating.params().info.shape_id, neighbor);
        assert_eq!(canvas.document.len(), 3);
        assert_eq!(canvas.shape(stale).unwrap().position(), Point::new(220.0, 0.0));
        let center = canvas.shape(neighbor).unwrap().page_transform() * NOTE_CENTER_OFFSET.to_point();
        assert!((center - pointer).hypot() < 1e-9);
    }

    #[test]
    fn test_move_on_arrow_falls_through_to_handle_drag() {
        let mut canvas = Canvas::new();
        let mut tool = SelectTool::new();
        let (_, arrow) = bound_arrow(&mut canvas);
        let origin = press(&mut canvas, &mut tool, arrow, HandleId::End);

        assert_eq!(
            move_to(&mut canvas, &mut tool, origin + Vec2::new(0.0, 50.0)),
            ToolStateId::DraggingHandle
        );
        assert_eq!(canvas.document.len(), 2);
    }
}
