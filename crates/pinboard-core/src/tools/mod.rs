//! Select tool state machine.
//!
//! [`SelectTool`] owns the active state and the transition table. States
//! never switch themselves: every handler returns a [`Transition`] and the
//! coordinator runs the old state's exit before the new state's entry, so
//! cleanup happens on every path out of a state.

mod dragging_handle;
mod editing_shape;
mod idle;
mod pointing_handle;
mod translating;

pub use dragging_handle::DraggingHandle;
pub use editing_shape::EditingShape;
pub use idle::Idle;
pub use pointing_handle::PointingHandle;
pub use translating::{CreateFollowUp, InteractionEnd, TranslateParams, Translating};

use crate::canvas::Canvas;
use crate::handles::Handle;
use crate::pit::{AdjacentNotePolicy, NearestNotePlacement};
use crate::shapes::ShapeId;
use kurbo::Point;

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    /// Empty canvas.
    Canvas,
    /// The body of a shape.
    Shape(ShapeId),
    /// A handle of a selected shape.
    Handle(Handle),
}

/// Events the host dispatches to the select tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolEvent {
    PointerDown(PointerTarget),
    PointerMove,
    PointerUp,
    LongPress,
    Cancel,
    Complete,
    Interrupt,
}

/// What an interaction is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Shape,
    Handle,
}

/// Snapshot of the pointer-down that started an interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionInfo {
    pub target: TargetKind,
    pub shape_id: ShapeId,
    pub handle: Handle,
    /// Page point of the pointer-down.
    pub page_point: Point,
}

/// The state to switch to, with its entry payload.
#[derive(Debug, Clone, PartialEq)]
pub enum StateRequest {
    Idle(Option<InteractionInfo>),
    PointingHandle(InteractionInfo),
    DraggingHandle(InteractionInfo),
    Translating(TranslateParams),
    EditingShape { shape_id: ShapeId, select_all: bool },
}

/// Outcome of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Stay,
    To(StateRequest),
}

/// Identifies the active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolStateId {
    Idle,
    PointingHandle,
    DraggingHandle,
    Translating,
    EditingShape,
}

/// The active state with its data.
#[derive(Debug)]
pub enum SelectState {
    Idle(Idle),
    PointingHandle(PointingHandle),
    DraggingHandle(DraggingHandle),
    Translating(Translating),
    EditingShape(EditingShape),
}

impl SelectState {
    pub fn id(&self) -> ToolStateId {
        match self {
            SelectState::Idle(_) => ToolStateId::Idle,
            SelectState::PointingHandle(_) => ToolStateId::PointingHandle,
            SelectState::DraggingHandle(_) => ToolStateId::DraggingHandle,
            SelectState::Translating(_) => ToolStateId::Translating,
            SelectState::EditingShape(_) => ToolStateId::EditingShape,
        }
    }

    fn enter(canvas: &mut Canvas, request: StateRequest) -> Self {
        match request {
            StateRequest::Idle(info) => SelectState::Idle(Idle::on_enter(info)),
            StateRequest::PointingHandle(info) => {
                SelectState::PointingHandle(PointingHandle::on_enter(canvas, info))
            }
            StateRequest::DraggingHandle(info) => {
                SelectState::DraggingHandle(DraggingHandle::on_enter(canvas, info))
            }
            StateRequest::Translating(params) => {
                SelectState::Translating(Translating::on_enter(canvas, params))
            }
            StateRequest::EditingShape {
                shape_id,
                select_all,
            } => SelectState::EditingShape(EditingShape::on_enter(canvas, shape_id, select_all)),
        }
    }

    fn exit(self, canvas: &mut Canvas) {
        match self {
            SelectState::Idle(_) => {}
            SelectState::PointingHandle(state) => state.on_exit(canvas),
            SelectState::DraggingHandle(_) => {}
            SelectState::Translating(_) => {}
            SelectState::EditingShape(state) => state.on_exit(canvas),
        }
    }
}

/// Coordinator for the select tool's states.
#[derive(Debug)]
pub struct SelectTool {
    state: SelectState,
    placement: Box<dyn AdjacentNotePolicy>,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectTool {
    /// Create an idle select tool using the default note placement.
    pub fn new() -> Self {
        Self::with_placement(Box::new(NearestNotePlacement))
    }

    /// Create an idle select tool with a custom note placement policy.
    pub fn with_placement(placement: Box<dyn AdjacentNotePolicy>) -> Self {
        Self {
            state: SelectState::Idle(Idle::default()),
            placement,
        }
    }

    pub fn state(&self) -> &SelectState {
        &self.state
    }

    pub fn state_id(&self) -> ToolStateId {
        self.state.id()
    }

    /// Handle one event and apply the resulting transition.
    pub fn dispatch(&mut self, canvas: &mut Canvas, event: ToolEvent) -> ToolStateId {
        use ToolEvent::*;

        let placement = self.placement.as_ref();
        let transition = match (&mut self.state, event) {
            (SelectState::Idle(_), PointerDown(target)) => Idle::on_pointer_down(canvas, target),
            (SelectState::Idle(_), _) => Transition::Stay,

            (SelectState::PointingHandle(state), PointerMove) => state.on_pointer_move(canvas, placement),
            (SelectState::PointingHandle(state), PointerUp) => state.on_pointer_up(canvas, placement),
            (SelectState::PointingHandle(state), LongPress) => state.on_long_press(canvas),
            (SelectState::PointingHandle(state), Cancel) => state.on_cancel(),
            (SelectState::PointingHandle(state), Complete) => state.on_complete(),
            (SelectState::PointingHandle(state), Interrupt) => state.on_interrupt(),
            (SelectState::PointingHandle(_), PointerDown(_)) => Transition::Stay,

            (SelectState::DraggingHandle(state), PointerMove) => state.on_pointer_move(canvas),
            (SelectState::DraggingHandle(state), PointerUp | Complete) => state.on_complete(),
            (SelectState::DraggingHandle(state), Cancel | Interrupt) => state.on_cancel(canvas),
            (SelectState::DraggingHandle(_), PointerDown(_) | LongPress) => Transition::Stay,

            (SelectState::Translating(state), PointerMove) => state.on_pointer_move(canvas),
            (SelectState::Translating(state), PointerUp | Complete) => state.on_complete(canvas),
            (SelectState::Translating(state), Cancel | Interrupt) => state.on_cancel(canvas),
            (SelectState::Translating(_), PointerDown(_) | LongPress) => Transition::Stay,

            (SelectState::EditingShape(_), PointerDown(target)) => EditingShape::on_pointer_down(canvas, target),
            (SelectState::EditingShape(_), Complete | Cancel | Interrupt) => {
                Transition::To(StateRequest::Idle(None))
            }
            (SelectState::EditingShape(_), PointerMove | PointerUp | LongPress) => Transition::Stay,
        };

        if let Transition::To(request) = transition {
            self.transition(canvas, request);
        }
        self.state.id()
    }

    /// Leave the current state and enter the requested one.
    pub fn transition(&mut self, canvas: &mut Canvas, request: StateRequest) {
        let previous = std::mem::replace(&mut self.state, SelectState::Idle(Idle::default()));
        let from = previous.id();
        previous.exit(canvas);
        self.state = SelectState::enter(canvas, request);
        log::debug!("select: {:?} -> {:?}", from, self.state.id());
    }
}
