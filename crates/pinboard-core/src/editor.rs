//! Host-facing entry point: raw pointer input in, tool events out.

use crate::canvas::Canvas;
use crate::config::InteractionConfig;
use crate::input::PointerEvent;
use crate::pit::AdjacentNotePolicy;
use crate::tools::{PointerTarget, SelectState, SelectTool, ToolEvent, ToolStateId};
use kurbo::Point;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// A canvas driven by the select tool.
#[derive(Debug, Default)]
pub struct Editor {
    pub canvas: Canvas,
    tool: SelectTool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: InteractionConfig) -> Self {
        Self {
            canvas: Canvas::with_config(config),
            tool: SelectTool::new(),
        }
    }

    /// Use a custom policy for filling note pits.
    pub fn with_placement(mut self, placement: Box<dyn AdjacentNotePolicy>) -> Self {
        self.tool = SelectTool::with_placement(placement);
        self
    }

    pub fn state(&self) -> &SelectState {
        self.tool.state()
    }

    pub fn state_id(&self) -> ToolStateId {
        self.tool.state_id()
    }

    pub fn pointer_down(&mut self, point: Point) -> ToolStateId {
        self.pointer_down_at(point, Instant::now())
    }

    /// Press at `point`, hitting handles of selected shapes first, then
    /// shape bodies, then the canvas.
    pub fn pointer_down_at(&mut self, point: Point, now: Instant) -> ToolStateId {
        self.canvas
            .input
            .handle_pointer_event_at(PointerEvent::Down { position: point }, now);
        let target = self.target_at(point);
        log::trace!("Pointer down at {point:?} on {target:?}");
        self.tool.dispatch(&mut self.canvas, ToolEvent::PointerDown(target))
    }

    pub fn pointer_move(&mut self, point: Point) -> ToolStateId {
        self.canvas
            .input
            .handle_pointer_event(PointerEvent::Move { position: point });
        self.tool.dispatch(&mut self.canvas, ToolEvent::PointerMove)
    }

    pub fn pointer_up(&mut self, point: Point) -> ToolStateId {
        self.canvas
            .input
            .handle_pointer_event(PointerEvent::Up { position: point });
        self.tool.dispatch(&mut self.canvas, ToolEvent::PointerUp)
    }

    /// Advance timers; delivers a long press once the pointer has been held
    /// still long enough.
    pub fn tick(&mut self, now: Instant) -> ToolStateId {
        if self.canvas.input.poll_long_press(now) {
            return self.tool.dispatch(&mut self.canvas, ToolEvent::LongPress);
        }
        self.tool.state_id()
    }

    pub fn cancel(&mut self) -> ToolStateId {
        self.tool.dispatch(&mut self.canvas, ToolEvent::Cancel)
    }

    pub fn complete(&mut self) -> ToolStateId {
        self.tool.dispatch(&mut self.canvas, ToolEvent::Complete)
    }

    pub fn interrupt(&mut self) -> ToolStateId {
        self.tool.dispatch(&mut self.canvas, ToolEvent::Interrupt)
    }

    fn target_at(&self, point: Point) -> PointerTarget {
        if let Some(handle) = self.canvas.hit_test_handles(point) {
            return PointerTarget::Handle(handle);
        }
        self.canvas
            .document
            .shapes_at_point(point, 0.0)
            .first()
            .map_or(PointerTarget::Canvas, |&id| PointerTarget::Shape(id))
    }
}
