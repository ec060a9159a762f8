//! Pointer input tracking: drag threshold and long-press detection.

use crate::config::InteractionConfig;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
}

/// Tracks the primary pointer across events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Page point where the current press started.
    origin_page_point: Point,
    /// Latest page point.
    current_page_point: Point,
    is_pointer_down: bool,
    is_dragging: bool,
    pressed_at: Option<Instant>,
    long_press_fired: bool,
    drag_threshold: f64,
    long_press: Duration,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(&InteractionConfig::default())
    }
}

impl InputState {
    /// Create an input state using the thresholds from `config`.
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            origin_page_point: Point::ZERO,
            current_page_point: Point::ZERO,
            is_pointer_down: false,
            is_dragging: false,
            pressed_at: None,
            long_press_fired: false,
            drag_threshold: config.drag_threshold,
            long_press: config.long_press(),
        }
    }

    /// Process a pointer event, timestamped now.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.handle_pointer_event_at(event, Instant::now());
    }

    /// Process a pointer event that happened at `now`.
    pub fn handle_pointer_event_at(&mut self, event: PointerEvent, now: Instant) {
        match event {
            PointerEvent::Down { position } => {
                self.origin_page_point = position;
                self.current_page_point = position;
                self.is_pointer_down = true;
                self.is_dragging = false;
                self.pressed_at = Some(now);
                self.long_press_fired = false;
            }
            PointerEvent::Move { position } => {
                self.current_page_point = position;
                if self.is_pointer_down && !self.is_dragging {
                    let travel = (position - self.origin_page_point).hypot2();
                    if travel > self.drag_threshold * self.drag_threshold {
                        self.is_dragging = true;
                    }
                }
            }
            PointerEvent::Up { position } => {
                self.current_page_point = position;
                self.is_pointer_down = false;
                self.is_dragging = false;
                self.pressed_at = None;
            }
        }
    }

    /// Returns true once per press when the pointer has been held still
    /// for the long-press duration.
    pub fn poll_long_press(&mut self, now: Instant) -> bool {
        if !self.is_pointer_down || self.is_dragging || self.long_press_fired {
            return false;
        }
        let Some(pressed_at) = self.pressed_at else {
            return false;
        };
        if now.saturating_duration_since(pressed_at) >= self.long_press {
            self.long_press_fired = true;
            return true;
        }
        false
    }

    pub fn origin_page_point(&self) -> Point {
        self.origin_page_point
    }

    pub fn current_page_point(&self) -> Point {
        self.current_page_point
    }

    pub fn is_pointer_down(&self) -> bool {
        self.is_pointer_down
    }

    /// Whether the press has travelled past the drag threshold.
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Get the drag delta from the press origin, if the pointer is down.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.is_pointer_down
            .then(|| self.current_page_point - self.origin_page_point)
    }
}
