//! Arrow (connector) shape.

use super::{ShapeId, ShapeTrait};
use crate::handles::{Handle, HandleId, HandleKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One end of an arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Terminal {
    /// A free point in arrow space.
    Point { point: Point },
    /// Attached to another shape.
    Binding {
        /// Last laid-out position in arrow space.
        point: Point,
        /// The shape this end is attached to.
        bound_shape_id: ShapeId,
        /// Anchor inside the bound shape, normalized to its bounds (0..1).
        normalized_anchor: Point,
    },
}

impl Terminal {
    /// Position of the terminal in arrow space.
    pub fn point(&self) -> Point {
        match self {
            Terminal::Point { point } | Terminal::Binding { point, .. } => *point,
        }
    }

    /// The bound shape, if this terminal is attached.
    pub fn bound_shape_id(&self) -> Option<ShapeId> {
        match self {
            Terminal::Point { .. } => None,
            Terminal::Binding { bound_shape_id, .. } => Some(*bound_shape_id),
        }
    }
}

/// An arrow connecting two points, either of which may be bound to a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub(crate) id: ShapeId,
    /// Origin in parent space.
    pub position: Point,
    /// Rotation angle in radians (around the origin).
    #[serde(default)]
    pub rotation: f64,
    /// Start terminal.
    pub start: Terminal,
    /// End terminal (where the arrowhead points).
    pub end: Terminal,
    /// Perpendicular offset of the shaft's midpoint.
    #[serde(default)]
    pub bend: f64,
}

impl Arrow {
    /// Create an unbound arrow between two page points.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position: Point::ZERO,
            rotation: 0.0,
            start: Terminal::Point { point: start },
            end: Terminal::Point { point: end },
            bend: 0.0,
        }
    }

    /// Attach the start terminal to `shape_id`.
    pub fn bind_start(mut self, shape_id: ShapeId, normalized_anchor: Point) -> Self {
        self.start = Terminal::Binding {
            point: self.start.point(),
            bound_shape_id: shape_id,
            normalized_anchor,
        };
        self
    }

    /// Attach the end terminal to `shape_id`.
    pub fn bind_end(mut self, shape_id: ShapeId, normalized_anchor: Point) -> Self {
        self.end = Terminal::Binding {
            point: self.end.point(),
            bound_shape_id: shape_id,
            normalized_anchor,
        };
        self
    }

    /// The terminal a handle controls. The bend handle has none.
    pub fn terminal(&self, handle: HandleId) -> Option<&Terminal> {
        match handle {
            HandleId::Start => Some(&self.start),
            HandleId::End => Some(&self.end),
            _ => None,
        }
    }

    /// Move a terminal to a free point, dropping any binding.
    /// Returns false if `handle` does not control a terminal.
    pub fn set_terminal_point(&mut self, handle: HandleId, point: Point) -> bool {
        let terminal = match handle {
            HandleId::Start => &mut self.start,
            HandleId::End => &mut self.end,
            _ => return false,
        };
        *terminal = Terminal::Point { point };
        true
    }

    /// Midpoint of the shaft, pushed sideways by the bend.
    pub fn middle(&self) -> Point {
        let a = self.start.point();
        let b = self.end.point();
        let mid = a.midpoint(b);
        let dir = b - a;
        let len = dir.hypot();
        if len < f64::EPSILON {
            return mid;
        }
        let perp = Vec2::new(-dir.y / len, dir.x / len);
        mid + perp * self.bend
    }
}

impl ShapeTrait for Arrow {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn local_bounds(&self) -> Rect {
        Rect::from_points(self.start.point(), self.end.point()).union_pt(self.middle())
    }

    fn handles(&self) -> Vec<Handle> {
        vec![
            Handle::new(self.id, HandleId::Start, HandleKind::Vertex, self.start.point()),
            Handle::new(self.id, HandleId::Middle, HandleKind::Virtual, self.middle()),
            Handle::new(self.id, HandleId::End, HandleKind::Vertex, self.end.point()),
        ]
    }

    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        let middle = self.middle();
        let dist = super::point_to_segment_dist(point, self.start.point(), middle)
            .min(super::point_to_segment_dist(point, middle, self.end.point()));
        dist <= tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_terminal() {
        let target = Uuid::new_v4();
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))
            .bind_end(target, Point::new(0.5, 0.5));
        assert_eq!(arrow.terminal(HandleId::End).and_then(Terminal::bound_shape_id), Some(target));
        assert_eq!(arrow.terminal(HandleId::Start).and_then(Terminal::bound_shape_id), None);
        assert!(arrow.terminal(HandleId::Middle).is_none());
        assert_eq!(arrow.end.point(), Point::new(100.0, 0.0));
    }

    #[test]
    fn test_set_terminal_point_unbinds() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0))
            .bind_start(Uuid::new_v4(), Point::new(0.5, 0.5));
        assert!(arrow.set_terminal_point(HandleId::Start, Point::new(-10.0, 5.0)));
        assert_eq!(arrow.start, Terminal::Point { point: Point::new(-10.0, 5.0) });
        assert!(!arrow.set_terminal_point(HandleId::Middle, Point::ZERO));
    }

    #[test]
    fn test_middle_with_bend() {
        let mut arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        arrow.bend = 10.0;
        let middle = arrow.middle();
        assert!((middle.x - 50.0).abs() < f64::EPSILON);
        assert!((middle.y - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_shaft() {
        let arrow = Arrow::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(arrow.hit_test_local(Point::new(50.0, 2.0), 5.0));
        assert!(!arrow.hit_test_local(Point::new(50.0, 20.0), 5.0));
    }
}
