//! Handle definitions for shape manipulation.

use crate::shapes::ShapeId;
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a handle within its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleId {
    // Note clone handles
    Top,
    Right,
    Bottom,
    Left,
    // Arrow handles
    Start,
    Middle,
    End,
}

impl HandleId {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleId::Top => "top",
            HandleId::Right => "right",
            HandleId::Bottom => "bottom",
            HandleId::Left => "left",
            HandleId::Start => "start",
            HandleId::Middle => "middle",
            HandleId::End => "end",
        }
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of manipulation a handle performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Spawns or jumps to an adjacent shape (note edges).
    Clone,
    /// Moves a vertex (arrow terminals).
    Vertex,
    /// Derived point that reshapes the shape (arrow bend).
    Virtual,
}

/// A manipulation handle on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    /// The shape this handle belongs to.
    pub shape_id: ShapeId,
    /// Identifier within the shape.
    pub id: HandleId,
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Position in shape space.
    pub position: Point,
}

impl Handle {
    /// Create a new handle.
    pub fn new(shape_id: ShapeId, id: HandleId, kind: HandleKind, position: Point) -> Self {
        Self {
            shape_id,
            id,
            kind,
            position,
        }
    }

    /// Position in page space, given the owning shape's page transform.
    pub fn page_position(&self, page_transform: Affine) -> Point {
        page_transform * self.position
    }

    /// Check if a page-space point hits this handle.
    pub fn hit_test(&self, page_transform: Affine, point: Point, tolerance: f64) -> bool {
        let d = point - self.page_position(page_transform);
        d.hypot2() <= tolerance * tolerance
    }
}
