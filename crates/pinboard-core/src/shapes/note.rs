//! Sticky note shape.

use super::{SerializableColor, ShapeId, ShapeTrait};
use crate::handles::{Handle, HandleId, HandleKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side length of a note before vertical growth.
pub const NOTE_SIZE: f64 = 200.0;

/// Gap between a note and the notes placed next to it.
pub const ADJACENT_NOTE_MARGIN: f64 = 20.0;

/// Offset from a note's origin to its center (ignoring growth).
pub const NOTE_CENTER_OFFSET: Vec2 = Vec2::new(NOTE_SIZE / 2.0, NOTE_SIZE / 2.0);

fn default_opacity() -> f64 {
    1.0
}

/// A square sticky note that grows downwards as its label gets longer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub(crate) id: ShapeId,
    /// Top-left corner in parent space.
    pub position: Point,
    /// Rotation angle in radians (around the top-left corner).
    #[serde(default)]
    pub rotation: f64,
    /// Extra height added below the base size.
    #[serde(default)]
    pub grow_y: f64,
    /// Label text.
    #[serde(default)]
    pub text: String,
    /// Background color.
    pub color: SerializableColor,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Note {
    /// Create an empty note at `position`.
    pub fn new(position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            rotation: 0.0,
            grow_y: 0.0,
            text: String::new(),
            color: SerializableColor::note_yellow(),
            opacity: 1.0,
        }
    }

    /// Set the label text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the rotation.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the vertical growth.
    pub fn with_grow_y(mut self, grow_y: f64) -> Self {
        self.grow_y = grow_y;
        self
    }

    /// Create a fresh note that continues `source` at another spot.
    ///
    /// Keeps the look of the source; label and growth start over.
    pub(crate) fn continuing(source: &Note, position: Point, rotation: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            rotation,
            grow_y: 0.0,
            text: String::new(),
            color: source.color,
            opacity: source.opacity,
        }
    }

    /// Full height including growth.
    pub fn height(&self) -> f64 {
        NOTE_SIZE + self.grow_y
    }
}

impl ShapeTrait for Note {
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
        Rect::new(0.0, 0.0, NOTE_SIZE, self.height())
    }

    fn handles(&self) -> Vec<Handle> {
        let height = self.height();
        let clone_handle = |id, x, y| Handle::new(self.id, id, HandleKind::Clone, Point::new(x, y));
        // Order matters: pits are matched to handles by index
        vec![
            clone_handle(HandleId::Top, NOTE_SIZE / 2.0, 0.0),
            clone_handle(HandleId::Right, NOTE_SIZE, height / 2.0),
            clone_handle(HandleId::Bottom, NOTE_SIZE / 2.0, height),
            clone_handle(HandleId::Left, 0.0, height / 2.0),
        ]
    }

    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        self.local_bounds().inflate(tolerance, tolerance).contains(point)
    }
}
