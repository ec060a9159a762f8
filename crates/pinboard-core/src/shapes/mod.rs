//! Shape definitions for the board.

mod arrow;
mod note;

pub use arrow::{Arrow, Terminal};
pub use note::{ADJACENT_NOTE_MARGIN, NOTE_CENTER_OFFSET, NOTE_SIZE, Note};

use crate::handles::Handle;
use kurbo::{Affine, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Default sticky-note yellow.
    pub fn note_yellow() -> Self {
        Color::from_rgba8(255, 226, 110, 255).into()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Rotate a vector by `angle` radians.
pub fn rotate_vec(v: Vec2, angle: f64) -> Vec2 {
    let (sin_r, cos_r) = angle.sin_cos();
    Vec2::new(v.x * cos_r - v.y * sin_r, v.x * sin_r + v.y * cos_r)
}

/// Rotation angle (radians) carried by an affine transform.
pub fn affine_rotation(affine: Affine) -> f64 {
    let coeffs = affine.as_coeffs();
    coeffs[1].atan2(coeffs[0])
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Common trait for all shapes.
///
/// Positions are expressed in the parent's coordinate space. Every shape on
/// the board is a direct child of the page, so parent space and page space
/// coincide.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> ShapeId;

    /// Origin of the shape in parent space.
    fn position(&self) -> Point;

    /// Move the shape's origin.
    fn set_position(&mut self, position: Point);

    /// Rotation around the origin, in radians.
    fn rotation(&self) -> f64;

    /// Bounds in the shape's own (unrotated) coordinate space.
    fn local_bounds(&self) -> Rect;

    /// Ordered manipulation handles, positioned in shape space.
    fn handles(&self) -> Vec<Handle>;

    /// Check if a point in shape space hits this shape.
    fn hit_test_local(&self, point: Point, tolerance: f64) -> bool;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Note(Note),
    Arrow(Arrow),
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        match self {
            Shape::Note(s) => s.id(),
            Shape::Arrow(s) => s.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Shape::Note(s) => s.position(),
            Shape::Arrow(s) => s.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Shape::Note(s) => s.set_position(position),
            Shape::Arrow(s) => s.set_position(position),
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Shape::Note(s) => s.rotation(),
            Shape::Arrow(s) => s.rotation(),
        }
    }

    pub fn local_bounds(&self) -> Rect {
        match self {
            Shape::Note(s) => s.local_bounds(),
            Shape::Arrow(s) => s.local_bounds(),
        }
    }

    pub fn handles(&self) -> Vec<Handle> {
        match self {
            Shape::Note(s) => s.handles(),
            Shape::Arrow(s) => s.handles(),
        }
    }

    /// Transform from shape space to page space.
    pub fn page_transform(&self) -> Affine {
        Affine::translate(self.position().to_vec2()) * Affine::rotate(self.rotation())
    }

    /// Axis-aligned bounding box in page space.
    pub fn page_bounds(&self) -> Rect {
        let local = self.local_bounds();
        let transform = self.page_transform();
        let corners = [
            Point::new(local.x0, local.y0),
            Point::new(local.x1, local.y0),
            Point::new(local.x1, local.y1),
            Point::new(local.x0, local.y1),
        ];
        let rotated: Vec<Point> = corners.iter().map(|&p| transform * p).collect();

        let min_x = rotated.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let max_x = rotated.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let min_y = rotated.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = rotated.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Check if a page-space point hits this shape.
    pub fn hit_test(&self, page_point: Point, tolerance: f64) -> bool {
        let local = self.page_transform().inverse() * page_point;
        match self {
            Shape::Note(s) => s.hit_test_local(local, tolerance),
            Shape::Arrow(s) => s.hit_test_local(local, tolerance),
        }
    }

    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Shape::Note(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_arrow(&self) -> Option<&Arrow> {
        match self {
            Shape::Arrow(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_arrow_mut(&mut self) -> Option<&mut Arrow> {
        match self {
            Shape::Arrow(a) => Some(a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_vec_quarter_turn() {
        let v = rotate_vec(Vec2::new(1.0, 0.0), FRAC_PI_2);
        assert!(v.x.abs() < 1e-9);
        assert!((v.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_note_yellow_converts_to_peniko() {
        let yellow = SerializableColor::note_yellow();
        assert_eq!(yellow, SerializableColor::new(255, 226, 110, 255));
        let color: Color = yellow.into();
        assert_eq!(SerializableColor::from(color), yellow);
    }

    #[test]
    fn test_affine_rotation_roundtrip() {
        let affine = Affine::translate((10.0, 20.0)) * Affine::rotate(0.7);
        assert!((affine_rotation(affine) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_page_bounds_of_rotated_note() {
        let mut note = Note::new(Point::new(0.0, 0.0));
        note.rotation = FRAC_PI_2;
        let bounds = Shape::Note(note).page_bounds();
        // A quarter turn around the top-left corner swings the note to the left
        assert!((bounds.x0 + NOTE_SIZE).abs() < 1e-9);
        assert!(bounds.x1.abs() < 1e-9);
        assert!(bounds.y0.abs() < 1e-9);
        assert!((bounds.y1 - NOTE_SIZE).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_respects_rotation() {
        let mut note = Note::new(Point::new(0.0, 0.0));
        note.rotation = FRAC_PI_2;
        let shape = Shape::Note(note);
        assert!(shape.hit_test(Point::new(-100.0, 100.0), 0.0));
        assert!(!shape.hit_test(Point::new(100.0, 100.0), 0.0));
    }

    #[test]
    fn test_point_to_segment_dist() {
        let d = point_to_segment_dist(
            Point::new(5.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!((d - 3.0).abs() < f64::EPSILON);
    }
}
