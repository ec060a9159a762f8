//! Canvas document and state management.

use crate::config::InteractionConfig;
use crate::handles::Handle;
use crate::input::InputState;
use crate::session::SessionState;
use crate::shapes::{Shape, ShapeId};
use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors from document mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Session is read-only")]
    ReadOnly,
    #[error("Shape limit of {0} reached")]
    ShapeLimit(usize),
}

/// Result type for document mutations.
pub type EditorResult<T> = Result<T, EditorError>;

/// The shapes on the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// All shapes in the document, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a shape on top of the others.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.z_order.push(id);
        self.shapes.insert(id, shape);
        id
    }

    /// Remove a shape from the document.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        self.z_order.retain(|&shape_id| shape_id != id);
        self.shapes.remove(&id)
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Find shapes at a page point, front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.shapes_ordered()
            .rev()
            .filter(|s| s.hit_test(point, tolerance))
            .map(Shape::id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Everything the interaction state machine reads and mutates.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub document: CanvasDocument,
    pub session: SessionState,
    pub input: InputState,
    pub config: InteractionConfig,
}

impl Canvas {
    /// Create an empty canvas with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty canvas with the given configuration.
    pub fn with_config(config: InteractionConfig) -> Self {
        Self {
            document: CanvasDocument::new(),
            session: SessionState::new(),
            input: InputState::new(&config),
            config,
        }
    }

    pub fn is_readonly(&self) -> bool {
        self.session.is_readonly
    }

    pub fn set_readonly(&mut self, readonly: bool) {
        self.session.is_readonly = readonly;
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.document.get_shape(id)
    }

    /// Transform from the shape's space to page space.
    pub fn page_transform(&self, id: ShapeId) -> Option<Affine> {
        self.shape(id).map(Shape::page_transform)
    }

    /// Convert a page point into the coordinate space of the shape's parent.
    ///
    /// The page is the parent of every shape, so this only checks that the
    /// shape exists.
    pub fn point_in_parent_space(&self, id: ShapeId, page_point: Point) -> Option<Point> {
        self.shape(id).map(|_| page_point)
    }

    /// Ordered handles of a shape.
    pub fn shape_handles(&self, id: ShapeId) -> Option<Vec<Handle>> {
        self.shape(id).map(Shape::handles)
    }

    /// Add a new shape to the page.
    pub fn create_shape(&mut self, shape: Shape) -> EditorResult<ShapeId> {
        if self.is_readonly() {
            return Err(EditorError::ReadOnly);
        }
        if self.document.len() >= self.config.max_shapes {
            return Err(EditorError::ShapeLimit(self.config.max_shapes));
        }
        let id = self.document.add_shape(shape);
        log::debug!("Created shape {id}");
        Ok(id)
    }

    /// Apply `update` to a shape in place.
    pub fn update_shape(&mut self, id: ShapeId, update: impl FnOnce(&mut Shape)) -> EditorResult<()> {
        if self.is_readonly() {
            return Err(EditorError::ReadOnly);
        }
        let shape = self
            .document
            .get_shape_mut(id)
            .ok_or(EditorError::ShapeNotFound(id))?;
        update(shape);
        Ok(())
    }

    /// Delete a shape and forget any UI state attached to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> EditorResult<Shape> {
        if self.is_readonly() {
            return Err(EditorError::ReadOnly);
        }
        let shape = self
            .document
            .remove_shape(id)
            .ok_or(EditorError::ShapeNotFound(id))?;
        self.session.remove(id);
        log::debug!("Removed shape {id}");
        Ok(shape)
    }

    pub fn set_hovered(&mut self, id: Option<ShapeId>) {
        self.session.set_hovered(id);
    }

    /// Select a shape (clears previous selection).
    pub fn select(&mut self, id: ShapeId) {
        self.session.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// Select a shape and open its label for editing.
    pub fn start_editing_with_label(&mut self, id: ShapeId, select_all: bool) {
        self.session.select(id);
        self.session.set_editing(id, select_all);
        log::debug!("Editing label of {id} (select_all: {select_all})");
    }

    pub fn stop_editing(&mut self) {
        self.session.clear_editing();
    }

    /// Find the handle under a page point, searching selected shapes front
    /// to back.
    pub fn hit_test_handles(&self, point: Point) -> Option<Handle> {
        let tolerance = self.config.handle_hit_tolerance;
        self.document
            .z_order
            .iter()
            .rev()
            .filter(|id| self.session.is_selected(**id))
            .filter_map(|&id| self.shape(id))
            .find_map(|shape| {
                let transform = shape.page_transform();
                shape
                    .handles()
                    .into_iter()
                    .find(|h| h.hit_test(transform, point, tolerance))
            })
    }
}
