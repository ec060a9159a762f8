//! Session-scoped UI state: hover, selection, editing, hints and cursor.
//!
//! None of this is part of the document. It lives as long as the editing
//! session and is never persisted.

use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};

/// Cursor shapes the board asks the host to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorKind {
    #[default]
    Default,
    Grabbing,
}

/// Cursor override with its rotation (radians).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cursor {
    pub kind: CursorKind,
    pub rotation: f64,
}

impl Cursor {
    pub fn new(kind: CursorKind) -> Self {
        Self { kind, rotation: 0.0 }
    }
}

/// A shape whose label is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditingState {
    pub shape_id: ShapeId,
    /// Whether the whole label starts out selected.
    pub select_all: bool,
}

/// The UI state of a single shape, derived from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// Pointer is hovering over the shape.
    Hovered,
    /// Emphasized as the target of an in-progress interaction.
    Hinted,
    /// Shape is selected (shows handles).
    Selected,
    /// Shape's label is being edited.
    Editing,
}

/// UI state for the current session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    hovered: Option<ShapeId>,
    /// Selected shapes, in selection order.
    selected: Vec<ShapeId>,
    editing: Option<EditingState>,
    hinting: Vec<ShapeId>,
    cursor: Cursor,
    /// Whether the document may be changed.
    pub is_readonly: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the hovered shape ID (if any).
    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    /// Set the hovered shape.
    pub fn set_hovered(&mut self, id: Option<ShapeId>) {
        self.hovered = id;
    }

    /// Selected shape IDs in selection order.
    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selected.contains(&id)
    }

    /// Select a single shape (clears other selections).
    pub fn select(&mut self, id: ShapeId) {
        self.selected.clear();
        self.selected.push(id);
    }

    /// Clear all selections.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn editing(&self) -> Option<EditingState> {
        self.editing
    }

    /// Enter label editing for a shape.
    pub fn set_editing(&mut self, shape_id: ShapeId, select_all: bool) {
        self.editing = Some(EditingState {
            shape_id,
            select_all,
        });
    }

    /// Exit label editing.
    pub fn clear_editing(&mut self) {
        self.editing = None;
    }

    /// Shapes currently emphasized by an interaction.
    pub fn hinting_shapes(&self) -> &[ShapeId] {
        &self.hinting
    }

    /// Replace the hinted shapes. Duplicates are dropped.
    ///
    /// Only ephemeral overrides drive this, so a hint never outlives the
    /// interaction that set it.
    pub(crate) fn set_hinting_shapes(&mut self, ids: &[ShapeId]) {
        self.hinting.clear();
        for &id in ids {
            if !self.hinting.contains(&id) {
                self.hinting.push(id);
            }
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub(crate) fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Derive the widget state of a shape.
    pub fn widget_state(&self, id: ShapeId) -> WidgetState {
        if self.editing.is_some_and(|e| e.shape_id == id) {
            WidgetState::Editing
        } else if self.is_selected(id) {
            WidgetState::Selected
        } else if self.hinting.contains(&id) {
            WidgetState::Hinted
        } else if self.hovered == Some(id) {
            WidgetState::Hovered
        } else {
            WidgetState::Normal
        }
    }

    /// Forget a deleted shape.
    pub fn remove(&mut self, id: ShapeId) {
        self.selected.retain(|&s| s != id);
        self.hinting.retain(|&s| s != id);
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.editing.is_some_and(|e| e.shape_id == id) {
            self.editing = None;
        }
    }
}
