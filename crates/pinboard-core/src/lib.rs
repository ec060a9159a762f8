//! Pinboard Core Library
//!
//! Handle interaction for a sticky-note canvas: pressing a note's clone
//! handle pulls a new note out of the adjacent pit, pressing an arrow
//! terminal hints the shape it is bound to.

pub mod canvas;
pub mod config;
pub mod editor;
pub mod handles;
pub mod hint;
pub mod input;
pub mod pit;
pub mod session;
pub mod shapes;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument, EditorError, EditorResult};
pub use config::{ConfigError, InteractionConfig};
pub use editor::Editor;
pub use handles::{Handle, HandleId, HandleKind};
pub use hint::{EphemeralOverrides, binding_hint_for};
pub use input::{InputState, PointerEvent};
pub use pit::{AdjacentNotePolicy, NearestNotePlacement, NotePits, adjacent_positions, note_pits, resolve_pit};
pub use session::{Cursor, CursorKind, SessionState, WidgetState};
pub use shapes::{Arrow, Note, Shape, ShapeId, Terminal};
pub use tools::{PointerTarget, SelectState, SelectTool, ToolEvent, ToolStateId};
