//! Visual editor state machine.
//!
//! Everything here is ephemeral, per-editing-session state: the registry
//! of editable elements, the undo/redo history, the mode/viewport
//! controller, and the debounced autosave scheduler. Nothing in this
//! module touches the database directly; persistence goes through the
//! [`SettingsSink`] seam.
//!
//! [`SettingsSink`]: autosave::SettingsSink

pub mod autosave;
pub mod element;
pub mod history;
pub mod session;
pub mod state;

pub use autosave::{Autosave, SaveStatus, SettingsSink, DEFAULT_AUTOSAVE_DEBOUNCE};
pub use element::{EditableElement, ElementRegistry, ElementType};
pub use history::EditHistory;
pub use session::EditorSession;
pub use state::{EditorMode, EditorState, Viewport};
