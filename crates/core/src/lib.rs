//! Domain logic for the vitrine site builder.
//!
//! Everything in this crate is independent of the HTTP layer and the
//! database: the bilingual text resolver, the path-addressed settings
//! tree, the visual editor state machine (element registry, undo/redo
//! history, autosave scheduler, mode/viewport controller), the works
//! catalogue service, and the public renderer.

pub mod editor;
pub mod error;
pub mod i18n;
pub mod render;
pub mod settings;
pub mod types;
pub mod works;
