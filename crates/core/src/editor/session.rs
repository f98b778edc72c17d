//! One editing session: settings tree + registry + history + autosave.

use std::sync::Arc;

use serde_json::Value;

use crate::editor::autosave::{Autosave, SaveStatus, SettingsSink, DEFAULT_AUTOSAVE_DEBOUNCE};
use crate::editor::element::{EditableElement, ElementRegistry, ElementType};
use crate::editor::history::EditHistory;
use crate::editor::state::{EditorMode, EditorState, Viewport};
use crate::error::CoreError;
use crate::settings::write_at_path;
use crate::types::DbId;

/// Ephemeral state of a single admin editing one site.
///
/// All mutation of the settings tree funnels through the copy-on-write
/// path writer; every mutation reschedules the debounced autosave.
pub struct EditorSession {
    site_id: DbId,
    settings: Value,
    elements: ElementRegistry,
    history: EditHistory,
    state: EditorState,
    autosave: Autosave,
}

impl EditorSession {
    pub fn new(site_id: DbId, initial_settings: Value, sink: Arc<dyn SettingsSink>) -> Self {
        Self::with_debounce(site_id, initial_settings, sink, DEFAULT_AUTOSAVE_DEBOUNCE)
    }

    pub fn with_debounce(
        site_id: DbId,
        initial_settings: Value,
        sink: Arc<dyn SettingsSink>,
        debounce: std::time::Duration,
    ) -> Self {
        Self {
            site_id,
            settings: initial_settings,
            elements: ElementRegistry::new(),
            history: EditHistory::new(),
            state: EditorState::new(),
            autosave: Autosave::new(site_id, sink, debounce),
        }
    }

    pub fn site_id(&self) -> DbId {
        self.site_id
    }

    pub fn settings(&self) -> &Value {
        &self.settings
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    // -----------------------------------------------------------------------
    // Mode / viewport / interaction
    // -----------------------------------------------------------------------

    pub fn set_mode(&mut self, mode: EditorMode) {
        self.state.set_mode(mode);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.state.set_viewport(viewport);
    }

    /// Hover an element. Ignored outside edit mode or for unknown ids, so
    /// the state never references an unregistered element.
    pub fn hover_element(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if !self.elements.contains(id) {
                return;
            }
        }
        self.state.hover_element(id.map(str::to_string));
    }

    /// Select an element; same gating as [`hover_element`](Self::hover_element).
    pub fn select_element(&mut self, id: Option<&str>) {
        if let Some(id) = id {
            if !self.elements.contains(id) {
                return;
            }
        }
        self.state.select_element(id.map(str::to_string));
    }

    pub fn selected_element(&self) -> Option<&EditableElement> {
        let id = self.state.selected_element_id.as_deref()?;
        self.elements.get(id)
    }

    // -----------------------------------------------------------------------
    // Elements and edits
    // -----------------------------------------------------------------------

    pub fn register_element(&mut self, element: EditableElement) -> Result<(), CoreError> {
        self.elements.register(element)
    }

    pub fn element(&self, id: &str) -> Option<&EditableElement> {
        self.elements.get(id)
    }

    /// Replace the whole settings tree (e.g. from a structured form panel)
    /// and reschedule the autosave.
    pub fn update_settings(&mut self, new_settings: Value) {
        self.settings = new_settings;
        self.autosave.schedule(self.settings.clone());
    }

    /// Edit a text element. Unknown ids and type mismatches are silent
    /// no-ops; a path failure is a real error.
    pub fn update_text(&mut self, element_id: &str, value: &str) -> Result<(), CoreError> {
        self.apply_edit(element_id, ElementType::Text, Value::String(value.to_string()), None)
    }

    /// Edit an image element, optionally updating its alt text.
    pub fn update_image(
        &mut self,
        element_id: &str,
        url: &str,
        alt: Option<&str>,
    ) -> Result<(), CoreError> {
        self.apply_edit(element_id, ElementType::Image, Value::String(url.to_string()), alt)
    }

    /// Edit a video element.
    pub fn update_video(&mut self, element_id: &str, url: &str) -> Result<(), CoreError> {
        self.apply_edit(element_id, ElementType::Video, Value::String(url.to_string()), None)
    }

    fn apply_edit(
        &mut self,
        element_id: &str,
        expected: ElementType,
        value: Value,
        alt: Option<&str>,
    ) -> Result<(), CoreError> {
        let Some(element) = self.elements.get(element_id) else {
            tracing::debug!(element_id, "edit ignored: element not registered");
            return Ok(());
        };
        if element.kind != expected {
            tracing::debug!(element_id, "edit ignored: element type mismatch");
            return Ok(());
        }

        let mut snapshot = element.clone();
        snapshot.value = value.clone();
        if let Some(alt) = alt {
            snapshot.set_metadata("alt", Value::String(alt.to_string()));
        }

        self.settings = write_at_path(&self.settings, &snapshot.path, value)?;
        self.history.record_edit(snapshot.clone());
        self.elements.register(snapshot)?;
        self.autosave.schedule(self.settings.clone());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Undo / redo
    // -----------------------------------------------------------------------

    /// Step the history back and apply the restored snapshot to the tree.
    /// Returns `false` when there was nothing to undo.
    pub fn undo(&mut self) -> Result<bool, CoreError> {
        match self.history.undo() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Step the history forward again; mirror of [`undo`](Self::undo).
    pub fn redo(&mut self) -> Result<bool, CoreError> {
        match self.history.redo() {
            Some(snapshot) => {
                self.apply_snapshot(snapshot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply a history snapshot without recording a new edit (the redo
    /// branch must survive).
    fn apply_snapshot(&mut self, snapshot: EditableElement) -> Result<(), CoreError> {
        self.settings = write_at_path(&self.settings, &snapshot.path, snapshot.value.clone())?;
        self.elements.register(snapshot)?;
        self.autosave.schedule(self.settings.clone());
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Saving
    // -----------------------------------------------------------------------

    /// Cancel any pending debounce and persist immediately.
    pub async fn save_now(&self) -> Result<(), CoreError> {
        self.autosave.save_now(self.settings.clone()).await
    }
}
