//! Editor mode, preview viewport, and hover/selection state.

use serde::{Deserialize, Serialize};

/// Whether the editor overlays are active or the page behaves normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Edit,
    Navigate,
}

/// Preview width selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Viewport {
    /// Preview width in CSS pixels; `None` means full width.
    pub fn preview_width(self) -> Option<u32> {
        match self {
            Viewport::Desktop => None,
            Viewport::Tablet => Some(768),
            Viewport::Mobile => Some(375),
        }
    }
}

/// Mode, viewport, and interaction state of one editing session.
///
/// Hovered/selected ids, when set, always refer to a registered element;
/// both are cleared whenever the mode leaves [`EditorMode::Edit`].
#[derive(Debug, Default, Serialize)]
pub struct EditorState {
    pub mode: EditorMode,
    pub viewport: Viewport,
    pub hovered_element_id: Option<String>,
    pub selected_element_id: Option<String>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch modes. Leaving edit mode drops hover and selection so stale
    /// ids never outlive the overlays.
    pub fn set_mode(&mut self, mode: EditorMode) {
        self.mode = mode;
        if mode != EditorMode::Edit {
            self.hovered_element_id = None;
            self.selected_element_id = None;
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Update the hovered element; ignored outside edit mode.
    pub fn hover_element(&mut self, id: Option<String>) {
        if self.mode == EditorMode::Edit {
            self.hovered_element_id = id;
        }
    }

    /// Update the selected element; ignored outside edit mode. Selecting
    /// replaces any previous selection, it never stacks.
    pub fn select_element(&mut self, id: Option<String>) {
        if self.mode == EditorMode::Edit {
            self.selected_element_id = id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = EditorState::new();
        assert_eq!(state.mode, EditorMode::Edit);
        assert_eq!(state.viewport, Viewport::Desktop);
        assert!(state.hovered_element_id.is_none());
        assert!(state.selected_element_id.is_none());
    }

    #[test]
    fn test_hover_and_select_in_edit_mode() {
        let mut state = EditorState::new();
        state.hover_element(Some("hero-title".into()));
        state.select_element(Some("hero-title".into()));
        assert_eq!(state.hovered_element_id.as_deref(), Some("hero-title"));
        assert_eq!(state.selected_element_id.as_deref(), Some("hero-title"));

        // Selection replaces, never stacks.
        state.select_element(Some("about-text".into()));
        assert_eq!(state.selected_element_id.as_deref(), Some("about-text"));
    }

    #[test]
    fn test_hover_ignored_in_navigate_mode() {
        let mut state = EditorState::new();
        state.set_mode(EditorMode::Navigate);

        state.hover_element(Some("hero-title".into()));
        state.select_element(Some("hero-title".into()));
        assert!(state.hovered_element_id.is_none());
        assert!(state.selected_element_id.is_none());
    }

    #[test]
    fn test_leaving_edit_mode_clears_interaction_state() {
        let mut state = EditorState::new();
        state.hover_element(Some("a".into()));
        state.select_element(Some("b".into()));

        state.set_mode(EditorMode::Navigate);
        assert!(state.hovered_element_id.is_none());
        assert!(state.selected_element_id.is_none());

        // Coming back to edit mode starts clean.
        state.set_mode(EditorMode::Edit);
        assert!(state.selected_element_id.is_none());
    }

    #[test]
    fn test_viewport_widths() {
        assert_eq!(Viewport::Desktop.preview_width(), None);
        assert_eq!(Viewport::Tablet.preview_width(), Some(768));
        assert_eq!(Viewport::Mobile.preview_width(), Some(375));
    }
}
