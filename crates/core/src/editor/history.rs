//! Linear undo/redo history of editable-element snapshots.
//!
//! One shared `{past, present, future}` track exists for the whole
//! session, not one per element: undoing after editing element A then
//! element B restores B's previous value. This mirrors the original
//! editor's behaviour and is kept deliberately (see DESIGN.md).

use crate::editor::element::EditableElement;

/// Single-branch history over full element snapshots.
#[derive(Debug, Default)]
pub struct EditHistory {
    past: Vec<EditableElement>,
    present: Option<EditableElement>,
    future: Vec<EditableElement>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fresh edit.
    ///
    /// The previous present snapshot moves into the past and the redo
    /// branch is discarded; this is the only transition that clears
    /// `future`.
    pub fn record_edit(&mut self, snapshot: EditableElement) {
        if let Some(present) = self.present.take() {
            self.past.push(present);
        }
        self.present = Some(snapshot);
        self.future.clear();
    }

    /// Step back one edit, returning the snapshot the caller must apply
    /// to the settings tree. Silent no-op (`None`) when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Option<EditableElement> {
        let previous = self.past.pop()?;
        if let Some(present) = self.present.take() {
            self.future.insert(0, present);
        }
        self.present = Some(previous.clone());
        Some(previous)
    }

    /// Step forward one edit; mirror of [`undo`](Self::undo).
    pub fn redo(&mut self) -> Option<EditableElement> {
        if self.future.is_empty() {
            return None;
        }
        let next = self.future.remove(0);
        if let Some(present) = self.present.take() {
            self.past.push(present);
        }
        self.present = Some(next.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn present(&self) -> Option<&EditableElement> {
        self.present.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::element::ElementType;
    use crate::settings::PathSeg;
    use serde_json::json;

    fn snapshot(value: &str) -> EditableElement {
        EditableElement::new(
            "hero-title",
            ElementType::Text,
            vec![PathSeg::key("hero"), PathSeg::key("title")],
            json!(value),
        )
    }

    #[test]
    fn test_empty_history_is_inert() {
        let mut history = EditHistory::new();
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn test_first_edit_sets_present_without_past() {
        let mut history = EditHistory::new();
        history.record_edit(snapshot("Un"));
        assert!(!history.can_undo());
        assert_eq!(history.present().unwrap().value, json!("Un"));
    }

    #[test]
    fn test_undo_then_redo_round_trip() {
        let mut history = EditHistory::new();
        for value in ["Un", "Deux", "Trois"] {
            history.record_edit(snapshot(value));
        }

        // Two undos walk back to the first edit.
        assert_eq!(history.undo().unwrap().value, json!("Deux"));
        assert_eq!(history.undo().unwrap().value, json!("Un"));
        assert!(!history.can_undo());
        assert!(history.can_redo());

        // Redos restore the exact forward sequence.
        assert_eq!(history.redo().unwrap().value, json!("Deux"));
        assert_eq!(history.redo().unwrap().value, json!("Trois"));
        assert!(!history.can_redo());
        assert_eq!(history.present().unwrap().value, json!("Trois"));
    }

    #[test]
    fn test_new_edit_discards_redo_branch() {
        let mut history = EditHistory::new();
        history.record_edit(snapshot("Un"));
        history.record_edit(snapshot("Deux"));

        history.undo();
        assert!(history.can_redo());

        history.record_edit(snapshot("Bis"));
        assert!(!history.can_redo(), "fresh edit must abandon the future branch");
        assert_eq!(history.present().unwrap().value, json!("Bis"));
    }

    #[test]
    fn test_undo_at_floor_is_a_no_op() {
        let mut history = EditHistory::new();
        history.record_edit(snapshot("Un"));

        assert!(history.undo().is_none());
        assert_eq!(history.present().unwrap().value, json!("Un"));
    }
}
