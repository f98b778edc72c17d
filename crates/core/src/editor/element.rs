//! Editable elements and their registry.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::settings::PathSeg;

/// What kind of content an editable element controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Text,
    Image,
    Video,
    Color,
}

/// A single editable region of the page.
///
/// The rendering layer registers one of these per element it emits; the
/// `path` addresses the spot in the settings tree the element edits, and
/// `value` is the denormalized current value kept in sync with the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementType,
    pub path: Vec<PathSeg>,
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Free-form extras, e.g. `alt` text for images.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, Value>>,
}

impl EditableElement {
    pub fn new(id: impl Into<String>, kind: ElementType, path: Vec<PathSeg>, value: Value) -> Self {
        Self {
            id: id.into(),
            kind,
            path,
            value,
            label: None,
            metadata: None,
        }
    }

    /// Set or replace a single metadata entry, keeping the rest.
    pub fn set_metadata(&mut self, key: &str, value: Value) {
        self.metadata
            .get_or_insert_with(serde_json::Map::new)
            .insert(key.to_string(), value);
    }
}

/// Keyed store of registered editable elements, last-write-wins per id.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: HashMap<String, EditableElement>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element. The only validation is a non-empty id.
    pub fn register(&mut self, element: EditableElement) -> Result<(), CoreError> {
        if element.id.is_empty() {
            return Err(CoreError::Validation(
                "editable element id must not be empty".to_string(),
            ));
        }
        self.elements.insert(element.id.clone(), element);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&EditableElement> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut EditableElement> {
        self.elements.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_element(id: &str, value: &str) -> EditableElement {
        EditableElement::new(
            id,
            ElementType::Text,
            vec![PathSeg::key("hero"), PathSeg::key("title")],
            json!(value),
        )
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ElementRegistry::new();
        registry.register(text_element("hero-title", "Accueil")).unwrap();

        let element = registry.get("hero-title").unwrap();
        assert_eq!(element.kind, ElementType::Text);
        assert_eq!(element.value, json!("Accueil"));
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_register_is_last_write_wins() {
        let mut registry = ElementRegistry::new();
        registry.register(text_element("hero-title", "Un")).unwrap();
        registry.register(text_element("hero-title", "Deux")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("hero-title").unwrap().value, json!("Deux"));
    }

    #[test]
    fn test_register_rejects_empty_id() {
        let mut registry = ElementRegistry::new();
        assert!(registry.register(text_element("", "x")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_set_metadata() {
        let mut element = text_element("about-image", "");
        element.set_metadata("alt", json!("Tournage"));
        element.set_metadata("alt", json!("Plateau"));
        assert_eq!(element.metadata.unwrap()["alt"], json!("Plateau"));
    }
}
