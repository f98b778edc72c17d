//! Path-addressed reads and copy-on-write writes into the settings tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;

/// One step of a settings path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSeg {
    Key(String),
    Index(usize),
}

impl PathSeg {
    pub fn key(key: impl Into<String>) -> Self {
        PathSeg::Key(key.into())
    }

    pub fn index(index: usize) -> Self {
        PathSeg::Index(index)
    }
}

impl From<&str> for PathSeg {
    fn from(key: &str) -> Self {
        PathSeg::Key(key.to_string())
    }
}

impl From<usize> for PathSeg {
    fn from(index: usize) -> Self {
        PathSeg::Index(index)
    }
}

/// Read the value at `path`, returning `None` if any intermediate step
/// is missing or of the wrong shape.
pub fn read_at_path<'a>(settings: &'a Value, path: &[PathSeg]) -> Option<&'a Value> {
    let mut current = settings;
    for seg in path {
        current = match seg {
            PathSeg::Key(key) => current.as_object()?.get(key)?,
            PathSeg::Index(index) => current.as_array()?.get(*index)?,
        };
    }
    Some(current)
}

/// Place `value` at `path`, returning a new tree.
///
/// The input tree is never mutated; prior snapshots held by the undo
/// history stay valid. Missing intermediate keys are created as empty
/// objects on the way down, so deeply nested fields can be set on a
/// partially-populated tree. An empty path is a programmer error and
/// fails with a validation error; index segments must land inside an
/// existing array.
pub fn write_at_path(
    settings: &Value,
    path: &[PathSeg],
    value: Value,
) -> Result<Value, CoreError> {
    let (last, intermediate) = path
        .split_last()
        .ok_or_else(|| CoreError::Validation("settings path must not be empty".to_string()))?;

    let mut new_settings = settings.clone();
    let mut current = &mut new_settings;

    for seg in intermediate {
        current = match seg {
            PathSeg::Key(key) => {
                let map = as_object_mut(current, key)?;
                let entry = map.entry(key.clone()).or_insert(Value::Null);
                // Treat null the same as absent: auto-create the branch.
                if entry.is_null() {
                    *entry = Value::Object(Map::new());
                }
                entry
            }
            PathSeg::Index(index) => {
                let arr = current.as_array_mut().ok_or_else(|| {
                    CoreError::Validation(format!("expected an array at index {index}"))
                })?;
                let len = arr.len();
                arr.get_mut(*index).ok_or_else(|| {
                    CoreError::Validation(format!(
                        "array index {index} out of bounds (len {len})"
                    ))
                })?
            }
        };
    }

    match last {
        PathSeg::Key(key) => {
            let map = as_object_mut(current, key)?;
            map.insert(key.clone(), value);
        }
        PathSeg::Index(index) => {
            let arr = current.as_array_mut().ok_or_else(|| {
                CoreError::Validation(format!("expected an array at index {index}"))
            })?;
            if *index < arr.len() {
                arr[*index] = value;
            } else if *index == arr.len() {
                arr.push(value);
            } else {
                return Err(CoreError::Validation(format!(
                    "array index {index} out of bounds (len {})",
                    arr.len()
                )));
            }
        }
    }

    Ok(new_settings)
}

fn as_object_mut<'a>(
    value: &'a mut Value,
    key: &str,
) -> Result<&'a mut Map<String, Value>, CoreError> {
    // Auto-created branches land here as empty objects; a scalar in the
    // way is a path error, not something to silently overwrite.
    value
        .as_object_mut()
        .ok_or_else(|| CoreError::Validation(format!("expected an object at key '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(segs: &[&str]) -> Vec<PathSeg> {
        segs.iter().map(|s| PathSeg::from(*s)).collect()
    }

    #[test]
    fn test_read_at_path() {
        let settings = json!({"hero": {"title": {"fr": "Accueil"}}});
        assert_eq!(
            read_at_path(&settings, &p(&["hero", "title", "fr"])),
            Some(&json!("Accueil"))
        );
        assert_eq!(read_at_path(&settings, &p(&["hero", "missing"])), None);
        assert_eq!(read_at_path(&settings, &p(&["missing", "deeper"])), None);
    }

    #[test]
    fn test_read_through_array_index() {
        let settings = json!({"news": {"articles": [{"title": "Un"}, {"title": "Deux"}]}});
        let path = vec![
            PathSeg::key("news"),
            PathSeg::key("articles"),
            PathSeg::index(1),
            PathSeg::key("title"),
        ];
        assert_eq!(read_at_path(&settings, &path), Some(&json!("Deux")));
    }

    #[test]
    fn test_write_does_not_mutate_original() {
        let settings = json!({"hero": {"title": "Avant"}});
        let updated = write_at_path(&settings, &p(&["hero", "title"]), json!("Après")).unwrap();

        assert_eq!(
            read_at_path(&settings, &p(&["hero", "title"])),
            Some(&json!("Avant"))
        );
        assert_eq!(
            read_at_path(&updated, &p(&["hero", "title"])),
            Some(&json!("Après"))
        );
    }

    #[test]
    fn test_write_creates_missing_intermediates() {
        let settings = json!({"hero": {}});
        let updated =
            write_at_path(&settings, &p(&["hero", "title", "fr"]), json!("Accueil")).unwrap();
        assert_eq!(updated, json!({"hero": {"title": {"fr": "Accueil"}}}));
    }

    #[test]
    fn test_write_creates_whole_branch_from_root() {
        let settings = json!({});
        let updated =
            write_at_path(&settings, &p(&["about", "text", "en"]), json!("Hello")).unwrap();
        assert_eq!(updated, json!({"about": {"text": {"en": "Hello"}}}));
    }

    #[test]
    fn test_write_through_null_branch() {
        let settings = json!({"works": null});
        let updated = write_at_path(&settings, &p(&["works", "title"]), json!("Films")).unwrap();
        assert_eq!(updated, json!({"works": {"title": "Films"}}));
    }

    #[test]
    fn test_write_empty_path_fails() {
        let settings = json!({});
        assert!(write_at_path(&settings, &[], json!("x")).is_err());
    }

    #[test]
    fn test_write_through_scalar_fails() {
        let settings = json!({"siteName": "CARACTÈRE"});
        let result = write_at_path(&settings, &p(&["siteName", "fr"]), json!("x"));
        assert!(result.is_err());
    }

    #[test]
    fn test_write_into_array_slot() {
        let settings = json!({"news": {"articles": [{"title": "Un"}]}});
        let path = vec![
            PathSeg::key("news"),
            PathSeg::key("articles"),
            PathSeg::index(0),
            PathSeg::key("title"),
        ];
        let updated = write_at_path(&settings, &path, json!("Premier")).unwrap();
        assert_eq!(
            updated,
            json!({"news": {"articles": [{"title": "Premier"}]}})
        );
    }

    #[test]
    fn test_write_appends_at_array_end() {
        let settings = json!({"links": ["a"]});
        let path = vec![PathSeg::key("links"), PathSeg::index(1)];
        let updated = write_at_path(&settings, &path, json!("b")).unwrap();
        assert_eq!(updated, json!({"links": ["a", "b"]}));
    }

    #[test]
    fn test_write_past_array_end_fails() {
        let settings = json!({"links": ["a"]});
        let path = vec![PathSeg::key("links"), PathSeg::index(5)];
        assert!(write_at_path(&settings, &path, json!("b")).is_err());
    }

    #[test]
    fn test_path_seg_serde_shape() {
        let path = vec![PathSeg::key("news"), PathSeg::index(2), PathSeg::key("title")];
        let encoded = serde_json::to_value(&path).unwrap();
        assert_eq!(encoded, json!(["news", 2, "title"]));
        let decoded: Vec<PathSeg> = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, path);
    }
}
