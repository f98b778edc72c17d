//! Public (visitor-facing) rendering of a site.
//!
//! The editor works on the raw bilingual tree; visitors get a localized
//! projection where every `{fr, en}` record has collapsed into a plain
//! string. Rendering is read-only and does not require authentication.

use serde::Serialize;
use serde_json::Value;

use crate::i18n::{is_bilingual, resolve_value, Lang};
use crate::settings::merge_defaults;
use crate::types::DbId;
use crate::works::Work;

/// Collapse every bilingual record in a tree to a plain string for `lang`.
///
/// Walks the tree recursively; plain strings, numbers, and booleans pass
/// through unchanged, arrays are localized element-wise. Missing
/// translations fall back to French, then to the empty string, so the
/// output never contains a `{fr, en}` object.
pub fn localize(value: &Value, lang: Lang) -> Value {
    match value {
        Value::Object(_) if is_bilingual(value) => Value::String(resolve_value(value, lang)),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), localize(child, lang)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|item| localize(item, lang)).collect()),
        other => other.clone(),
    }
}

/// A catalogue entry as exposed to visitors.
#[derive(Debug, Clone, Serialize)]
pub struct PublicWork {
    pub id: DbId,
    pub settings: Value,
}

/// One fully-resolved public view of a site.
#[derive(Debug, Clone, Serialize)]
pub struct PublicSite {
    pub lang: Lang,
    pub settings: Value,
    pub works: Vec<PublicWork>,
}

impl PublicSite {
    /// Assemble the public view: stored settings merged over the defaults
    /// (so sections added after the site was created still render), then
    /// everything localized for `lang`.
    pub fn build(settings: &Value, works: &[Work], lang: Lang) -> Self {
        let merged = merge_defaults(settings);
        Self {
            lang,
            settings: localize(&merged, lang),
            works: works
                .iter()
                .map(|work| PublicWork {
                    id: work.id,
                    settings: localize(&work.settings, lang),
                })
                .collect(),
        }
    }
}
