//! Default settings trees and the defaults merge.
//!
//! Sites created before a settings field existed persist a partial tree;
//! every load merges the stored record over these defaults so readers
//! always see a fully-populated tree.

use chrono::Datelike;
use serde_json::{json, Value};

/// The complete default site settings tree.
///
/// New sites are created with this tree verbatim; existing sites are
/// merged over it on load.
pub fn default_settings() -> Value {
    json!({
        "siteName": "CARACTÈRE",
        "logo": "",
        "theme": {
            "primary": "#0a0a0a",
            "accent": "#ffffff",
            "text": "#ffffff",
            "background": "#000000",
            "typography": {
                "fontFamily": "Inter",
                "headingFont": "Playfair Display"
            }
        },
        "hero": {
            "videoUrl": "",
            "imageUrl": "",
            "overlayText": {
                "fr": "Productions Cinématographiques",
                "en": "Film Productions"
            },
            "title": { "fr": "CARACTÈRE", "en": "CARACTÈRE" }
        },
        "about": {
            "title": { "fr": "À propos", "en": "About" },
            "text": {
                "fr": "Une société de production cinématographique dédiée à la création de contenus originaux et innovants.",
                "en": "A film production company dedicated to creating original and innovative content."
            },
            "image": ""
        },
        "works": {
            "title": { "fr": "Nos Films", "en": "Our Films" }
        },
        "news": {
            "visible": false,
            "title": { "fr": "Actualités", "en": "News" },
            "articles": []
        },
        "contact": {
            "email": "",
            "address": "",
            "phone": "",
            "mapEmbed": ""
        },
        "footer": {
            "copyright": "",
            "links": []
        },
        "social": {
            "facebook": "",
            "twitter": "",
            "instagram": "",
            "youtube": "",
            "linkedin": ""
        }
    })
}

/// Default settings for a freshly-created work (catalogue entry).
pub fn default_work_settings() -> Value {
    let year = chrono::Utc::now().year();
    json!({
        "title": { "fr": "Nouveau film", "en": "New film" },
        "slug": format!("film-{}", chrono::Utc::now().timestamp()),
        "year": year,
        "poster": "",
        "trailer": "",
        "synopsis": { "fr": "", "en": "" },
        "genre": { "fr": "", "en": "" },
        "director": "",
        "crew": []
    })
}

/// Deep-merge a stored (possibly partial) settings tree over the defaults.
///
/// Objects merge recursively; scalars and arrays from the stored tree win
/// wholesale. Keys unknown to the defaults are preserved.
pub fn merge_defaults(loaded: &Value) -> Value {
    let mut merged = default_settings();
    deep_merge(&mut merged, loaded);
    merged
}

fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (base, overlay) => {
            if !overlay.is_null() {
                *base = overlay.clone();
            }
        }
    }
}
