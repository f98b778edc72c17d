//! Bilingual (French/English) text resolution.
//!
//! Settings leaves can be either a plain string (legacy, non-translated
//! content) or a `{fr, en}` record. The polymorphism is confined to this
//! module: callers resolve once at the boundary and work with plain
//! strings everywhere else.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Supported site languages. French is the canonical fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Fr,
    En,
}

impl Lang {
    /// Two-letter language code as stored in settings objects.
    pub fn code(self) -> &'static str {
        match self {
            Lang::Fr => "fr",
            Lang::En => "en",
        }
    }

    /// Parse a language code, defaulting to French for anything unknown.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Lang::En,
            _ => Lang::Fr,
        }
    }
}

/// A `{fr, en}` translation record.
///
/// Fields default to empty strings so partially-migrated records
/// (e.g. `{"fr": "..."}` only) still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TranslatableText {
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub en: String,
}

impl TranslatableText {
    pub fn new(fr: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            fr: fr.into(),
            en: en.into(),
        }
    }

    /// The text for `lang`, falling back to French, then the empty string.
    pub fn get(&self, lang: Lang) -> &str {
        let preferred = match lang {
            Lang::Fr => &self.fr,
            Lang::En => &self.en,
        };
        if !preferred.is_empty() {
            preferred
        } else {
            &self.fr
        }
    }
}

/// A settings text leaf: either plain (legacy) or bilingual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Text {
    Plain(String),
    Bilingual(TranslatableText),
}

/// Resolve a possibly-absent text leaf to a plain string.
///
/// - `None` resolves to the empty string.
/// - A plain string is returned unchanged.
/// - A bilingual record resolves to the requested language, falling back
///   to French, falling back to the empty string.
///
/// This is a total function; it never fails.
pub fn resolve(text: Option<&Text>, lang: Lang) -> String {
    match text {
        None => String::new(),
        Some(Text::Plain(s)) => s.clone(),
        Some(Text::Bilingual(t)) => t.get(lang).to_string(),
    }
}

/// Returns `true` if a JSON value looks like a `{fr, en}` record.
pub fn is_bilingual(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.contains_key("fr") && map.contains_key("en"))
}

/// Resolve a raw JSON settings leaf to a plain string.
///
/// Mirrors [`resolve`] for untyped tree walking: strings pass through,
/// bilingual objects collapse to the requested language, anything else
/// resolves to the empty string.
pub fn resolve_value(value: &Value, lang: Lang) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let pick = |key: &str| {
                map.get(key)
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
            };
            pick(lang.code())
                .or_else(|| pick("fr"))
                .unwrap_or_default()
                .to_string()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_text_resolves_to_empty() {
        assert_eq!(resolve(None, Lang::Fr), "");
        assert_eq!(resolve(None, Lang::En), "");
    }

    #[test]
    fn test_plain_string_passes_through() {
        let text = Text::Plain("Nos Films".to_string());
        assert_eq!(resolve(Some(&text), Lang::En), "Nos Films");
        assert_eq!(resolve(Some(&text), Lang::Fr), "Nos Films");
    }

    #[test]
    fn test_bilingual_picks_requested_language() {
        let text = Text::Bilingual(TranslatableText::new("Bonjour", "Hello"));
        assert_eq!(resolve(Some(&text), Lang::Fr), "Bonjour");
        assert_eq!(resolve(Some(&text), Lang::En), "Hello");
    }

    #[test]
    fn test_empty_translation_falls_back_to_french() {
        let text = Text::Bilingual(TranslatableText::new("Bonjour", ""));
        assert_eq!(resolve(Some(&text), Lang::En), "Bonjour");
    }

    #[test]
    fn test_both_translations_absent_resolves_to_empty() {
        let text = Text::Bilingual(TranslatableText::default());
        assert_eq!(resolve(Some(&text), Lang::En), "");
        assert_eq!(resolve(Some(&text), Lang::Fr), "");
    }

    #[test]
    fn test_deserialize_plain_and_bilingual() {
        let plain: Text = serde_json::from_value(json!("CARACTÈRE")).unwrap();
        assert_eq!(plain, Text::Plain("CARACTÈRE".to_string()));

        let bilingual: Text =
            serde_json::from_value(json!({"fr": "À propos", "en": "About"})).unwrap();
        assert_eq!(
            bilingual,
            Text::Bilingual(TranslatableText::new("À propos", "About"))
        );
    }

    #[test]
    fn test_partial_record_still_deserializes() {
        let partial: Text = serde_json::from_value(json!({"fr": "Accueil"})).unwrap();
        assert_eq!(resolve(Some(&partial), Lang::En), "Accueil");
    }

    #[test]
    fn test_resolve_value_variants() {
        assert_eq!(resolve_value(&json!("plain"), Lang::En), "plain");
        assert_eq!(
            resolve_value(&json!({"fr": "Oui", "en": "Yes"}), Lang::En),
            "Yes"
        );
        assert_eq!(
            resolve_value(&json!({"fr": "Oui", "en": ""}), Lang::En),
            "Oui"
        );
        assert_eq!(resolve_value(&json!(42), Lang::Fr), "");
    }

    #[test]
    fn test_lang_codes() {
        assert_eq!(Lang::from_code("en"), Lang::En);
        assert_eq!(Lang::from_code("fr"), Lang::Fr);
        assert_eq!(Lang::from_code("de"), Lang::Fr);
        assert_eq!(Lang::Fr.code(), "fr");
    }
}
