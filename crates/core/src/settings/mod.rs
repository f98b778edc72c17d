//! The site settings tree.
//!
//! Settings are an arbitrary nested JSON record (hero, about, theme,
//! contact, news, ...). All mutation goes through the copy-on-write
//! path writer in [`path`]; the undo history depends on prior snapshots
//! never being aliased.

pub mod defaults;
pub mod path;

pub use defaults::{default_settings, default_work_settings, merge_defaults};
pub use path::{read_at_path, write_at_path, PathSeg};

use crate::error::CoreError;

/// Validate that a settings blob is a JSON object (not null, array, string, etc.).
///
/// Both site settings and per-work settings are persisted as opaque nested
/// objects; anything else is a caller bug.
pub fn validate_settings_json(settings: &serde_json::Value) -> Result<(), CoreError> {
    if settings.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "settings must be a JSON object".to_string(),
        ))
    }
}
