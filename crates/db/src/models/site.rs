//! Site entity model and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// Full site row from the `sites` table.
///
/// `settings` is the opaque nested JSON tree the editor works on; the
/// database never interprets its contents beyond requiring an object.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub owner_id: DbId,
    pub settings: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new site.
#[derive(Debug, Deserialize)]
pub struct CreateSite {
    pub owner_id: DbId,
    pub settings: Value,
}
