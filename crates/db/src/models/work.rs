//! Work (catalogue entry) row model.
//!
//! The domain-level type lives in `vitrine_core::works::Work`; this is
//! the `FromRow` mirror for sqlx plus the conversion between the two.

use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};
use vitrine_core::works::Work;

/// Full work row from the `works` table.
#[derive(Debug, Clone, FromRow)]
pub struct WorkRow {
    pub id: DbId,
    pub site_id: DbId,
    pub settings: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WorkRow> for Work {
    fn from(row: WorkRow) -> Self {
        Work {
            id: row.id,
            site_id: row.site_id,
            settings: row.settings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
