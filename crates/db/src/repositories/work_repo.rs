//! Repository for the `works` table.

use serde_json::Value;
use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::work::WorkRow;

const COLUMNS: &str = "id, site_id, settings, created_at, updated_at";

/// Provides CRUD operations for works.
pub struct WorkRepo;

impl WorkRepo {
    /// Insert a new work, returning the created row.
    pub async fn create(
        pool: &PgPool,
        site_id: DbId,
        settings: &Value,
    ) -> Result<WorkRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO works (site_id, settings)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkRow>(&query)
            .bind(site_id)
            .bind(settings)
            .fetch_one(pool)
            .await
    }

    /// Find a work by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<WorkRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE id = $1");
        sqlx::query_as::<_, WorkRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all works for a site, most recently created first.
    pub async fn list_by_site(pool: &PgPool, site_id: DbId) -> Result<Vec<WorkRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM works
             WHERE site_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, WorkRow>(&query)
            .bind(site_id)
            .fetch_all(pool)
            .await
    }

    /// Replace the full settings record. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update_settings(
        pool: &PgPool,
        id: DbId,
        settings: &Value,
    ) -> Result<Option<WorkRow>, sqlx::Error> {
        let query = format!(
            "UPDATE works SET settings = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorkRow>(&query)
            .bind(id)
            .bind(settings)
            .fetch_optional(pool)
            .await
    }

    /// Delete a work. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
