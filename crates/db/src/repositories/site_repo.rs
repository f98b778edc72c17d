//! Repository for the `sites` table.
//!
//! One site per owner: the table carries a unique constraint on
//! `owner_id` and every lookup the API needs goes through it.

use serde_json::Value;
use sqlx::PgPool;
use vitrine_core::types::DbId;

use crate::models::site::{CreateSite, Site};

const COLUMNS: &str = "id, owner_id, settings, created_at, updated_at";

/// Provides CRUD operations for sites.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (owner_id, settings)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(input.owner_id)
            .bind(&input.settings)
            .fetch_one(pool)
            .await
    }

    /// Find a site by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE id = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the site owned by a user.
    pub async fn find_by_owner(pool: &PgPool, owner_id: DbId) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE owner_id = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// The first site by creation date; the public renderer's default
    /// when no explicit site is addressed.
    pub async fn find_default(pool: &PgPool) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites ORDER BY created_at ASC LIMIT 1");
        sqlx::query_as::<_, Site>(&query).fetch_optional(pool).await
    }

    /// Replace the full settings tree. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn update_settings(
        pool: &PgPool,
        id: DbId,
        settings: &Value,
    ) -> Result<Option<Site>, sqlx::Error> {
        let query = format!(
            "UPDATE sites SET settings = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .bind(settings)
            .fetch_optional(pool)
            .await
    }
}
