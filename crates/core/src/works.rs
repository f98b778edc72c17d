//! The works (film catalogue) domain.
//!
//! Works have a lifecycle independent of the parent site settings: each
//! carries its own nested settings record, replaced wholesale on every
//! update. Persistence sits behind [`WorkStore`]; the Postgres
//! implementation lives in `vitrine-db`.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::settings::validate_settings_json;
use crate::types::{DbId, Timestamp};

/// One catalogue entry (film/project) belonging to a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub id: DbId,
    pub site_id: DbId,
    /// Nested record: title, year, poster URL, synopsis, genre, director,
    /// crew list... Several leaves are `{fr, en}` records.
    pub settings: Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Persistence seam for works.
#[async_trait]
pub trait WorkStore: Send + Sync {
    async fn insert(&self, site_id: DbId, settings: &Value) -> Result<Work, CoreError>;

    /// Replace the whole settings record. Returns `None` for unknown ids.
    async fn update_settings(
        &self,
        work_id: DbId,
        settings: &Value,
    ) -> Result<Option<Work>, CoreError>;

    /// Returns `false` when nothing was deleted.
    async fn delete(&self, work_id: DbId) -> Result<bool, CoreError>;

    async fn find_by_id(&self, work_id: DbId) -> Result<Option<Work>, CoreError>;

    /// All works for a site, newest first.
    async fn list_by_site(&self, site_id: DbId) -> Result<Vec<Work>, CoreError>;
}

/// CRUD operations over a [`WorkStore`], with the shared input validation.
///
/// No cross-work invariants are enforced; duplicate titles and slugs are
/// permitted by design.
#[derive(Clone)]
pub struct WorksService {
    store: Arc<dyn WorkStore>,
}

impl WorksService {
    pub fn new(store: Arc<dyn WorkStore>) -> Self {
        Self { store }
    }

    /// Create a work scoped to `site_id` with the given initial settings.
    pub async fn create(&self, site_id: DbId, settings: Value) -> Result<Work, CoreError> {
        validate_settings_json(&settings)?;
        self.store.insert(site_id, &settings).await
    }

    /// Replace the entire settings record for a work.
    ///
    /// This is a full overwrite, not a field-level patch: callers must
    /// merge any fields they do not intend to change before calling.
    pub async fn update(&self, work_id: DbId, settings: Value) -> Result<Work, CoreError> {
        validate_settings_json(&settings)?;
        self.store
            .update_settings(work_id, &settings)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Work",
                id: work_id,
            })
    }

    /// Delete a work by id. Any confirmation UX is the caller's business.
    pub async fn delete(&self, work_id: DbId) -> Result<(), CoreError> {
        if self.store.delete(work_id).await? {
            Ok(())
        } else {
            Err(CoreError::NotFound {
                entity: "Work",
                id: work_id,
            })
        }
    }

    pub async fn get(&self, work_id: DbId) -> Result<Work, CoreError> {
        self.store
            .find_by_id(work_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Work",
                id: work_id,
            })
    }

    /// All works for a site, newest first.
    pub async fn list_by_site(&self, site_id: DbId) -> Result<Vec<Work>, CoreError> {
        self.store.list_by_site(site_id).await
    }
}
