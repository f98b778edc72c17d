//! Handlers for the admin pages and maintenance operations.
//!
//! The admin pages themselves are rendered by the frontend; the handlers
//! here exist so the redirect rules in
//! [`crate::middleware::guard::admin_guard`] have concrete routes to
//! protect, and answer with a small JSON document identifying the page.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::json;
use vitrine_db::repositories::SiteRepo;
use vitrine_storage::migrate::rehost_images;

use crate::error::{AppError, AppResult};
use crate::handlers::sites::find_or_create_site;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /admin -- the login page shell.
pub async fn login_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "login" }))
}

/// GET /admin/dashboard -- the dashboard shell (guarded).
pub async fn dashboard_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "dashboard" }))
}

/// GET /admin/editor -- the editor shell (guarded).
pub async fn editor_page() -> Json<serde_json::Value> {
    Json(json!({ "page": "editor" }))
}

/// Outcome of an image migration run.
#[derive(Debug, Serialize)]
pub struct MigrateImagesResult {
    pub migrated: usize,
    pub failed: Vec<String>,
}

/// POST /api/v1/admin/migrate-images
///
/// Re-host every externally-hosted image referenced by the caller's
/// settings tree onto our own storage, then persist the rewritten tree.
/// Per-image failures are reported, not fatal.
pub async fn migrate_images(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<MigrateImagesResult>>> {
    let site = find_or_create_site(&state, auth_user.user_id).await?;

    let client = reqwest::Client::new();
    let report = rehost_images(state.storage.as_ref(), &client, &site.settings).await;

    if report.migrated > 0 {
        SiteRepo::update_settings(&state.pool, site.id, &report.settings)
            .await?
            .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;
    }

    tracing::info!(
        site_id = %site.id,
        migrated = report.migrated,
        failed = report.failed.len(),
        "Image migration finished"
    );

    Ok(Json(DataResponse {
        data: MigrateImagesResult {
            migrated: report.migrated,
            failed: report.failed,
        },
    }))
}
