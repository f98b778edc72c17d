//! Handlers for the `/sites` resource.
//!
//! Each user owns exactly one site. The first authenticated fetch
//! bootstraps the row from the default settings tree, so a fresh account
//! always has something to edit.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use vitrine_core::settings::{default_settings, merge_defaults, validate_settings_json};
use vitrine_core::types::DbId;
use vitrine_db::models::site::{CreateSite, Site};
use vitrine_db::repositories::SiteRepo;

use vitrine_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /sites/update`.
#[derive(Debug, Deserialize)]
pub struct UpdateSiteRequest {
    /// Optional explicit target; must be the caller's own site.
    pub site_id: Option<DbId>,
    pub settings: Option<Value>,
}

/// Fetch the caller's site, creating it on first access.
pub async fn find_or_create_site(state: &AppState, owner_id: DbId) -> AppResult<Site> {
    if let Some(site) = SiteRepo::find_by_owner(&state.pool, owner_id).await? {
        return Ok(site);
    }

    tracing::info!(%owner_id, "Bootstrapping site with default settings");
    let site = SiteRepo::create(
        &state.pool,
        &CreateSite {
            owner_id,
            settings: default_settings(),
        },
    )
    .await?;
    Ok(site)
}

/// GET /api/v1/sites/me
///
/// The caller's site, with its stored settings merged over the current
/// defaults so newly-introduced sections are always present.
pub async fn get_my_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<DataResponse<Site>>> {
    let mut site = find_or_create_site(&state, auth_user.user_id).await?;
    site.settings = merge_defaults(&site.settings);
    Ok(Json(DataResponse { data: site }))
}

/// POST /api/v1/sites/update
///
/// Replace the caller's full settings tree. This is the autosave target:
/// the editor debounces edits client-side and posts the whole tree.
///
/// Responds 400 when the body carries no valid settings object and 401
/// when the caller is not authenticated (via the extractor).
pub async fn update_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateSiteRequest>,
) -> AppResult<Json<DataResponse<Site>>> {
    let settings = input
        .settings
        .ok_or_else(|| AppError::BadRequest("Missing settings".into()))?;
    validate_settings_json(&settings)?;

    let site = find_or_create_site(&state, auth_user.user_id).await?;
    if let Some(site_id) = input.site_id {
        if site_id != site.id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Not the owner of this site".into(),
            )));
        }
    }

    // Same sink the editor's autosave writes through.
    state.settings_sink.persist(site.id, &settings).await?;

    let updated = SiteRepo::find_by_id(&state.pool, site.id)
        .await?
        .ok_or(AppError::Database(sqlx::Error::RowNotFound))?;

    tracing::debug!(site_id = %updated.id, "Site settings updated");
    Ok(Json(DataResponse { data: updated }))
}
