//! Handlers for the `/works` resource (film catalogue CRUD).
//!
//! All routes require authentication and are scoped to the caller's
//! site; a work belonging to someone else's site answers 404, never 403,
//! so ids do not leak.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use vitrine_core::error::CoreError;
use vitrine_core::settings::default_work_settings;
use vitrine_core::types::DbId;
use vitrine_core::works::Work;

use crate::error::{AppError, AppResult};
use crate::handlers::sites::find_or_create_site;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for creating or updating a work.
#[derive(Debug, Deserialize)]
pub struct WorkRequest {
    pub settings: Option<Value>,
}

/// Query parameters for the works listing.
#[derive(Debug, Deserialize)]
pub struct ListWorksParams {
    /// Optional explicit site; must be the caller's own site.
    pub site_id: Option<DbId>,
}

/// Fetch a work and verify it belongs to the caller's site.
async fn owned_work(state: &AppState, site_id: DbId, work_id: DbId) -> AppResult<Work> {
    let work = state.works.get(work_id).await?;
    if work.site_id != site_id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Work",
            id: work_id,
        }));
    }
    Ok(work)
}

/// GET /api/v1/works
///
/// All of the caller's works, newest first.
pub async fn list_works(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<ListWorksParams>,
) -> AppResult<Json<DataResponse<Vec<Work>>>> {
    let site = find_or_create_site(&state, auth_user.user_id).await?;
    if let Some(site_id) = params.site_id {
        if site_id != site.id {
            return Err(AppError::Core(CoreError::Forbidden(
                "Not the owner of this site".into(),
            )));
        }
    }
    let works = state.works.list_by_site(site.id).await?;
    Ok(Json(DataResponse { data: works }))
}

/// POST /api/v1/works
///
/// Create a work. Omitting `settings` creates a fresh entry from the
/// default work template (placeholder title, generated slug).
pub async fn create_work(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<WorkRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Work>>)> {
    let site = find_or_create_site(&state, auth_user.user_id).await?;
    let settings = input.settings.unwrap_or_else(default_work_settings);
    let work = state.works.create(site.id, settings).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: work })))
}

/// GET /api/v1/works/{id}
pub async fn get_work(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(work_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Work>>> {
    let site = find_or_create_site(&state, auth_user.user_id).await?;
    let work = owned_work(&state, site.id, work_id).await?;
    Ok(Json(DataResponse { data: work }))
}

/// PUT /api/v1/works/{id}
///
/// Replace the work's full settings record.
pub async fn update_work(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(work_id): Path<DbId>,
    Json(input): Json<WorkRequest>,
) -> AppResult<Json<DataResponse<Work>>> {
    let settings = input
        .settings
        .ok_or_else(|| AppError::BadRequest("Missing settings".into()))?;

    let site = find_or_create_site(&state, auth_user.user_id).await?;
    owned_work(&state, site.id, work_id).await?;

    let work = state.works.update(work_id, settings).await?;
    Ok(Json(DataResponse { data: work }))
}

/// DELETE /api/v1/works/{id}
///
/// Returns 204 No Content.
pub async fn delete_work(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(work_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let site = find_or_create_site(&state, auth_user.user_id).await?;
    owned_work(&state, site.id, work_id).await?;

    state.works.delete(work_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
