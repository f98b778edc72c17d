//! Route definitions for admin maintenance operations (under `/api/v1`).

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new().route("/migrate-images", post(admin::migrate_images))
}
