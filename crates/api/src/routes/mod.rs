pub mod admin;
pub mod auth;
pub mod health;
pub mod pages;
pub mod public;
pub mod sites;
pub mod uploads;
pub mod works;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
/// /auth/logout                logout (requires auth)
/// /auth/me                    current user (requires auth)
///
/// /sites/me                   caller's site (requires auth)
/// /sites/update               replace settings tree (requires auth)
///
/// /works                      list, create (requires auth)
/// /works/{id}                 get, update, delete (requires auth)
///
/// /uploads/images             image upload (requires auth)
///
/// /public/site                localized public site view (public)
///
/// /admin/migrate-images       re-host external images (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/sites", sites::router())
        .nest("/works", works::router())
        .nest("/uploads", uploads::router())
        .nest("/public", public::router())
        .nest("/admin", admin::router())
}
