//! Root-level admin page routes, wrapped in the redirect guard.

use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::middleware::guard::admin_guard;
use crate::state::AppState;

/// Admin page routes (root-level, NOT under `/api/v1`).
///
/// ```text
/// GET /admin            login page (redirects to dashboard when signed in)
/// GET /admin/dashboard  dashboard (redirects to /admin when signed out)
/// GET /admin/editor     editor (redirects to /admin when signed out)
/// ```
pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin::login_page))
        .route("/admin/dashboard", get(admin::dashboard_page))
        .route("/admin/editor", get(admin::editor_page))
        .layer(from_fn_with_state(state, admin_guard))
}
