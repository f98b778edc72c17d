//! Route definitions for the `/sites` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sites;
use crate::state::AppState;

/// Routes mounted at `/sites`.
///
/// ```text
/// GET  /me      -> caller's site (bootstraps on first access)
/// POST /update  -> replace the full settings tree
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(sites::get_my_site))
        .route("/update", post(sites::update_site))
}
