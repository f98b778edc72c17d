//! Route definitions for the `/works` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::works;
use crate::state::AppState;

/// Routes mounted at `/works`.
///
/// ```text
/// GET    /        -> list (newest first)
/// POST   /        -> create
/// GET    /{id}    -> get
/// PUT    /{id}    -> replace settings
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(works::list_works))
        .route("/", post(works::create_work))
        .route("/{id}", get(works::get_work))
        .route("/{id}", put(works::update_work))
        .route("/{id}", delete(works::delete_work))
}
