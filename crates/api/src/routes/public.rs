//! Route definitions for the public site view.

use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Routes mounted at `/public`.
pub fn router() -> Router<AppState> {
    Router::new().route("/site", get(public::get_public_site))
}
