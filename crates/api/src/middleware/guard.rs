//! Route protection for the admin pages.
//!
//! Two redirect rules, evaluated before the page handlers run:
//!
//! - an unauthenticated request to a protected admin page
//!   (`/admin/dashboard`, `/admin/editor`, and anything below them)
//!   redirects to the login page at `/admin`;
//! - an authenticated request to `/admin` itself redirects straight to
//!   `/admin/dashboard`.
//!
//! Everything outside `/admin` passes through untouched, so public pages
//! never pay for a token check.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

const LOGIN_PAGE: &str = "/admin";
const DASHBOARD_PAGE: &str = "/admin/dashboard";

/// Paths under `/admin` that require an authenticated session.
fn is_protected(path: &str) -> bool {
    for prefix in ["/admin/dashboard", "/admin/editor"] {
        if path == prefix || path.starts_with(&format!("{prefix}/")) {
            return true;
        }
    }
    false
}

/// Axum middleware implementing the admin redirect rules.
pub async fn admin_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if path == LOGIN_PAGE || is_protected(&path) {
        let authenticated = authenticate(request.headers(), &state.config).is_some();

        if !authenticated && is_protected(&path) {
            return Redirect::temporary(LOGIN_PAGE).into_response();
        }
        if authenticated && path == LOGIN_PAGE {
            return Redirect::temporary(DASHBOARD_PAGE).into_response();
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_paths() {
        assert!(is_protected("/admin/dashboard"));
        assert!(is_protected("/admin/editor"));
        assert!(is_protected("/admin/editor/settings"));
        assert!(!is_protected("/admin"));
        assert!(!is_protected("/admin-panel"));
        assert!(!is_protected("/"));
    }
}
