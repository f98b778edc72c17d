//! Handlers for the public (unauthenticated) site view.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use vitrine_core::i18n::Lang;
use vitrine_core::render::PublicSite;
use vitrine_core::settings::default_settings;
use vitrine_db::repositories::SiteRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the public site view.
#[derive(Debug, Deserialize)]
pub struct PublicSiteParams {
    /// Two-letter language code; anything unknown falls back to French.
    pub lang: Option<String>,
}

/// GET /api/v1/public/site?lang=
///
/// The fully-resolved public view of the site: settings merged over the
/// defaults, every bilingual record collapsed to the requested language,
/// plus the localized works catalogue.
pub async fn get_public_site(
    State(state): State<AppState>,
    Query(params): Query<PublicSiteParams>,
) -> AppResult<Json<DataResponse<PublicSite>>> {
    let lang = params
        .lang
        .as_deref()
        .map(Lang::from_code)
        .unwrap_or_default();

    // Before the owner ever logged in, render the defaults.
    let (settings, works) = match SiteRepo::find_default(&state.pool).await? {
        Some(site) => {
            let works = state.works.list_by_site(site.id).await?;
            (site.settings, works)
        }
        None => (default_settings(), Vec::new()),
    };

    Ok(Json(DataResponse {
        data: PublicSite::build(&settings, &works, lang),
    }))
}
