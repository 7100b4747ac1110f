//! Directory listings for the site a request is addressed to.
//!
//! `GET /` lists the languages of the site matching the request host, or,
//! when no site matches, the sites the viewer may open. `GET /{lang}` lists
//! the versions published for one language.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use docternal_persistence::core::ContentStore;
use serde::Serialize;
use tracing::debug;

use super::authorize;
use crate::error::{RestError, RestResult};
use crate::extractors::{RequestHost, Viewer};
use crate::site::{Site, can_access_with, listing_prefix, load_tenant_config};
use crate::state::AppState;

/// Languages published for a project.
#[derive(Debug, Serialize)]
pub struct LanguageListing {
    pub project: String,
    pub languages: Vec<String>,
}

/// Versions published for one language of a project.
#[derive(Debug, Serialize)]
pub struct VersionListing {
    pub project: String,
    pub language: String,
    pub versions: Vec<String>,
}

/// Sites shown on the index page of an unknown host.
#[derive(Debug, Serialize)]
pub struct SiteIndex {
    pub sites: Vec<SiteLink>,
}

/// One entry of the [`SiteIndex`].
#[derive(Debug, Serialize)]
pub struct SiteLink {
    pub title: String,
    pub href: String,
}

impl SiteLink {
    fn new(site: &Site, scheme: &str) -> Self {
        let path = site.path.trim_matches('/');
        Self {
            title: site.project.clone(),
            href: format!("{scheme}://{}/{path}", site.domain),
        }
    }
}

/// Handler for the root of a host.
///
/// # HTTP Request
///
/// `GET [base]/`
///
/// # Response
///
/// - `200 OK` - `{"project", "languages"}` for a configured host, otherwise
///   `{"sites": [{"title", "href"}]}` with the sites the viewer may open
/// - `401 Unauthorized` - No viewer identity
/// - `403 Forbidden` - The viewer may not view the host's site
/// - `500 Internal Server Error` - Missing or malformed `docternal.yaml`
pub async fn root_handler<S>(
    State(state): State<AppState<S>>,
    host: RequestHost,
    viewer: Viewer,
) -> RestResult<Response>
where
    S: ContentStore + 'static,
{
    debug!(host = %host.hostname, viewer = %viewer, "Processing root listing request");

    let config = load_tenant_config(state.store(), state.root()).await?;

    let Some(site) = config.select_site(&host.hostname, "/") else {
        let mode = state.domain_match();
        let sites = config
            .sites()
            .iter()
            .filter(|site| can_access_with(viewer.email(), site, mode))
            .map(|site| SiteLink::new(site, &host.scheme))
            .collect();
        return Ok(Json(SiteIndex { sites }).into_response());
    };

    authorize(&state, site, viewer.identity())?;

    let prefix = listing_prefix(state.root(), &site.project, &[]);
    let languages = state.store().list_subdirs(&prefix).await?;

    Ok(Json(LanguageListing {
        project: site.project.clone(),
        languages,
    })
    .into_response())
}

/// Handler for the versions of one language.
///
/// # HTTP Request
///
/// `GET [base]/{lang}`
///
/// # Response
///
/// - `200 OK` - `{"project", "language", "versions"}`
/// - `401 Unauthorized` - No viewer identity
/// - `403 Forbidden` - The viewer may not view the host's site
/// - `404 Not Found` - No site is configured for the host
pub async fn language_handler<S>(
    State(state): State<AppState<S>>,
    Path(lang): Path<String>,
    host: RequestHost,
    viewer: Viewer,
) -> RestResult<Response>
where
    S: ContentStore + 'static,
{
    debug!(host = %host.hostname, lang = %lang, viewer = %viewer, "Processing version listing request");

    let config = load_tenant_config(state.store(), state.root()).await?;
    let site = config
        .select_site(&host.hostname, &format!("/{lang}"))
        .ok_or_else(|| RestError::SiteNotFound {
            hostname: host.hostname.clone(),
        })?;

    authorize(&state, site, viewer.identity())?;

    let prefix = listing_prefix(state.root(), &site.project, &[lang.as_str()]);
    let versions = state.store().list_subdirs(&prefix).await?;

    Ok(Json(VersionListing {
        project: site.project.clone(),
        language: lang,
        versions,
    })
    .into_response())
}
