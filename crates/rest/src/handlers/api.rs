//! Listings addressed by project name instead of by host.
//!
//! Used by front ends served from a different hostname than the docs. The
//! viewer must be allowed on at least one site that serves the project.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use docternal_persistence::core::ContentStore;
use tracing::{debug, info};

use super::listing::{LanguageListing, VersionListing};
use crate::error::{RestError, RestResult};
use crate::extractors::Viewer;
use crate::site::{TenantConfig, can_access_with, listing_prefix, load_tenant_config};
use crate::state::AppState;

/// Handler for the languages of a project.
///
/// # HTTP Request
///
/// `GET [base]/api/{project}/languages`
///
/// # Response
///
/// - `200 OK` - `{"project", "languages"}`
/// - `403 Forbidden` - The viewer may not view any site of the project
/// - `404 Not Found` - No site serves the project
pub async fn api_languages_handler<S>(
    State(state): State<AppState<S>>,
    Path(project): Path<String>,
    viewer: Viewer,
) -> RestResult<Response>
where
    S: ContentStore + 'static,
{
    debug!(project = %project, viewer = %viewer, "Processing API language listing");

    let config = load_tenant_config(state.store(), state.root()).await?;
    authorize_project(&state, &config, &project, &viewer)?;

    let prefix = listing_prefix(state.root(), &project, &[]);
    let languages = state.store().list_subdirs(&prefix).await?;

    Ok(Json(LanguageListing { project, languages }).into_response())
}

/// Handler for the versions of one language of a project.
///
/// # HTTP Request
///
/// `GET [base]/api/{project}/{lang}/versions`
pub async fn api_versions_handler<S>(
    State(state): State<AppState<S>>,
    Path((project, lang)): Path<(String, String)>,
    viewer: Viewer,
) -> RestResult<Response>
where
    S: ContentStore + 'static,
{
    debug!(project = %project, lang = %lang, viewer = %viewer, "Processing API version listing");

    let config = load_tenant_config(state.store(), state.root()).await?;
    authorize_project(&state, &config, &project, &viewer)?;

    let prefix = listing_prefix(state.root(), &project, &[lang.as_str()]);
    let versions = state.store().list_subdirs(&prefix).await?;

    Ok(Json(VersionListing {
        project,
        language: lang,
        versions,
    })
    .into_response())
}

fn authorize_project<S: ContentStore>(
    state: &AppState<S>,
    config: &TenantConfig,
    project: &str,
    viewer: &Viewer,
) -> RestResult<()> {
    let mut sites = config.sites_for_project(project).peekable();
    if sites.peek().is_none() {
        return Err(RestError::NotFound {
            resource: format!("project '{project}'"),
        });
    }

    let mode = state.domain_match();
    if sites.any(|site| can_access_with(viewer.email(), site, mode)) {
        Ok(())
    } else {
        info!(viewer = %viewer, project = %project, "Access denied");
        Err(RestError::Forbidden {
            message: format!("You are not allowed to view {project}"),
        })
    }
}
