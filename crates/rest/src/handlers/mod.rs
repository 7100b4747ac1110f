//! HTTP request handlers.
//!
//! - [`listing`] - Site index, language and version listings
//! - [`api`] - Listings addressed by project name
//! - [`content`] - Documentation file delivery
//! - [`health`] - Liveness and readiness probes

pub mod api;
pub mod content;
pub mod health;
pub mod listing;

pub use api::{api_languages_handler, api_versions_handler};
pub use content::content_handler;
pub use health::{liveness_handler, readiness_handler};
pub use listing::{language_handler, root_handler};

use docternal_persistence::core::ContentStore;
use tracing::{debug, info};

use crate::auth::Identity;
use crate::error::{RestError, RestResult};
use crate::site::{Site, decision};
use crate::state::AppState;

/// Fails with `403 Forbidden` unless `identity` may view `site`.
pub(crate) fn authorize<S: ContentStore>(
    state: &AppState<S>,
    site: &Site,
    identity: &Identity,
) -> RestResult<()> {
    match decision(&identity.email, site, state.domain_match()) {
        Some(grant) => {
            debug!(
                viewer = %identity.email,
                project = %site.project,
                grant = %grant,
                "Access granted"
            );
            Ok(())
        }
        None => {
            info!(
                viewer = %identity.email,
                project = %site.project,
                domain = %site.domain,
                "Access denied"
            );
            Err(RestError::Forbidden {
                message: format!("You are not allowed to view {}", site.project),
            })
        }
    }
}
