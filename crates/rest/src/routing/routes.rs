//! Route configuration.

use axum::{Router, routing::get};
use docternal_persistence::core::ContentStore;

use crate::handlers;
use crate::state::AppState;

/// Creates all routes.
///
/// # Routes
///
/// ## Probes
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Host-addressed
/// - `GET /` - Languages of the host's site, or the site index
/// - `GET /{lang}` and `GET /{lang}/` - Versions of one language
/// - `GET /{lang}/{*rest}` - Documentation files
///
/// ## Project-addressed
/// - `GET /api/{project}/languages` - Languages of a project
/// - `GET /api/{project}/{lang}/versions` - Versions of one language of a project
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ContentStore + 'static,
{
    Router::new()
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route(
            "/api/{project}/languages",
            get(handlers::api_languages_handler::<S>),
        )
        .route(
            "/api/{project}/{lang}/versions",
            get(handlers::api_versions_handler::<S>),
        )
        .route("/", get(handlers::root_handler::<S>))
        .route("/{lang}", get(handlers::language_handler::<S>))
        .route("/{lang}/", get(handlers::language_handler::<S>))
        .route("/{lang}/{*rest}", get(handlers::content_handler::<S>))
        .with_state(state)
}
