//! Authenticated viewer extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use docternal_persistence::core::ContentStore;
use tracing::debug;

use crate::auth::{Identity, identify};
use crate::error::RestError;
use crate::state::AppState;

/// Axum extractor for the authenticated viewer.
///
/// Rejects the request with `401 Unauthorized` and a Basic challenge when
/// neither valid local credentials nor a trusted identity header is present.
///
/// # Example
///
/// ```rust,ignore
/// use docternal_rest::extractors::Viewer;
///
/// async fn handler(viewer: Viewer) {
///     println!("Viewer: {}", viewer.email());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Viewer(pub Identity);

impl Viewer {
    /// The viewer's email, or local username.
    pub fn email(&self) -> &str {
        &self.0.email
    }

    /// Returns a reference to the identity.
    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

impl std::fmt::Display for Viewer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.email())
    }
}

impl<S> FromRequestParts<AppState<S>> for Viewer
where
    S: ContentStore + 'static,
{
    type Rejection = RestError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<S>,
    ) -> Result<Self, Self::Rejection> {
        match identify(&parts.headers, state.local_users(), state.trusted_header()) {
            Some(identity) => Ok(Viewer(identity)),
            None => {
                debug!(path = %parts.uri.path(), "No viewer identity on request");
                Err(RestError::Unauthenticated)
            }
        }
    }
}
