//! Application state shared by all handlers.

use std::sync::Arc;

use axum::http::HeaderName;
use docternal_persistence::core::ContentStore;
use tracing::warn;

use crate::auth::LocalUsers;
use crate::config::ServerConfig;
use crate::site::DomainMatch;

/// Shared application state.
///
/// Holds the content store and the configuration. It carries no tenant
/// data: the tenant configuration is loaded from the store per request.
///
/// # Type Parameters
///
/// * `S` - The content store (must implement [`ContentStore`])
pub struct AppState<S> {
    store: Arc<S>,
    config: Arc<ServerConfig>,
    trusted_header: Option<HeaderName>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            trusted_header: self.trusted_header.clone(),
        }
    }
}

impl<S: ContentStore> AppState<S> {
    /// Creates a new AppState with the given store and configuration.
    pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
        let trusted_header = config.trusted_email_header.as_deref().and_then(|name| {
            match HeaderName::from_bytes(name.as_bytes()) {
                Ok(header) => Some(header),
                Err(_) => {
                    warn!(header = %name, "Ignoring invalid trusted email header name");
                    None
                }
            }
        });

        Self {
            store,
            config: Arc::new(config),
            trusted_header,
        }
    }

    /// Returns a reference to the content store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Root path inside the store.
    pub fn root(&self) -> &str {
        &self.config.root_docs_path
    }

    /// Configured local accounts.
    pub fn local_users(&self) -> &LocalUsers {
        &self.config.local_users
    }

    /// Header carrying a proxy-verified email, if enabled.
    pub fn trusted_header(&self) -> Option<&HeaderName> {
        self.trusted_header.as_ref()
    }

    /// Domain rule matching mode.
    pub fn domain_match(&self) -> DomainMatch {
        self.config.domain_match()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docternal_persistence::backends::memory::InMemoryContentStore;

    #[test]
    fn test_state_creation() {
        let config = ServerConfig {
            root_docs_path: "docs".to_string(),
            trusted_email_header: Some("X-Forwarded-Email".to_string()),
            ..ServerConfig::for_testing()
        };
        let state = AppState::new(Arc::new(InMemoryContentStore::new()), config);

        assert_eq!(state.root(), "docs");
        assert_eq!(state.store().backend_name(), "memory");
        assert_eq!(
            state.trusted_header().map(HeaderName::as_str),
            Some("x-forwarded-email")
        );
        assert_eq!(state.domain_match(), DomainMatch::Suffix);
    }

    #[test]
    fn test_invalid_trusted_header_is_dropped() {
        let config = ServerConfig {
            trusted_email_header: Some("bad header".to_string()),
            ..ServerConfig::for_testing()
        };
        let state = AppState::new(Arc::new(InMemoryContentStore::new()), config);
        assert!(state.trusted_header().is_none());
    }

    #[test]
    fn test_state_clone_shares_store() {
        let store = Arc::new(InMemoryContentStore::new());
        let state = AppState::new(Arc::clone(&store), ServerConfig::for_testing());
        let cloned = state.clone();
        store.put("docternal.yaml", "version: 1");
        assert_eq!(cloned.store().len(), 1);
    }
}
