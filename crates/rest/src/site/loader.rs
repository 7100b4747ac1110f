//! Fetches and parses the tenant configuration from the content store.
//!
//! The document is read on every call. Nothing is cached, so a new
//! `docternal.yaml` takes effect on the next request.

use docternal_persistence::StoreError;
use docternal_persistence::core::ContentStore;
use thiserror::Error;
use tracing::debug;

use super::config::{ConfigError, TenantConfig};
use super::locator::config_key;

/// Why the configuration could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    /// There is no configuration document under the root.
    #[error("No docternal.yaml file found")]
    Missing,

    /// The document exists but is malformed.
    #[error(transparent)]
    Invalid(#[from] ConfigError),

    /// The store failed while reading the document.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ConfigLoadError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ConfigLoadError::Missing,
            other => ConfigLoadError::Store(other),
        }
    }
}

/// Loads `<root>/docternal.yaml` from `store` and parses it.
pub async fn load_tenant_config<S>(store: &S, root: &str) -> Result<TenantConfig, ConfigLoadError>
where
    S: ContentStore + ?Sized,
{
    let key = config_key(root);
    debug!(key = %key, backend = store.backend_name(), "Loading tenant configuration");

    let document = store.open_file(&key).await?.into_string().await?;
    let config = TenantConfig::parse(&document)?;

    debug!(sites = config.sites().len(), "Parsed tenant configuration");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docternal_persistence::backends::memory::InMemoryContentStore;

    #[tokio::test]
    async fn test_load_from_root() {
        let store = InMemoryContentStore::new().with_file(
            "tenants/acme/docternal.yaml",
            "version: 1\nsites:\n  - project: cool-sdk\n    domain: docs.acme.com\n",
        );
        let config = load_tenant_config(&store, "tenants/acme").await.unwrap();
        assert_eq!(config.sites()[0].project, "cool-sdk");
    }

    #[tokio::test]
    async fn test_missing_document() {
        let store = InMemoryContentStore::new();
        let err = load_tenant_config(&store, "").await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::Missing));
        assert_eq!(err.to_string(), "No docternal.yaml file found");
    }

    #[tokio::test]
    async fn test_malformed_document() {
        let store = InMemoryContentStore::new().with_file("docternal.yaml", "version: 3\nsites: []\n");
        let err = load_tenant_config(&store, "").await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(ConfigError::WrongVersion)));
        assert_eq!(err.to_string(), "wrong version");
    }

    #[tokio::test]
    async fn test_store_failure() {
        let store = InMemoryContentStore::new().with_file("docternal.yaml", "version: 1\nsites: []\n");
        store.set_failure(Some("throttled"));
        let err = load_tenant_config(&store, "").await.unwrap_err();
        assert!(matches!(err, ConfigLoadError::Store(_)));
    }

    #[tokio::test]
    async fn test_changes_are_picked_up_immediately() {
        let store = InMemoryContentStore::new().with_file("docternal.yaml", "version: 1\nsites: []\n");
        assert!(load_tenant_config(&store, "").await.unwrap().sites().is_empty());

        store.put(
            "docternal.yaml",
            "version: 1\nsites:\n  - project: p\n    domain: d.io\n",
        );
        assert_eq!(load_tenant_config(&store, "").await.unwrap().sites().len(), 1);
    }
}
