//! Content store over the `object_store` crate.
//!
//! One adapter covers every backend `object_store` supports. The server
//! wires up two of them: an S3 bucket (feature `s3`) and a local directory.

mod local;
#[cfg(feature = "s3")]
mod s3;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use object_store::ObjectStore;
use object_store::path::Path;
use tracing::debug;

use crate::core::{ContentStore, ContentStream};
use crate::error::{StoreError, StoreResult};

pub use local::LocalDirConfig;
#[cfg(feature = "s3")]
pub use s3::S3Config;

/// A [`ContentStore`] backed by any [`ObjectStore`].
#[derive(Clone)]
pub struct ObjectStoreContentStore {
    store: Arc<dyn ObjectStore>,
    backend_name: &'static str,
}

impl ObjectStoreContentStore {
    /// Wraps an already built object store.
    pub fn new(store: Arc<dyn ObjectStore>, backend_name: &'static str) -> Self {
        Self {
            store,
            backend_name,
        }
    }

    fn parse_key(&self, key: &str) -> StoreResult<Path> {
        Path::parse(key).map_err(|e| StoreError::InvalidKey {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn backend_error(&self, action: &str, key: &str, err: object_store::Error) -> StoreError {
        StoreError::backend(
            self.backend_name,
            format!("failed {action} '{key}': {err}"),
        )
    }
}

impl fmt::Debug for ObjectStoreContentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectStoreContentStore")
            .field("backend_name", &self.backend_name)
            .field("store", &self.store.to_string())
            .finish()
    }
}

#[async_trait]
impl ContentStore for ObjectStoreContentStore {
    fn backend_name(&self) -> &'static str {
        self.backend_name
    }

    async fn list_subdirs(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let path = if prefix.trim_matches('/').is_empty() {
            None
        } else {
            Some(self.parse_key(prefix)?)
        };

        let listing = self
            .store
            .list_with_delimiter(path.as_ref())
            .await
            .map_err(|e| self.backend_error("listing", prefix, e))?;

        let mut dirs: Vec<String> = listing
            .common_prefixes
            .iter()
            .filter_map(|p| p.filename().map(str::to_string))
            .collect();
        dirs.sort();
        dirs.dedup();

        debug!(backend = self.backend_name, prefix, count = dirs.len(), "Listed subdirectories");
        Ok(dirs)
    }

    async fn open_file(&self, key: &str) -> StoreResult<ContentStream> {
        let path = self.parse_key(key)?;

        let result = match self.store.get(&path).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Err(StoreError::not_found(key)),
            Err(e) => return Err(self.backend_error("reading", key, e)),
        };

        let size = Some(result.meta.size as u64);
        let backend_name = self.backend_name;
        let owned_key = key.to_string();
        let chunks = result
            .into_stream()
            .map(move |chunk| {
                chunk.map_err(|e| {
                    StoreError::backend(
                        backend_name,
                        format!("failed streaming '{owned_key}': {e}"),
                    )
                })
            })
            .boxed();

        Ok(ContentStream::new(chunks, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::PutPayload;
    use object_store::memory::InMemory;

    async fn seeded() -> ObjectStoreContentStore {
        let inner = InMemory::new();
        for (key, body) in [
            ("docternal.yaml", "version: 1\nsites: []\n"),
            ("docs/cool-sdk/en/latest/index.html", "<h1>latest</h1>"),
            ("docs/cool-sdk/en/1.0.0/index.html", "<h1>1.0.0</h1>"),
            ("docs/cool-sdk/fr/latest/index.html", "<h1>dernier</h1>"),
        ] {
            inner
                .put(&Path::from(key), PutPayload::from(body))
                .await
                .unwrap();
        }
        ObjectStoreContentStore::new(Arc::new(inner), "memory")
    }

    #[tokio::test]
    async fn test_list_subdirs() {
        let store = seeded().await;
        assert_eq!(
            store.list_subdirs("docs/cool-sdk/").await.unwrap(),
            vec!["en".to_string(), "fr".to_string()]
        );
        assert_eq!(
            store.list_subdirs("docs/cool-sdk/en/").await.unwrap(),
            vec!["1.0.0".to_string(), "latest".to_string()]
        );
    }

    #[tokio::test]
    async fn test_list_subdirs_root() {
        let store = seeded().await;
        assert_eq!(store.list_subdirs("").await.unwrap(), vec!["docs".to_string()]);
    }

    #[tokio::test]
    async fn test_list_missing_prefix_is_empty() {
        let store = seeded().await;
        assert!(store.list_subdirs("docs/other/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_file_streams_contents() {
        let store = seeded().await;
        let stream = store
            .open_file("docs/cool-sdk/fr/latest/index.html")
            .await
            .unwrap();
        assert_eq!(stream.size(), Some(16));
        assert_eq!(stream.into_string().await.unwrap(), "<h1>dernier</h1>");
    }

    #[tokio::test]
    async fn test_open_missing_file_maps_to_not_found() {
        let store = seeded().await;
        let err = store.open_file("docs/cool-sdk/de/index.html").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_key_is_rejected() {
        let store = seeded().await;
        let err = store.open_file("docs/../secret").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
    }
}
