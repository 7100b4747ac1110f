use std::path::PathBuf;
use std::sync::Arc;

use object_store::local::LocalFileSystem;

use super::ObjectStoreContentStore;
use crate::error::{StoreError, StoreResult};

const BACKEND_NAME: &str = "local";

/// Configuration for serving documentation bundles from a local directory.
#[derive(Debug, Clone)]
pub struct LocalDirConfig {
    /// Directory that plays the role of the bucket root.
    pub root: PathBuf,
}

impl LocalDirConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ObjectStoreContentStore {
    /// Opens a store rooted at a local directory. The directory must exist.
    pub fn local(config: &LocalDirConfig) -> StoreResult<Self> {
        let fs = LocalFileSystem::new_with_prefix(&config.root).map_err(|e| {
            StoreError::backend(
                BACKEND_NAME,
                format!("cannot open directory '{}': {e}", config.root.display()),
            )
        })?;
        Ok(Self::new(Arc::new(fs), BACKEND_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContentStore;

    fn write(root: &std::path::Path, key: &str, body: &str) {
        let path = root.join(key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[tokio::test]
    async fn test_local_directory_store() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "docternal.yaml", "version: 1\n");
        write(dir.path(), "docs/cool-sdk/en/latest/index.html", "<p>hi</p>");
        write(dir.path(), "docs/cool-sdk/es/latest/index.html", "<p>hola</p>");

        let store = ObjectStoreContentStore::local(&LocalDirConfig::new(dir.path())).unwrap();
        assert_eq!(store.backend_name(), "local");

        assert_eq!(
            store.list_subdirs("docs/cool-sdk/").await.unwrap(),
            vec!["en".to_string(), "es".to_string()]
        );

        let body = store
            .open_file("docs/cool-sdk/es/latest/index.html")
            .await
            .unwrap()
            .into_string()
            .await
            .unwrap();
        assert_eq!(body, "<p>hola</p>");

        let err = store.open_file("docs/cool-sdk/de/index.html").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_directory_fails() {
        let result = ObjectStoreContentStore::local(&LocalDirConfig::new(
            "/definitely/not/a/real/docternal/dir",
        ));
        assert!(result.is_err());
    }
}
