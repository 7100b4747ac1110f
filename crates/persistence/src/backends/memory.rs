//! In-memory content store.
//!
//! Keys live in a sorted map so directory listings come back in a stable
//! order. Listing follows S3 delimiter semantics: any key under the prefix
//! whose remainder contains a `/` contributes its first segment as a
//! subdirectory.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use crate::core::{ContentStore, ContentStream};
use crate::error::{StoreError, StoreResult};

const BACKEND_NAME: &str = "memory";

#[derive(Debug, Default)]
struct MemoryState {
    objects: BTreeMap<String, Bytes>,
    fail_with: Option<String>,
}

/// A [`ContentStore`] held entirely in memory.
///
/// Cloning is cheap and clones share the same contents, so a test can keep
/// a handle to seed files after the store was handed to the server.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryContentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`put`](Self::put).
    pub fn with_file(self, key: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        self.put(key, contents);
        self
    }

    /// Stores `contents` under `key`, replacing any previous object.
    pub fn put(&self, key: impl Into<String>, contents: impl Into<Bytes>) {
        let key = key.into();
        let key = key.trim_start_matches('/').to_string();
        self.state.write().objects.insert(key, contents.into());
    }

    /// Removes the object stored under `key`.
    pub fn remove(&self, key: &str) -> bool {
        self.state.write().objects.remove(key).is_some()
    }

    /// Makes every subsequent operation fail with a backend error.
    ///
    /// Pass `None` to restore normal behavior.
    pub fn set_failure(&self, message: Option<&str>) {
        self.state.write().fail_with = message.map(str::to_string);
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.state.read().objects.len()
    }

    /// Returns `true` if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.state.read().objects.is_empty()
    }

    fn check_failure(&self) -> StoreResult<()> {
        match &self.state.read().fail_with {
            Some(message) => Err(StoreError::backend(BACKEND_NAME, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ContentStore for InMemoryContentStore {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn list_subdirs(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.check_failure()?;

        let prefix = directory_prefix(prefix);
        let state = self.state.read();
        let dirs: BTreeSet<&str> = state
            .objects
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, _)| {
                let rest = &key[prefix.len()..];
                rest.split_once('/')
                    .map(|(dir, _)| dir)
                    .filter(|dir| !dir.is_empty())
            })
            .collect();

        Ok(dirs.into_iter().map(str::to_string).collect())
    }

    async fn open_file(&self, key: &str) -> StoreResult<ContentStream> {
        self.check_failure()?;

        let bytes = self
            .state
            .read()
            .objects
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))?;
        Ok(ContentStream::from_bytes(bytes))
    }
}

/// Normalizes a listing prefix to either `""` or `"<path>/"`.
fn directory_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}
