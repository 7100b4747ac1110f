//! The [`ContentStore`] trait and the [`ContentStream`] it hands out.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};

use crate::error::StoreResult;

/// Read-only hierarchical byte-stream repository.
///
/// Keys are `/`-separated paths without a leading slash. Implementations
/// must report a missing key from [`open_file`](ContentStore::open_file) as
/// [`StoreError::NotFound`](crate::StoreError::NotFound) so callers can
/// tell it apart from a backend failure.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Returns a short name for the backend, used in logs and health output.
    fn backend_name(&self) -> &'static str;

    /// Lists the names of the immediate child directories under `prefix`.
    ///
    /// Returns an empty list when the prefix has no children. Names are
    /// bare segments (no prefix, no trailing slash) in ascending order.
    async fn list_subdirs(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Opens the object stored under `key`.
    async fn open_file(&self, key: &str) -> StoreResult<ContentStream>;
}

#[async_trait]
impl<T> ContentStore for Arc<T>
where
    T: ContentStore + ?Sized,
{
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    async fn list_subdirs(&self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).list_subdirs(prefix).await
    }

    async fn open_file(&self, key: &str) -> StoreResult<ContentStream> {
        (**self).open_file(key).await
    }
}

/// A stream of byte chunks read from a [`ContentStore`].
///
/// The stream is consumed either chunk by chunk (it implements [`Stream`],
/// so it can be handed straight to an HTTP response body) or collected
/// with [`into_bytes`](Self::into_bytes) / [`into_string`](Self::into_string).
pub struct ContentStream {
    inner: BoxStream<'static, StoreResult<Bytes>>,
    size: Option<u64>,
}

impl ContentStream {
    /// Wraps a chunk stream. `size` is the total length when the backend knows it.
    pub fn new(inner: BoxStream<'static, StoreResult<Bytes>>, size: Option<u64>) -> Self {
        Self { inner, size }
    }

    /// Creates a single-chunk stream over an in-memory buffer.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        let size = Some(bytes.len() as u64);
        Self {
            inner: stream::once(async move { Ok(bytes) }).boxed(),
            size,
        }
    }

    /// Returns the total length in bytes, if known.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Reads the whole stream into a single buffer.
    pub async fn into_bytes(self) -> StoreResult<Bytes> {
        let buf = self
            .inner
            .try_fold(BytesMut::new(), |mut buf, chunk| async move {
                buf.extend_from_slice(&chunk);
                Ok(buf)
            })
            .await?;
        Ok(buf.freeze())
    }

    /// Reads the whole stream as UTF-8 text, replacing invalid sequences.
    pub async fn into_string(self) -> StoreResult<String> {
        let bytes = self.into_bytes().await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Stream for ContentStream {
    type Item = StoreResult<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for ContentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStream")
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    #[tokio::test]
    async fn test_from_bytes_round_trip() {
        let stream = ContentStream::from_bytes("version: 1\n");
        assert_eq!(stream.size(), Some(11));
        assert_eq!(stream.into_string().await.unwrap(), "version: 1\n");
    }

    #[tokio::test]
    async fn test_chunks_are_concatenated() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"<html>")),
            Ok(Bytes::from_static(b"</html>")),
        ])
        .boxed();
        let stream = ContentStream::new(chunks, None);
        assert_eq!(stream.size(), None);
        assert_eq!(
            stream.into_bytes().await.unwrap(),
            Bytes::from_static(b"<html></html>")
        );
    }

    #[tokio::test]
    async fn test_chunk_error_propagates() {
        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(StoreError::backend("test", "connection reset")),
        ])
        .boxed();
        let err = ContentStream::new(chunks, None)
            .into_bytes()
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let text = rt
            .block_on(ContentStream::from_bytes(vec![b'o', b'k', 0xff]).into_string())
            .unwrap();
        assert!(text.starts_with("ok"));
    }
}
