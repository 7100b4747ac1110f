//! Core content store abstractions.
//!
//! - [`ContentStore`] - the two-operation capability the server consumes
//! - [`ContentStream`] - the byte stream returned when a file is opened
//!
//! # Example: Implementing a Content Store
//!
//! ```ignore
//! use async_trait::async_trait;
//! use docternal_persistence::core::{ContentStore, ContentStream};
//! use docternal_persistence::error::StoreResult;
//!
//! struct MyStore;
//!
//! #[async_trait]
//! impl ContentStore for MyStore {
//!     fn backend_name(&self) -> &'static str {
//!         "my-store"
//!     }
//!
//!     async fn list_subdirs(&self, prefix: &str) -> StoreResult<Vec<String>> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn open_file(&self, key: &str) -> StoreResult<ContentStream> {
//!         Err(docternal_persistence::StoreError::not_found(key))
//!     }
//! }
//! ```

mod store;

pub use store::{ContentStore, ContentStream};
