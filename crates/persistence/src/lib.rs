//! Docternal Content Store Layer
//!
//! This crate provides read-only access to the bucket that holds a tenant's
//! documentation: the `docternal.yaml` site configuration at the root and
//! the rendered bundles laid out as `<root>/<project>/<language>/<version>/...`.
//!
//! # Features
//!
//! - **One small trait**: [`ContentStore`](core::ContentStore) lists child
//!   directories and opens files; nothing else is needed to serve docs
//! - **Streaming reads**: file bodies are exposed as a byte stream
//! - **Pluggable backends**: S3, a local directory, or an in-memory map
//!
//! Enable the S3 backend with the `s3` feature (on by default):
//!
//! ```toml
//! [dependencies]
//! docternal-persistence = { version = "0.1", features = ["s3"] }
//! ```
//!
//! # Architecture
//!
//! - [`error`] - Error types for all operations
//! - [`core`] - The store trait and the content stream
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```
//! use docternal_persistence::backends::memory::InMemoryContentStore;
//! use docternal_persistence::core::ContentStore;
//!
//! # tokio_test();
//! # fn tokio_test() {
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let store = InMemoryContentStore::new()
//!     .with_file("docs/cool-sdk/en/latest/index.html", "<h1>Hello</h1>");
//!
//! let languages = store.list_subdirs("docs/cool-sdk/").await.unwrap();
//! assert_eq!(languages, vec!["en".to_string()]);
//! # });
//! # }
//! ```

pub mod backends;
pub mod core;
pub mod error;

pub use error::{StoreError, StoreResult};
