//! Content store backend implementations.
//!
//! # Available Backends
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | In-memory | always | Map-backed store for tests and local development |
//! | Local directory | always | Documentation bundles served from a directory tree |
//! | S3 | `s3` | Documentation bundles in an S3 (or S3-compatible) bucket |
//!
//! # Example
//!
//! ```no_run
//! use docternal_persistence::backends::objects::{LocalDirConfig, ObjectStoreContentStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ObjectStoreContentStore::local(&LocalDirConfig::new("./site-docs"))?;
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod objects;
