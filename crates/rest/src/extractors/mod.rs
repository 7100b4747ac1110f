//! Axum extractors for viewer identity and request addressing.
//!
//! - [`Viewer`] - The authenticated identity behind the request
//! - [`RequestHost`] - Hostname and scheme used to reach the server

mod host;
mod viewer;

pub use host::{RequestHost, X_FORWARDED_PROTO};
pub use viewer::Viewer;
