//! # docternal-rest - Multi-tenant documentation server
//!
//! This crate serves versioned documentation bundles for many independent
//! sites from a single deployment. Each site is reachable through its own
//! hostname and carries its own access rules, all declared in a
//! `docternal.yaml` document stored next to the bundles.
//!
//! ## Request Flow
//!
//! For every content request the server:
//!
//! 1. loads `docternal.yaml` from the content store (never cached)
//! 2. picks the site whose `domain` equals the request host
//! 3. checks that the viewer may see the site
//! 4. maps the request path to a storage key, or redirects to `index.html`
//! 5. streams the object back
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docternal_persistence::backends::objects::{LocalDirConfig, ObjectStoreContentStore};
//! use docternal_rest::{create_app_with_config, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = ObjectStoreContentStore::local(&LocalDirConfig::new("./site-docs"))?;
//!     let config = ServerConfig::default();
//!
//!     let app = create_app_with_config(store, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Purpose | HTTP Method | URL Pattern |
//! |---------|-------------|-------------|
//! | languages / site index | GET | `/` |
//! | versions | GET | `/{lang}` |
//! | documentation file | GET | `/{lang}/{*rest}` |
//! | languages by project | GET | `/api/{project}/languages` |
//! | versions by project | GET | `/api/{project}/{lang}/versions` |
//! | liveness | GET | `/_liveness` |
//! | readiness | GET | `/_readiness` |
//!
//! ## Viewer Identity
//!
//! - `Authorization: Basic` checked against the `LOCAL_USERS` accounts
//! - a trusted header (`DOCTERNAL_TRUSTED_EMAIL_HEADER`) set by an
//!   authenticating reverse proxy
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "<kind>", "message": "<text>"}`:
//!
//! | HTTP Status | Description |
//! |-------------|-------------|
//! | 401 | No viewer identity |
//! | 403 | Viewer may not see the site |
//! | 404 | Unknown host or missing file |
//! | 500 | Missing or malformed `docternal.yaml`, store failure |
//!
//! ## Architecture
//!
//! - [`site`] - Configuration parsing, site resolution, access control, key resolution
//! - [`auth`] - Local accounts and identity extraction
//! - [`error`] - Error types and their HTTP rendering
//! - [`config`] - Server configuration
//! - [`state`] - Application state (store, configuration)
//! - [`extractors`] - Axum extractors for the viewer and request host
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod site;
pub mod state;

// Re-export commonly used types
pub use config::{ServerConfig, StorageBackendMode};
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use docternal_persistence::core::ContentStore;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// Creates the Axum application with default configuration.
pub fn create_app<S>(store: S) -> Router
where
    S: ContentStore + 'static,
{
    create_app_with_config(store, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// # Example
///
/// ```rust
/// use docternal_persistence::backends::memory::InMemoryContentStore;
/// use docternal_rest::{create_app_with_config, ServerConfig};
///
/// let store = InMemoryContentStore::new()
///     .with_file("docternal.yaml", "version: 1\nsites: []\n");
/// let app = create_app_with_config(store, ServerConfig::for_testing());
/// ```
pub fn create_app_with_config<S>(store: S, config: ServerConfig) -> Router
where
    S: ContentStore + 'static,
{
    info!(
        backend = store.backend_name(),
        root = %config.root_docs_path,
        local_users = config.local_users.len(),
        "Creating documentation server"
    );

    let timeout = std::time::Duration::from_secs(config.request_timeout);
    let state = AppState::new(Arc::new(store), config);

    let router = routing::create_routes(state);

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            timeout,
        ));

    router.layer(service_builder)
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level` when set.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "docternal={level},docternal_rest={level},docternal_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
