//! Site routing and access control.
//!
//! Everything here except [`loader`] is synchronous and free of I/O:
//!
//! 1. [`config`] parses `docternal.yaml` into a [`TenantConfig`]
//! 2. [`resolver`] picks the [`Site`] for a request hostname
//! 3. [`access`] decides whether an identity may view that site
//! 4. [`locator`] maps the request path to a storage key or a redirect

pub mod access;
pub mod config;
pub mod loader;
pub mod locator;
pub mod resolver;

pub use access::{AccessGrant, DomainMatch, can_access, can_access_with, decision};
pub use config::{ConfigError, Permissions, Site, TenantConfig};
pub use loader::{ConfigLoadError, load_tenant_config};
pub use locator::{ResolvedResource, listing_prefix, resolve};
