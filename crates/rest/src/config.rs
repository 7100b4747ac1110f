//! Server configuration for the Docternal documentation server.
//!
//! Every option can be given on the command line or through the environment.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PORT` | 8080 | Server port |
//! | `DOCTERNAL_HOST` | 0.0.0.0 | Host to bind |
//! | `DOCTERNAL_LOG_LEVEL` | info | Log level |
//! | `DOCTERNAL_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `DOCTERNAL_STORAGE` | s3 | Content store backend (`s3` or `local`) |
//! | `S3_BUCKET_NAME` | - | Bucket holding the docs (required for `s3`) |
//! | `AWS_REGION` | - | Bucket region (required for `s3`) |
//! | `DOCTERNAL_S3_ENDPOINT` | - | S3-compatible endpoint URL |
//! | `DOCTERNAL_S3_ALLOW_HTTP` | false | Allow a plain-HTTP endpoint |
//! | `DOCTERNAL_LOCAL_DIR` | - | Docs directory (required for `local`) |
//! | `ROOT_DOCS_PATH` | "" | Root path inside the store |
//! | `LOCAL_USERS` | "" | Local accounts, `user:pass,user2:pass2` |
//! | `DOCTERNAL_TRUSTED_EMAIL_HEADER` | - | Header carrying a proxy-verified email |
//! | `DOCTERNAL_STRICT_DOMAINS` | false | Require `@`/`.` before domain rules |
//!
//! # Example
//!
//! ```rust
//! use docternal_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     root_docs_path: "docs".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use std::fmt;
use std::path::PathBuf;

use axum::http::HeaderName;
use clap::{Parser, ValueEnum};

use crate::auth::LocalUsers;
use crate::site::DomainMatch;

/// Which content store the server reads from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendMode {
    /// An S3 (or S3-compatible) bucket.
    #[default]
    S3,
    /// A directory on the local filesystem.
    Local,
}

impl fmt::Display for StorageBackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendMode::S3 => write!(f, "s3"),
            StorageBackendMode::Local => write!(f, "local"),
        }
    }
}

/// Server configuration.
///
/// Constructed from the command line and environment with
/// [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "docternal")]
#[command(about = "Multi-tenant documentation server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "DOCTERNAL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "DOCTERNAL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "DOCTERNAL_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Content store backend.
    #[arg(long, env = "DOCTERNAL_STORAGE", value_enum, default_value = "s3")]
    pub storage: StorageBackendMode,

    /// S3 bucket holding `docternal.yaml` and the documentation bundles.
    #[arg(long, env = "S3_BUCKET_NAME")]
    pub s3_bucket: Option<String>,

    /// AWS region of the bucket.
    #[arg(long, env = "AWS_REGION")]
    pub aws_region: Option<String>,

    /// S3-compatible endpoint URL (for example, MinIO).
    #[arg(long, env = "DOCTERNAL_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Allow a plain-HTTP S3 endpoint.
    #[arg(long, env = "DOCTERNAL_S3_ALLOW_HTTP", default_value = "false")]
    pub s3_allow_http: bool,

    /// Directory served when the storage backend is `local`.
    #[arg(long, env = "DOCTERNAL_LOCAL_DIR")]
    pub local_dir: Option<PathBuf>,

    /// Path inside the store under which `docternal.yaml` and projects live.
    #[arg(long, env = "ROOT_DOCS_PATH", default_value = "")]
    pub root_docs_path: String,

    /// Local accounts as `user:pass` pairs separated by commas.
    #[arg(
        long,
        env = "LOCAL_USERS",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true,
        value_parser = LocalUsers::parse_arg
    )]
    pub local_users: LocalUsers,

    /// Request header carrying an email already verified by a reverse proxy.
    #[arg(long, env = "DOCTERNAL_TRUSTED_EMAIL_HEADER")]
    pub trusted_email_header: Option<String>,

    /// Require domain rules to match at an `@` or `.` boundary.
    #[arg(long, env = "DOCTERNAL_STRICT_DOMAINS", default_value = "false")]
    pub strict_domains: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "0.0.0.0".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            storage: StorageBackendMode::S3,
            s3_bucket: None,
            aws_region: None,
            s3_endpoint: None,
            s3_allow_http: false,
            local_dir: None,
            root_docs_path: String::new(),
            local_users: LocalUsers::default(),
            trusted_email_header: None,
            strict_domains: false,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Domain rule matching mode selected by `strict_domains`.
    pub fn domain_match(&self) -> DomainMatch {
        if self.strict_domains {
            DomainMatch::Boundary
        } else {
            DomainMatch::Suffix
        }
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        match self.storage {
            StorageBackendMode::S3 => {
                if is_blank(self.s3_bucket.as_deref()) {
                    errors.push("S3_BUCKET_NAME is required for the s3 storage backend".to_string());
                }
                if is_blank(self.aws_region.as_deref()) {
                    errors.push("AWS_REGION is required for the s3 storage backend".to_string());
                }
                if let Some(endpoint) = self.s3_endpoint.as_deref() {
                    if endpoint.to_ascii_lowercase().starts_with("http://") && !self.s3_allow_http {
                        errors.push(
                            "An http:// S3 endpoint requires DOCTERNAL_S3_ALLOW_HTTP=true".to_string(),
                        );
                    }
                }
            }
            StorageBackendMode::Local => {
                if self.local_dir.is_none() {
                    errors.push(
                        "DOCTERNAL_LOCAL_DIR is required for the local storage backend".to_string(),
                    );
                }
            }
        }

        if let Some(header) = self.trusted_email_header.as_deref() {
            if HeaderName::from_bytes(header.as_bytes()).is_err() {
                errors.push(format!("Invalid trusted email header name: '{header}'"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, the local storage backend and a short timeout.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            storage: StorageBackendMode::Local,
            local_dir: Some(PathBuf::from(".")),
            ..Default::default()
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}
