//! Docternal
//!
//! Serves documentation bundles for many sites out of one bucket, routing by
//! hostname and gating each site on its viewer permissions.

use clap::Parser;
use docternal_persistence::backends::objects::{LocalDirConfig, ObjectStoreContentStore};
use docternal_rest::{ServerConfig, StorageBackendMode, create_app_with_config, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        storage_backend = %config.storage,
        root = %config.root_docs_path,
        strict_domains = config.strict_domains,
        "Starting Docternal"
    );

    match config.storage {
        StorageBackendMode::S3 => start_s3(config).await,
        StorageBackendMode::Local => start_local(config).await,
    }
}

/// Starts the server against an S3 bucket.
#[cfg(feature = "s3")]
async fn start_s3(config: ServerConfig) -> anyhow::Result<()> {
    use docternal_persistence::backends::objects::S3Config;

    let s3_config = S3Config {
        endpoint: config.s3_endpoint.clone(),
        allow_http: config.s3_allow_http,
        ..S3Config::new(
            config.s3_bucket.clone().unwrap_or_default(),
            config.aws_region.clone().unwrap_or_default(),
        )
    };
    info!(bucket = %s3_config.bucket, region = %s3_config.region, "Initializing S3 content store");

    let store = ObjectStoreContentStore::s3(&s3_config)?;
    let app = create_app_with_config(store, config.clone());
    serve(app, &config).await
}

/// Fallback when the s3 feature is not enabled.
#[cfg(not(feature = "s3"))]
async fn start_s3(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The s3 backend requires the 's3' feature. \
         Build with: cargo build -p docternal-server --features s3"
    )
}

/// Starts the server against a local directory.
async fn start_local(config: ServerConfig) -> anyhow::Result<()> {
    let root = config
        .local_dir
        .clone()
        .ok_or_else(|| anyhow::anyhow!("DOCTERNAL_LOCAL_DIR is required for the local backend"))?;
    info!(root = %root.display(), "Initializing local content store");

    let store = ObjectStoreContentStore::local(&LocalDirConfig::new(root))?;
    let app = create_app_with_config(store, config.clone());
    serve(app, &config).await
}
