use std::sync::Arc;

use object_store::aws::AmazonS3Builder;

use super::ObjectStoreContentStore;
use crate::error::{StoreError, StoreResult};

const BACKEND_NAME: &str = "s3";

/// Configuration for the S3 content store.
///
/// Credentials are not part of this struct; they come from the standard
/// AWS environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
/// `AWS_SESSION_TOKEN`, ...) or the instance metadata service.
#[derive(Debug, Clone)]
pub struct S3Config {
    /// Bucket holding `docternal.yaml` and the documentation bundles.
    pub bucket: String,

    /// AWS region of the bucket.
    pub region: String,

    /// Optional S3-compatible endpoint URL (for example, MinIO).
    pub endpoint: Option<String>,

    /// Allow plain-HTTP endpoints.
    pub allow_http: bool,
}

impl S3Config {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            allow_http: false,
        }
    }

    /// Checks the invariants the builder does not.
    pub fn validate(&self) -> StoreResult<()> {
        if self.bucket.trim().is_empty() {
            return Err(StoreError::backend(BACKEND_NAME, "bucket must not be empty"));
        }
        if self.region.trim().is_empty() {
            return Err(StoreError::backend(BACKEND_NAME, "region must not be empty"));
        }
        if let Some(endpoint) = self.endpoint.as_deref() {
            let lower = endpoint.trim().to_ascii_lowercase();
            let is_http = lower.starts_with("http://");
            if !is_http && !lower.starts_with("https://") {
                return Err(StoreError::backend(
                    BACKEND_NAME,
                    "endpoint must start with http:// or https://",
                ));
            }
            if is_http && !self.allow_http {
                return Err(StoreError::backend(
                    BACKEND_NAME,
                    "http endpoint requires allow_http=true",
                ));
            }
        }
        Ok(())
    }
}

impl ObjectStoreContentStore {
    /// Builds a store over an S3 bucket.
    pub fn s3(config: &S3Config) -> StoreResult<Self> {
        config.validate()?;

        let mut builder = AmazonS3Builder::from_env()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_allow_http(config.allow_http);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        let store = builder.build().map_err(|e| {
            StoreError::backend(
                BACKEND_NAME,
                format!("failed to build S3 store for bucket '{}': {e}", config.bucket),
            )
        })?;

        Ok(Self::new(Arc::new(store), BACKEND_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ContentStore;

    #[test]
    fn validate_rejects_empty_bucket() {
        assert!(S3Config::new("", "us-east-1").validate().is_err());
    }

    #[test]
    fn validate_rejects_http_endpoint_when_allow_http_false() {
        let mut config = S3Config::new("docs-bucket", "us-east-1");
        config.endpoint = Some("http://127.0.0.1:9000".to_string());
        assert!(config.validate().is_err());

        config.allow_http = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_malformed_endpoint_scheme() {
        let mut config = S3Config::new("docs-bucket", "us-east-1");
        config.endpoint = Some("ftp://minio.local:9000".to_string());
        config.allow_http = true;
        assert!(config.validate().is_err());
    }

    #[test]
    fn build_does_not_touch_the_network() {
        let mut config = S3Config::new("docs-bucket", "eu-west-1");
        config.endpoint = Some("http://127.0.0.1:9000".to_string());
        config.allow_http = true;
        let store = ObjectStoreContentStore::s3(&config).unwrap();
        assert_eq!(store.backend_name(), "s3");
    }
}
