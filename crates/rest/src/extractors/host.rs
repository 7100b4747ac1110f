//! Request host extractor.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};

use crate::site::resolver::hostname_from_authority;

/// Header set by proxies to report the scheme the client used.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// The hostname (without port) and scheme a request was addressed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHost {
    /// Hostname taken from the `Host` header, or from the request URI.
    pub hostname: String,
    /// `http` unless a proxy reported otherwise.
    pub scheme: String,
}

impl RequestHost {
    fn from_parts(headers: &HeaderMap, uri_host: Option<&str>) -> Self {
        let hostname = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(hostname_from_authority)
            .or(uri_host)
            .unwrap_or_default()
            .to_string();

        let scheme = headers
            .get(X_FORWARDED_PROTO)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|scheme| !scheme.is_empty())
            .unwrap_or("http")
            .to_string();

        Self { hostname, scheme }
    }
}

impl<S> FromRequestParts<S> for RequestHost
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(&parts.headers, parts.uri.host()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_host_header_port_is_stripped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("docs.acme.com:8443"));
        let host = RequestHost::from_parts(&headers, None);
        assert_eq!(host.hostname, "docs.acme.com");
        assert_eq!(host.scheme, "http");
    }

    #[test]
    fn test_falls_back_to_uri_host() {
        let host = RequestHost::from_parts(&HeaderMap::new(), Some("docs.acme.com"));
        assert_eq!(host.hostname, "docs.acme.com");
    }

    #[test]
    fn test_missing_host() {
        let host = RequestHost::from_parts(&HeaderMap::new(), None);
        assert_eq!(host.hostname, "");
    }

    #[test]
    fn test_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_PROTO, HeaderValue::from_static("https, http"));
        assert_eq!(RequestHost::from_parts(&headers, None).scheme, "https");
    }
}
