//! Documentation file delivery.
//!
//! `GET /{lang}/{*rest}` resolves the request against the site configured for
//! the request host and streams the stored object back. Paths that name a
//! directory are redirected to its `index.html`.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use docternal_persistence::core::ContentStore;
use tracing::{debug, info};

use super::authorize;
use crate::error::{RestError, RestResult};
use crate::extractors::{RequestHost, Viewer};
use crate::site::{ResolvedResource, load_tenant_config, resolve};
use crate::state::AppState;

/// Handler for documentation files.
///
/// # HTTP Request
///
/// `GET [base]/{lang}/{*rest}`
///
/// # Response
///
/// - `200 OK` - The stored file, with a `Content-Type` guessed from its extension
/// - `302 Found` - The path names a directory; `Location` points at its `index.html`
/// - `401 Unauthorized` - No viewer identity
/// - `403 Forbidden` - The viewer may not view the host's site
/// - `404 Not Found` - Unknown host, or no such file
/// - `500 Internal Server Error` - Missing or malformed `docternal.yaml`, or a store failure
///
/// # Example
///
/// ```http
/// GET /en/1.0/index.html HTTP/1.1
/// Host: docs.acme.com
/// X-Forwarded-Email: bob@acme.com
/// ```
pub async fn content_handler<S>(
    State(state): State<AppState<S>>,
    Path((lang, rest)): Path<(String, String)>,
    host: RequestHost,
    viewer: Viewer,
) -> RestResult<Response>
where
    S: ContentStore + 'static,
{
    let request_path = format!("/{lang}/{rest}");
    debug!(host = %host.hostname, path = %request_path, viewer = %viewer, "Processing content request");

    let config = load_tenant_config(state.store(), state.root()).await?;
    let site = config
        .select_site(&host.hostname, &request_path)
        .ok_or_else(|| {
            info!(host = %host.hostname, "No site configured for host");
            RestError::SiteNotFound {
                hostname: host.hostname.clone(),
            }
        })?;

    authorize(&state, site, viewer.identity())?;

    match resolve(state.root(), site, &request_path) {
        ResolvedResource::RedirectToIndex(location) => {
            debug!(location = %location, "Redirecting to index document");
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        ResolvedResource::File(key) => {
            let stream = state.store().open_file(&key).await.map_err(|e| {
                if e.is_not_found() {
                    debug!(key = %key, "Document not found");
                }
                RestError::from(e)
            })?;

            let mut headers = HeaderMap::new();
            headers.insert(header::CONTENT_TYPE, content_type_for(&key));
            if let Some(size) = stream.size() {
                headers.insert(header::CONTENT_LENGTH, HeaderValue::from(size));
            }

            debug!(key = %key, size = ?stream.size(), "Streaming document");
            Ok((StatusCode::OK, headers, Body::from_stream(stream)).into_response())
        }
    }
}

/// Guesses a `Content-Type` from the extension of `key`.
pub fn content_type_for(key: &str) -> HeaderValue {
    let extension = key
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let mime = match extension.as_str() {
        "html" | "htm" => mime::TEXT_HTML_UTF_8,
        "css" => mime::TEXT_CSS_UTF_8,
        "js" | "mjs" => mime::APPLICATION_JAVASCRIPT_UTF_8,
        "json" | "map" => mime::APPLICATION_JSON,
        "txt" | "md" => mime::TEXT_PLAIN_UTF_8,
        "csv" => mime::TEXT_CSV_UTF_8,
        "xml" => mime::TEXT_XML,
        "svg" => mime::IMAGE_SVG,
        "png" => mime::IMAGE_PNG,
        "jpg" | "jpeg" => mime::IMAGE_JPEG,
        "gif" => mime::IMAGE_GIF,
        "bmp" => mime::IMAGE_BMP,
        "woff" => mime::FONT_WOFF,
        "woff2" => mime::FONT_WOFF2,
        "pdf" => mime::APPLICATION_PDF,
        _ => mime::APPLICATION_OCTET_STREAM,
    };

    HeaderValue::from_str(mime.as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"))
}
