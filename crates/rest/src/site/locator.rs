//! Turns a request path into a storage key.
//!
//! Keys are built by joining the store root, the site's project and the
//! request path. Empty and `.` segments disappear; `..` can only remove
//! segments contributed by the same component, so a request path can never
//! climb out of its project and a project can never climb out of the root.

use super::config::{CONFIG_FILE_NAME, Site};

/// Outcome of resolving a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedResource {
    /// Fetch the object stored under this key.
    File(String),
    /// The path names a directory; send the client here instead.
    RedirectToIndex(String),
}

/// Name of the document served for directory-like paths.
pub const INDEX_FILE: &str = "index.html";

/// Resolves `request_path` inside the site's project under `root`.
pub fn resolve(root: &str, site: &Site, request_path: &str) -> ResolvedResource {
    let segments = join_segments(&[root, &site.project, request_path]);

    let is_file = segments.last().is_some_and(|name| has_extension(name));
    if is_file {
        ResolvedResource::File(segments.join("/"))
    } else {
        ResolvedResource::RedirectToIndex(index_location(request_path))
    }
}

/// Builds the directory prefix listed for languages and versions.
///
/// The result ends with `/` unless it is empty.
pub fn listing_prefix(root: &str, project: &str, segments: &[&str]) -> String {
    let mut components = vec![root, project];
    components.extend_from_slice(segments);

    let joined = join_segments(&components);
    if joined.is_empty() {
        String::new()
    } else {
        format!("{}/", joined.join("/"))
    }
}

/// Key of the configuration document under `root`.
pub fn config_key(root: &str) -> String {
    join_segments(&[root, CONFIG_FILE_NAME]).join("/")
}

/// Location of the index document for a decoded request path.
///
/// Segments are percent-encoded again so the value is a valid header and URI.
fn index_location(request_path: &str) -> String {
    let mut location = String::new();
    for segment in join_segments(&[request_path]) {
        location.push('/');
        location.push_str(&urlencoding::encode(segment));
    }
    format!("{location}/{INDEX_FILE}")
}

fn join_segments<'a>(components: &[&'a str]) -> Vec<&'a str> {
    let mut out = Vec::new();
    for component in components {
        let floor = out.len();
        for segment in component.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if out.len() > floor {
                        out.pop();
                    }
                }
                _ => out.push(segment),
            }
        }
    }
    out
}

/// A name has an extension when the part after its last dot contains a letter.
///
/// Leading dots do not count, and numeric suffixes such as the `0` in `1.0`
/// are treated as part of a version number.
fn has_extension(name: &str) -> bool {
    let name = name.trim_start_matches('.');
    match name.rsplit_once('.') {
        Some((_, ext)) => ext.chars().any(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}
