//! Tenant configuration document and its parser.
//!
//! The document lives at `<root>/docternal.yaml` and looks like:
//!
//! ```yaml
//! version: 1
//! sites:
//!   - project: cool-sdk
//!     domain: docs.acme.com
//!     path: sdk
//!     permissions:
//!       domains: acme.com
//!       emails: [alice@partner.io]
//!       local_users: [ci-bot]
//! ```
//!
//! Structural problems (wrong version, missing `sites`, a site without a
//! `project` or `domain`) reject the whole document. Permission fields are
//! lenient: anything that is neither a string nor a list of strings simply
//! grants nothing.

use std::collections::BTreeSet;

use serde_yaml::Value;
use thiserror::Error;

/// Name of the configuration document at the root of the store.
pub const CONFIG_FILE_NAME: &str = "docternal.yaml";

/// The only configuration format version this server understands.
pub const SUPPORTED_VERSION: u64 = 1;

/// Errors produced while parsing a configuration document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(String),

    /// The top level of the document is not a mapping.
    #[error("configuration must be a mapping")]
    NotAMapping,

    /// `version` is absent or is not numerically equal to 1.
    #[error("wrong version")]
    WrongVersion,

    /// The `sites` key is absent or null.
    #[error("missing sites key")]
    MissingSites,

    /// `sites` is present but is not a list.
    #[error("sites must be a list")]
    SitesNotSequence,

    /// A `sites` entry is not a mapping.
    #[error("site #{index} must be a mapping")]
    SiteNotMapping {
        /// Zero-based position of the entry.
        index: usize,
    },

    /// A `sites` entry lacks a required string field.
    #[error("site #{index} is missing a non-empty '{field}'")]
    MissingField {
        /// Zero-based position of the entry.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// A parsed, validated configuration document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantConfig {
    version: u64,
    sites: Vec<Site>,
}

/// One documentation project served under a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    /// Content subtree in the store.
    pub project: String,
    /// Exact hostname the site is served from.
    pub domain: String,
    /// URL path prefix under the domain, possibly empty.
    pub path: String,
    /// Who may view the site.
    pub permissions: Permissions,
}

/// Access rules of a [`Site`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Permissions {
    /// Email-domain suffixes granted access.
    pub domains: BTreeSet<String>,
    /// Exact email addresses (or local usernames) granted access.
    pub emails: BTreeSet<String>,
    /// Local account usernames granted access.
    pub local_users: BTreeSet<String>,
}

impl TenantConfig {
    /// Parses a configuration document.
    pub fn parse(document: &str) -> Result<Self, ConfigError> {
        let root: Value =
            serde_yaml::from_str(document).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        if !root.is_mapping() {
            return Err(ConfigError::NotAMapping);
        }

        // Numeric comparison: `1` and `1.0` are the same version.
        let version = root
            .get("version")
            .and_then(Value::as_f64)
            .filter(|v| *v == SUPPORTED_VERSION as f64)
            .map(|_| SUPPORTED_VERSION)
            .ok_or(ConfigError::WrongVersion)?;

        let sites = match root.get("sites") {
            None | Some(Value::Null) => return Err(ConfigError::MissingSites),
            Some(Value::Sequence(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| parse_site(index, entry))
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(ConfigError::SitesNotSequence),
        };

        Ok(Self { version, sites })
    }

    /// Format version of the document. Always `1` once parsed.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sites in document order.
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }
}

impl std::str::FromStr for TenantConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_site(index: usize, entry: &Value) -> Result<Site, ConfigError> {
    if !entry.is_mapping() {
        return Err(ConfigError::SiteNotMapping { index });
    }

    let required = |field: &'static str| {
        entry
            .get(field)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .ok_or(ConfigError::MissingField { index, field })
    };

    let project = required("project")?;
    let domain = required("domain")?;
    let path = entry
        .get("path")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let permissions = match entry.get("permissions") {
        Some(rules) => Permissions {
            domains: string_set(rules.get("domains")),
            emails: string_set(rules.get("emails")),
            local_users: string_set(rules.get("local_users")),
        },
        None => Permissions::default(),
    };

    Ok(Site {
        project,
        domain,
        path,
        permissions,
    })
}

/// Accepts a single string or a list of strings; anything else is empty.
fn string_set(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::String(s)) => BTreeSet::from([s.clone()]),
        Some(Value::Sequence(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => BTreeSet::new(),
    }
}
