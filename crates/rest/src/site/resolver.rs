//! Maps a request hostname to the site it belongs to.

use super::config::{Site, TenantConfig};

impl TenantConfig {
    /// Returns the first site, in document order, whose domain equals `hostname`.
    ///
    /// The comparison is exact and case-sensitive. `path` is accepted so the
    /// call site does not change if sites sharing a domain ever need to be
    /// told apart, but it does not take part in the match today.
    pub fn select_site(&self, hostname: &str, _path: &str) -> Option<&Site> {
        self.sites().iter().find(|site| site.domain == hostname)
    }

    /// All sites serving `project`, in document order.
    pub fn sites_for_project<'a>(&'a self, project: &'a str) -> impl Iterator<Item = &'a Site> + 'a {
        self.sites().iter().filter(move |site| site.project == project)
    }
}

/// Extracts the hostname from a `Host` header value, dropping any port.
///
/// Bracketed IPv6 literals keep their brackets.
pub fn hostname_from_authority(authority: &str) -> &str {
    let authority = authority.trim();
    if authority.starts_with('[') {
        return match authority.find(']') {
            Some(end) => &authority[..=end],
            None => authority,
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TenantConfig {
        TenantConfig::parse(
            r#"
version: 1
sites:
  - project: cool-sdk
    domain: docs.acme.com
    path: sdk
  - project: other-sdk
    domain: docs.acme.com
    path: other
  - project: beta
    domain: beta.acme.com
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_first_domain_match_wins() {
        let config = config();
        let site = config.select_site("docs.acme.com", "/other/en").unwrap();
        assert_eq!(site.project, "cool-sdk");
    }

    #[test]
    fn test_path_is_ignored() {
        let config = config();
        let a = config.select_site("beta.acme.com", "/x").unwrap();
        let b = config.select_site("beta.acme.com", "").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_match() {
        let config = config();
        assert!(config.select_site("docs.evil.com", "/").is_none());
        assert!(config.select_site("DOCS.ACME.COM", "/").is_none());
        assert!(config.select_site("acme.com", "/").is_none());
    }

    #[test]
    fn test_sites_for_project() {
        let config = config();
        let domains: Vec<_> = config
            .sites_for_project("beta")
            .map(|s| s.domain.as_str())
            .collect();
        assert_eq!(domains, vec!["beta.acme.com"]);
        assert_eq!(config.sites_for_project("missing").count(), 0);
    }

    #[test]
    fn test_hostname_from_authority() {
        assert_eq!(hostname_from_authority("docs.acme.com"), "docs.acme.com");
        assert_eq!(hostname_from_authority("docs.acme.com:8080"), "docs.acme.com");
        assert_eq!(hostname_from_authority("[::1]:8080"), "[::1]");
        assert_eq!(hostname_from_authority("localhost:"), "localhost");
    }
}
