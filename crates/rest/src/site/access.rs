//! Per-site authorization.
//!
//! A viewer may see a site when their identity is listed in `emails`, listed
//! in `local_users`, or ends with one of the `domains` entries. Identities and
//! rules are compared as given; no case folding or trimming happens here.

use std::fmt;

use super::config::Site;

/// How `permissions.domains` entries are matched against an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DomainMatch {
    /// Plain string suffix: `acme.com` also matches `bob@notacme.com`.
    #[default]
    Suffix,
    /// Suffix that must start right after an `@` or a `.` (or be the whole
    /// identity). Rules that themselves begin with `@` or `.` are already anchored.
    Boundary,
}

/// The rule that let an identity in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessGrant<'a> {
    Email(&'a str),
    LocalUser(&'a str),
    Domain(&'a str),
}

impl fmt::Display for AccessGrant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessGrant::Email(email) => write!(f, "email {email}"),
            AccessGrant::LocalUser(user) => write!(f, "local user {user}"),
            AccessGrant::Domain(domain) => write!(f, "domain {domain}"),
        }
    }
}

/// Returns `true` if `identity` may view `site`, using plain suffix matching.
pub fn can_access(identity: &str, site: &Site) -> bool {
    can_access_with(identity, site, DomainMatch::Suffix)
}

/// Like [`can_access`], with an explicit domain matching mode.
pub fn can_access_with(identity: &str, site: &Site, mode: DomainMatch) -> bool {
    decision(identity, site, mode).is_some()
}

/// Returns the first rule granting `identity` access to `site`, if any.
///
/// Rules are checked in the order emails, local users, domains.
pub fn decision<'a>(identity: &str, site: &'a Site, mode: DomainMatch) -> Option<AccessGrant<'a>> {
    let permissions = &site.permissions;

    if let Some(email) = permissions.emails.get(identity) {
        return Some(AccessGrant::Email(email));
    }
    if let Some(user) = permissions.local_users.get(identity) {
        return Some(AccessGrant::LocalUser(user));
    }
    permissions
        .domains
        .iter()
        .find(|domain| domain_matches(identity, domain, mode))
        .map(|domain| AccessGrant::Domain(domain))
}

fn domain_matches(identity: &str, domain: &str, mode: DomainMatch) -> bool {
    match mode {
        DomainMatch::Suffix => identity.ends_with(domain),
        DomainMatch::Boundary => {
            if domain.is_empty() {
                return false;
            }
            let anchored = domain.starts_with('@') || domain.starts_with('.');
            match identity.strip_suffix(domain) {
                Some(head) => {
                    anchored || head.is_empty() || head.ends_with('@') || head.ends_with('.')
                }
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::config::TenantConfig;

    fn site(permissions: &str) -> Site {
        let document = format!(
            "version: 1\nsites:\n  - project: cool-sdk\n    domain: docs.acme.com\n    permissions:\n{permissions}"
        );
        TenantConfig::parse(&document).unwrap().sites()[0].clone()
    }

    #[test]
    fn test_domain_suffix_grants_access() {
        let site = site("      domains: [acme.com]\n");
        assert!(can_access("bob@acme.com", &site));
        assert!(!can_access("bob@evil.com", &site));
    }

    #[test]
    fn test_exact_email_grants_access() {
        let site = site("      emails: alice@x.com\n");
        assert!(can_access("alice@x.com", &site));
        assert!(!can_access("mallory@x.com", &site));
    }

    #[test]
    fn test_local_user_grants_access() {
        let site = site("      local_users: [ci-bot]\n");
        assert!(can_access("ci-bot", &site));
        assert!(!can_access("ci-bot2", &site));
    }

    #[test]
    fn test_no_rules_denies_everyone() {
        let site = site("      {}\n");
        assert!(!can_access("bob@acme.com", &site));
        assert!(!can_access("", &site));
    }

    #[test]
    fn test_comparison_is_not_normalized() {
        let site = site("      domains: [acme.com]\n      emails: [Alice@x.com]\n");
        assert!(!can_access("bob@ACME.COM", &site));
        assert!(!can_access("alice@x.com", &site));
        assert!(!can_access(" bob@acme.com ", &site));
    }

    #[test]
    fn test_suffix_mode_is_permissive() {
        let site = site("      domains: [acme.com]\n");
        assert!(can_access("bob@notacme.com", &site));
        assert!(can_access_with("bob@notacme.com", &site, DomainMatch::Suffix));
    }

    #[test]
    fn test_boundary_mode() {
        let site = site("      domains: [acme.com]\n");
        assert!(can_access_with("bob@acme.com", &site, DomainMatch::Boundary));
        assert!(can_access_with("bob@eu.acme.com", &site, DomainMatch::Boundary));
        assert!(can_access_with("acme.com", &site, DomainMatch::Boundary));
        assert!(!can_access_with("bob@notacme.com", &site, DomainMatch::Boundary));
    }

    #[test]
    fn test_boundary_mode_with_at_prefixed_rule() {
        let site = site("      domains: ['@acme.com']\n");
        assert!(can_access_with("bob@acme.com", &site, DomainMatch::Boundary));
        assert!(!can_access_with("bob@sub.acme.com", &site, DomainMatch::Boundary));
    }

    #[test]
    fn test_empty_domain_rule() {
        let site = site("      domains: ['']\n");
        assert!(can_access("anyone@anywhere.org", &site));
        assert!(!can_access_with("anyone@anywhere.org", &site, DomainMatch::Boundary));
    }

    #[test]
    fn test_decision_reports_granting_rule() {
        let site = site("      domains: [acme.com]\n      emails: [bob@acme.com]\n");
        assert_eq!(
            decision("bob@acme.com", &site, DomainMatch::Suffix),
            Some(AccessGrant::Email("bob@acme.com"))
        );
        assert_eq!(
            decision("eve@acme.com", &site, DomainMatch::Suffix),
            Some(AccessGrant::Domain("acme.com"))
        );
        assert_eq!(decision("eve@evil.com", &site, DomainMatch::Suffix), None);
        assert_eq!(
            AccessGrant::Domain("acme.com").to_string(),
            "domain acme.com"
        );
    }
}
