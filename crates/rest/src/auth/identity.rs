//! Establishing who is making a request.
//!
//! Two sources are consulted, in order:
//!
//! 1. An `Authorization: Basic` header checked against the local accounts
//! 2. A trusted header set by an authenticating reverse proxy
//!
//! The first one that yields an identity wins.

use axum::http::{HeaderMap, HeaderName, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::debug;

use super::local::LocalUsers;

/// Domain recorded for identities backed by a local account.
pub const LOCAL_USER_DOMAIN: &str = "local_user";

/// Locale used when the client does not state one.
pub const DEFAULT_LOCALE: &str = "en";

/// The authenticated viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Email address, or the username of a local account.
    pub email: String,
    /// Email domain, or `local_user`.
    pub domain: String,
    /// Preferred locale.
    pub locale: String,
}

impl Identity {
    /// Identity of a local account.
    pub fn local_user(username: impl Into<String>) -> Self {
        Self {
            email: username.into(),
            domain: LOCAL_USER_DOMAIN.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }

    /// Identity of an email address. The domain is whatever follows the last `@`.
    pub fn from_email(email: impl Into<String>, locale: impl Into<String>) -> Self {
        let email = email.into();
        let domain = email
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_string())
            .unwrap_or_default();
        Self {
            email,
            domain,
            locale: locale.into(),
        }
    }
}

/// Works out the identity behind a request, if any.
pub fn identify(
    headers: &HeaderMap,
    local_users: &LocalUsers,
    trusted_header: Option<&HeaderName>,
) -> Option<Identity> {
    if let Some((username, password)) = basic_credentials(headers) {
        if local_users.verify(&username, &password) {
            return Some(Identity::local_user(username));
        }
        debug!(username = %username, "Basic credentials rejected");
    }

    let email = trusted_header
        .and_then(|name| headers.get(name))
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|email| !email.is_empty())?;

    Some(Identity::from_email(email, preferred_locale(headers)))
}

/// Decodes an `Authorization: Basic` header into a username and password.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// First language tag of `Accept-Language`, or `en`.
pub fn preferred_locale(headers: &HeaderMap) -> String {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .map(str::trim)
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .unwrap_or(DEFAULT_LOCALE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn basic(user: &str, pass: &str) -> HeaderValue {
        let token = STANDARD.encode(format!("{user}:{pass}"));
        HeaderValue::from_str(&format!("Basic {token}")).unwrap()
    }

    fn trusted() -> HeaderName {
        HeaderName::from_static("x-forwarded-email")
    }

    #[test]
    fn test_local_user_identity() {
        let users = LocalUsers::parse("ci-bot:s3cret");
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, basic("ci-bot", "s3cret"));

        let identity = identify(&headers, &users, None).unwrap();
        assert_eq!(identity, Identity::local_user("ci-bot"));
        assert_eq!(identity.domain, "local_user");
        assert_eq!(identity.locale, "en");
    }

    #[test]
    fn test_wrong_password() {
        let users = LocalUsers::parse("ci-bot:s3cret");
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, basic("ci-bot", "guess"));
        assert!(identify(&headers, &users, None).is_none());
    }

    #[test]
    fn test_trusted_header_identity() {
        let mut headers = HeaderMap::new();
        headers.insert(trusted(), HeaderValue::from_static("bob@acme.com"));
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("fr-CH, fr;q=0.9, en;q=0.8"),
        );

        let identity = identify(&headers, &LocalUsers::default(), Some(&trusted())).unwrap();
        assert_eq!(identity.email, "bob@acme.com");
        assert_eq!(identity.domain, "acme.com");
        assert_eq!(identity.locale, "fr-CH");
    }

    #[test]
    fn test_trusted_header_ignored_when_not_configured() {
        let mut headers = HeaderMap::new();
        headers.insert(trusted(), HeaderValue::from_static("bob@acme.com"));
        assert!(identify(&headers, &LocalUsers::default(), None).is_none());
    }

    #[test]
    fn test_blank_trusted_header() {
        let mut headers = HeaderMap::new();
        headers.insert(trusted(), HeaderValue::from_static("  "));
        assert!(identify(&headers, &LocalUsers::default(), Some(&trusted())).is_none());
    }

    #[test]
    fn test_rejected_basic_falls_back_to_trusted_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, basic("mallory", "x"));
        headers.insert(trusted(), HeaderValue::from_static("bob@acme.com"));
        let identity = identify(&headers, &LocalUsers::default(), Some(&trusted())).unwrap();
        assert_eq!(identity.email, "bob@acme.com");
    }

    #[test]
    fn test_basic_credentials_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, basic("svc", "a:b"));
        assert_eq!(
            basic_credentials(&headers),
            Some(("svc".to_string(), "a:b".to_string()))
        );

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(basic_credentials(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic !!!"));
        assert_eq!(basic_credentials(&headers), None);
    }

    #[test]
    fn test_preferred_locale_default() {
        assert_eq!(preferred_locale(&HeaderMap::new()), "en");

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("*"));
        assert_eq!(preferred_locale(&headers), "en");
    }

    #[test]
    fn test_email_without_domain() {
        let identity = Identity::from_email("operator", "en");
        assert_eq!(identity.domain, "");
    }
}
