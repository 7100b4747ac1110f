//! Local accounts configured through `LOCAL_USERS`.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tracing::warn;

/// A username and password pair.
pub struct LocalUser {
    username: String,
    password: SecretString,
}

impl LocalUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    fn password_matches(&self, candidate: &str) -> bool {
        let expected = self.password.expose_secret().as_bytes();
        let candidate = candidate.as_bytes();
        expected.len() == candidate.len() && bool::from(expected.ct_eq(candidate))
    }
}

impl fmt::Debug for LocalUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalUser")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// The set of local accounts.
///
/// Parsed from `username:password` entries separated by commas. Empty
/// entries are skipped. The password is everything after the first `:`, so
/// it may itself contain colons.
#[derive(Clone, Default)]
pub struct LocalUsers {
    users: Arc<[LocalUser]>,
}

impl LocalUsers {
    /// Parses a `LOCAL_USERS` value. Entries without a `:` are dropped with a warning.
    pub fn parse(raw: &str) -> Self {
        let users: Vec<LocalUser> = raw
            .split(',')
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match entry.split_once(':') {
                Some((username, password)) => Some(LocalUser::new(username, password)),
                None => {
                    warn!(entry_len = entry.len(), "Ignoring LOCAL_USERS entry without ':'");
                    None
                }
            })
            .collect();
        Self {
            users: users.into(),
        }
    }

    /// Value parser used by the command line definition.
    pub fn parse_arg(raw: &str) -> Result<Self, String> {
        Ok(Self::parse(raw))
    }

    /// Checks a username and password.
    ///
    /// The password comparison runs in constant time for equal-length inputs.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .iter()
            .filter(|user| user.username == username)
            .any(|user| user.password_matches(password))
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(LocalUser::username)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<LocalUser> for LocalUsers {
    fn from_iter<I: IntoIterator<Item = LocalUser>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().collect(),
        }
    }
}

impl fmt::Debug for LocalUsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.usernames()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        let users = LocalUsers::parse("alice:wonderland");
        assert_eq!(users.len(), 1);
        assert!(users.verify("alice", "wonderland"));
        assert!(!users.verify("alice", "wonderlan"));
        assert!(!users.verify("bob", "wonderland"));
    }

    #[test]
    fn test_parse_multiple() {
        let users = LocalUsers::parse("alice:one,bob:two");
        assert_eq!(users.usernames().collect::<Vec<_>>(), vec!["alice", "bob"]);
        assert!(users.verify("bob", "two"));
        assert!(!users.verify("bob", "one"));
    }

    #[test]
    fn test_parse_extraneous_commas() {
        let users = LocalUsers::parse(",alice:one,,bob:two,");
        assert_eq!(users.len(), 2);
    }

    #[test]
    fn test_parse_empty() {
        assert!(LocalUsers::parse("").is_empty());
        assert!(LocalUsers::default().is_empty());
    }

    #[test]
    fn test_password_may_contain_colons() {
        let users = LocalUsers::parse("svc:a:b:c");
        assert!(users.verify("svc", "a:b:c"));
    }

    #[test]
    fn test_entry_without_separator_is_skipped() {
        let users = LocalUsers::parse("alice,bob:two");
        assert_eq!(users.usernames().collect::<Vec<_>>(), vec!["bob"]);
    }

    #[test]
    fn test_empty_password() {
        let users = LocalUsers::parse("guest:");
        assert!(users.verify("guest", ""));
        assert!(!users.verify("guest", "x"));
    }

    #[test]
    fn test_debug_hides_passwords() {
        let users = LocalUsers::parse("alice:topsecret");
        let debug = format!("{users:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("topsecret"));
    }

    #[test]
    fn test_from_iterator() {
        let users: LocalUsers = [LocalUser::new("ci", "token")].into_iter().collect();
        assert!(users.verify("ci", "token"));
    }
}
