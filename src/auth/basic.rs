//! Username/password checks against a fixed directory of configured users.

use crate::{
    config::settings::BasicUser,
    errors::{Error, Result},
};
use std::collections::HashMap;
use tracing::debug;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Compared against when the username is unknown, so both failures do the same work.
const UNKNOWN_USER_PASSWORD: &str = "7c1e0b9d4f2a86e3-unknown-user";

/// Compares two byte strings in time independent of where they first differ.
///
/// The length is not hidden: strings of different length are rejected immediately.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Fixed username/password directory used by the credential challenge.
#[derive(Debug, Clone, Default)]
pub struct CredentialDirectory {
    users: HashMap<String, String>,
}

impl CredentialDirectory {
    /// Builds the directory from configured users. A later duplicate username wins.
    #[must_use]
    pub fn from_users(users: &[BasicUser]) -> Self {
        Self {
            users: users
                .iter()
                .map(|u| (u.username.clone(), u.password.clone()))
                .collect(),
        }
    }

    /// Number of known users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True if no user is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Checks a username/password pair and returns the username on success.
    ///
    /// # Errors
    /// Returns [`Error::AuthFailure`] for an unknown user or a wrong password, with the
    /// same message in both cases.
    pub fn verify(&self, username: &str, password: &str) -> Result<String> {
        let stored = self.users.get(username);
        let expected = stored.map_or(UNKNOWN_USER_PASSWORD, String::as_str);
        let matches = constant_time_eq(password.as_bytes(), expected.as_bytes());
        if stored.is_none() || !matches {
            debug!("Credential challenge failed for {}", username);
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(username.to_string())
    }
}
