//! Bearer token strategy - A fixed map from opaque token to username.

use crate::{
    config::settings::StaticToken,
    errors::{Error, Result},
};
use std::collections::HashMap;

/// Header carrying the static token.
pub const TOKEN_HEADER: &str = "static-auth-token";

/// Fixed token to username map.
#[derive(Debug, Clone, Default)]
pub struct TokenDirectory {
    tokens: HashMap<String, String>,
}

impl TokenDirectory {
    /// Builds the map from configured tokens.
    #[must_use]
    pub fn from_tokens(tokens: &[StaticToken]) -> Self {
        Self {
            tokens: tokens
                .iter()
                .map(|t| (t.token.clone(), t.username.clone()))
                .collect(),
        }
    }

    /// Number of known tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if no token is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the username the token stands for.
    ///
    /// # Errors
    /// Returns [`Error::AuthFailure`] if the token is not known.
    pub fn username_for(&self, token: &str) -> Result<String> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unauthorized("token unauthorized"))
    }
}
