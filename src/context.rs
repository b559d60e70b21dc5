//! Application context - The handles request handlers share.
//!
//! Built once at startup and passed by reference; nothing here is global.

use crate::{
    auth::{CredentialDirectory, SessionStore, TokenDirectory},
    config::settings::AuthSettings,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared state for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Entity store connection
    pub database: Arc<DatabaseConnection>,
    /// Cookie sessions
    pub sessions: Arc<SessionStore>,
    /// Credential challenge directory
    pub credentials: Arc<CredentialDirectory>,
    /// Static token map
    pub tokens: Arc<TokenDirectory>,
}

impl AppContext {
    /// Builds the context from a connection and the authentication settings.
    #[must_use]
    pub fn new(database: DatabaseConnection, auth: &AuthSettings) -> Self {
        Self {
            database: Arc::new(database),
            sessions: Arc::new(SessionStore::with_ttl_minutes(auth.session_ttl_minutes)),
            credentials: Arc::new(CredentialDirectory::from_users(&auth.users)),
            tokens: Arc::new(TokenDirectory::from_tokens(&auth.tokens)),
        }
    }
}
