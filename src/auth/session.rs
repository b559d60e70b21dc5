//! Cookie sessions issued after a successful credential check.
//!
//! Sessions live in process memory only and are lost on restart. Each one expires once
//! its lifetime has passed since login. An expired session is evicted on lookup, and
//! every new login sweeps the rest through [`SessionStore::purge_expired`].

use crate::{
    auth::basic::CredentialDirectory,
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Cookie carrying the session id.
pub const SESSION_COOKIE: &str = "web-app-session-id";

/// What the store remembers about a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    /// Who logged in
    pub username: String,
    /// When the session was opened
    pub login_at: DateTime<Utc>,
}

/// A freshly opened session, to be handed to the client as a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    /// Session id; the cookie value
    pub session_id: String,
    /// Session contents
    pub data: SessionData,
}

impl IssuedSession {
    /// Name of the cookie to set.
    #[must_use]
    pub const fn cookie_name(&self) -> &'static str {
        SESSION_COOKIE
    }
}

fn short(session_id: &str) -> &str {
    session_id.get(..8).unwrap_or(session_id)
}

/// In-memory session map with a fixed lifetime per session.
#[derive(Debug)]
pub struct SessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, SessionData>>,
}

impl SessionStore {
    /// Creates an empty store whose sessions last `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an empty store whose sessions last the given number of minutes.
    ///
    /// A lifetime too large to represent is clamped to [`Duration::MAX`].
    #[must_use]
    pub fn with_ttl_minutes(minutes: i64) -> Self {
        Self::new(Duration::try_minutes(minutes).unwrap_or(Duration::MAX))
    }

    /// Session lifetime.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of stored sessions, including expired ones not yet evicted.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True if no session is stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Opens a session for an already authenticated user.
    ///
    /// Sessions that have expired by now are evicted first, so abandoned logins do not
    /// accumulate.
    pub async fn open_session(&self, username: &str) -> IssuedSession {
        let now = Utc::now();
        self.purge_expired(now).await;

        let session_id = Uuid::new_v4().simple().to_string();
        let data = SessionData {
            username: username.to_string(),
            login_at: now,
        };
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), data.clone());
        info!("Opened session {}.. for {}", short(&session_id), username);
        IssuedSession { session_id, data }
    }

    /// Checks credentials against `directory` and opens a session on success.
    ///
    /// # Errors
    /// Returns [`Error::AuthFailure`] if the credentials are rejected; no session is opened.
    #[instrument(skip(self, directory, password))]
    pub async fn login(
        &self,
        directory: &CredentialDirectory,
        username: &str,
        password: &str,
    ) -> Result<IssuedSession> {
        let username = directory.verify(username, password)?;
        Ok(self.open_session(&username).await)
    }

    /// Resolves the session cookie presented by a request.
    ///
    /// # Errors
    /// Returns [`Error::AuthFailure`] if the cookie is missing, unknown or expired.
    pub async fn lookup(&self, session_id: Option<&str>) -> Result<SessionData> {
        let session_id = session_id.ok_or_else(|| Error::unauthorized("not authenticated"))?;
        self.lookup_at(session_id, Utc::now()).await
    }

    /// Resolves a session as of `now`, evicting it if it has expired.
    ///
    /// # Errors
    /// Returns [`Error::AuthFailure`] if the session is unknown or expired.
    pub async fn lookup_at(&self, session_id: &str, now: DateTime<Utc>) -> Result<SessionData> {
        {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                None => return Err(Error::unauthorized("not authenticated")),
                Some(data) if now - data.login_at < self.ttl => return Ok(data.clone()),
                Some(_) => {}
            }
        }

        self.sessions.write().await.remove(session_id);
        debug!("Session {}.. expired", short(session_id));
        Err(Error::unauthorized("session expired"))
    }

    /// Revokes a session. Returns `false` if it was not open.
    pub async fn logout(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id).is_some();
        if removed {
            info!("Closed session {}..", short(session_id));
        }
        removed
    }

    /// Evicts every session expired as of `now`. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, data| now - data.login_at < self.ttl);
        let purged = before - sessions.len();
        if purged > 0 {
            debug!("Purged {} expired sessions", purged);
        }
        purged
    }
}
