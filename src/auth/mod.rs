//! Authentication - Credential challenge, static bearer tokens and cookie sessions.
//!
//! The three strategies are independent. The credential and token directories are fixed at
//! startup from settings; the session store is mutable and shared through
//! [`crate::context::AppContext`].

use crate::{
    core::customer::find_customer_by_credentials,
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::instrument;

/// Username/password directory with constant-time comparison
pub mod basic;
/// Cookie session store with expiry
pub mod session;
/// Static token to username map
pub mod token;

pub use basic::CredentialDirectory;
pub use session::{IssuedSession, SESSION_COOKIE, SessionData, SessionStore};
pub use token::TokenDirectory;

/// Logs a customer in by email and password and opens a session keyed by their email.
///
/// # Errors
/// Returns [`Error::AuthFailure`] if no customer matches; no session is opened.
#[instrument(skip(db, sessions, password))]
pub async fn login_customer<C>(
    db: &C,
    sessions: &SessionStore,
    email: &str,
    password: &str,
) -> Result<IssuedSession>
where
    C: ConnectionTrait,
{
    let customer = find_customer_by_credentials(db, email, password)
        .await?
        .ok_or_else(|| Error::unauthorized("Invalid email or password"))?;
    Ok(sessions.open_session(&customer.email).await)
}
