//! Application settings loading from a TOML file.
//!
//! The settings file seeds the shared catalog (hotels, transports, transfers, managers)
//! and configures the authentication directories and session lifetime. It is read once
//! at process start.

use crate::core::{hotel::NewHotel, manager::NewManager, transfer::NewTransfer, transport::NewTransport};
use crate::errors::{Error, Result};
use chrono::TimeDelta;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_ENV: &str = "TOUR_DESK_CONFIG";

/// Settings file used when [`CONFIG_PATH_ENV`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const fn default_session_ttl_minutes() -> i64 {
    60
}

/// Configuration structure representing the entire settings file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Hotels to seed
    #[serde(default)]
    pub hotels: Vec<NewHotel>,
    /// Transports to seed
    #[serde(default)]
    pub transports: Vec<NewTransport>,
    /// Transfers to seed
    #[serde(default)]
    pub transfers: Vec<NewTransfer>,
    /// Managers to seed
    #[serde(default)]
    pub managers: Vec<NewManager>,
    /// Authentication settings
    #[serde(default)]
    pub auth: AuthSettings,
}

/// Authentication directories and session lifetime
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// Minutes a login session stays valid
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    /// Username/password pairs accepted by the credential challenge
    #[serde(default)]
    pub users: Vec<BasicUser>,
    /// Static bearer tokens and the usernames they stand for
    #[serde(default)]
    pub tokens: Vec<StaticToken>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_minutes: default_session_ttl_minutes(),
            users: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

/// One entry of the credential directory
#[derive(Debug, Clone, Deserialize)]
pub struct BasicUser {
    /// Login name
    pub username: String,
    /// Expected password
    pub password: String,
}

/// One entry of the static token map
#[derive(Debug, Clone, Deserialize)]
pub struct StaticToken {
    /// Opaque token presented by the caller
    pub token: String,
    /// Username the token authenticates as
    pub username: String,
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings: {e}"),
    })?;
    let ttl = settings.auth.session_ttl_minutes;
    if ttl <= 0 {
        return Err(Error::Config {
            message: format!("session_ttl_minutes must be positive, got {ttl}"),
        });
    }
    if TimeDelta::try_minutes(ttl).is_none() {
        return Err(Error::Config {
            message: format!("session_ttl_minutes is too large, got {ttl}"),
        });
    }
    Ok(settings)
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read, the TOML syntax is invalid, or a value
/// is out of range.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Loading settings from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {}: {e}", path_ref.display()),
    })?;
    parse_settings(&contents)
}

/// Loads settings from `TOUR_DESK_CONFIG` or `./config.toml`.
///
/// A missing file is not an error: the backend then starts with an empty catalog and
/// empty authentication directories.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        warn!("Settings file {} not found, using defaults", path);
        return Ok(Settings::default());
    }
    load_settings(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_settings() {
        let toml_str = r#"
            [[hotels]]
            name = "Grand Budapest"
            location = "Zubrowka"
            rating = 5
            price = 400
            description = "Pink and famous"

            [[transports]]
            type = "flight"
            company = "Lufthansa"
            price = 250
            from_location = "Berlin"
            to_location = "Budapest"

            [[transfers]]
            type = "taxi"
            price = 30

            [[managers]]
            name = "Gustave"
            email = "gustave@example.com"

            [auth]
            session_ttl_minutes = 15

            [[auth.users]]
            username = "admin"
            password = "admin"

            [[auth.tokens]]
            token = "abc123"
            username = "admin"
        "#;

        let settings = parse_settings(toml_str).unwrap();
        assert_eq!(settings.hotels.len(), 1);
        assert_eq!(settings.hotels[0].price, 400);
        assert_eq!(settings.transports[0].kind, "flight");
        assert_eq!(settings.transports[0].to_date, None);
        assert_eq!(settings.transfers[0].kind, "taxi");
        assert_eq!(settings.managers[0].surname, None);
        assert_eq!(settings.auth.session_ttl_minutes, 15);
        assert_eq!(settings.auth.users[0].username, "admin");
        assert_eq!(settings.auth.tokens[0].token, "abc123");
    }

    #[test]
    fn test_empty_settings_use_defaults() {
        let settings = parse_settings("").unwrap();
        assert!(settings.hotels.is_empty());
        assert!(settings.auth.users.is_empty());
        assert_eq!(settings.auth.session_ttl_minutes, 60);
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        let result = parse_settings("[auth]\nsession_ttl_minutes = 0\n");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_oversized_ttl_rejected() {
        let result = parse_settings("[auth]\nsession_ttl_minutes = 9223372036854775807\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_settings("[auth]\nsession_ttl_minutes = 153722867280912930\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let settings = parse_settings("[auth]\nsession_ttl_minutes = 525600\n").unwrap();
        assert_eq!(settings.auth.session_ttl_minutes, 525_600);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = load_settings("does/not/exist.toml");
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
