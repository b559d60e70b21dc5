/// Database configuration and connection management
pub mod database;

/// Settings loading from config.toml (catalog seed and authentication)
pub mod settings;
