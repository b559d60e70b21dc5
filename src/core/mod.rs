//! Core business logic - framework-agnostic catalog, tour, order and customer operations.
//!
//! Functions here take a database connection (or a transaction, for those generic over
//! [`sea_orm::ConnectionTrait`]) and return plain records that a presentation layer can
//! render without knowing about the store.

use crate::errors::{Error, Result};

/// Detailed tours and derived total cost
pub mod aggregate;
/// Customer registration, profile updates and credential lookup
pub mod customer;
/// Hotel CRUD
pub mod hotel;
/// Manager CRUD
pub mod manager;
/// Reuse-or-fork decision and order creation
pub mod order;
/// Plain records handed to callers
pub mod records;
/// Tour component lookup
pub mod resolver;
/// Catalog seeding from settings
pub mod seed;
/// Tour CRUD and bundle composition
pub mod tour;
/// Transfer CRUD
pub mod transfer;
/// Transport CRUD
pub mod transport;

/// Trims `value` and rejects it if nothing is left.
pub(crate) fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Rejects negative prices.
pub(crate) fn require_non_negative(field: &str, value: i64) -> Result<i64> {
    if value < 0 {
        return Err(Error::validation(format!(
            "{field} cannot be negative, got {value}"
        )));
    }
    Ok(value)
}
