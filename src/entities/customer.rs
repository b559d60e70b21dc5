//! Customer entity - The identity anchor for orders.
//!
//! The password column holds the value exactly as registered. It is compared verbatim
//! at login, which is a known security defect kept for behavioral parity; a production
//! deployment must store a salted hash instead.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Unique identifier for the customer
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: Option<String>,
    /// Loyalty or account status (e.g., "regular", "vip")
    pub status: Option<String>,
    /// Login identifier
    #[sea_orm(unique)]
    pub email: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Stored password (plaintext, see module docs)
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
