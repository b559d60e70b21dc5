//! Tour entity - A named bundle of up to one hotel, one transport and one transfer.
//!
//! The component references are plain nullable id columns rather than declared
//! relations: a tour may point at a component that was later deleted, and such a
//! reference resolves to "absent" instead of failing. The total cost is never stored;
//! it is always derived from the currently linked components.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tour database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tours")]
pub struct Model {
    /// Unique identifier for the tour
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the tour
    pub name: String,
    /// Optional marketing description
    pub description: Option<String>,
    /// Linked hotel, None when not yet chosen
    pub hotel_id: Option<i64>,
    /// Linked transport, None when not yet chosen
    pub transport_id: Option<i64>,
    /// Linked transfer, None when not yet chosen
    pub transfer_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
