//! Hotel entity - Accommodation offered as the lodging component of a tour.
//!
//! Hotels are created ahead of time by staff and shared by any number of tours.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Hotel database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hotels")]
pub struct Model {
    /// Unique identifier for the hotel
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Grand Budapest")
    pub name: String,
    /// City or address of the hotel
    pub location: String,
    /// Star rating
    pub rating: i32,
    /// Price of the stay in whole currency units
    pub price: i64,
    /// Optional free-form description
    pub description: Option<String>,
}

/// Hotels are leaf records; tours point at them through plain id columns.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
