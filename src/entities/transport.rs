//! Transport entity - The travel leg of a tour (flight, train, bus).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transport database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transports")]
pub struct Model {
    /// Unique identifier for the transport
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Kind of transport (e.g., "flight", "train")
    #[sea_orm(column_name = "type")]
    pub kind: String,
    /// Carrier operating the transport
    pub company: String,
    /// Ticket price in whole currency units
    pub price: i64,
    /// Departure location
    pub from_location: Option<String>,
    /// Arrival location
    pub to_location: Option<String>,
    /// Departure date as entered by staff
    pub from_date: Option<String>,
    /// Return or arrival date as entered by staff
    pub to_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
