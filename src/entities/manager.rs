//! Manager entity - Staff member responsible for an order.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Manager database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "managers")]
pub struct Model {
    /// Unique identifier for the manager
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: Option<String>,
    /// Work email
    pub email: String,
    /// Work phone number
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
