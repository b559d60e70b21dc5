//! Order entity - A customer's purchase of a tour.
//!
//! `total_amount` is captured from the tour's total cost when the order is created and
//! is not recomputed if the tour changes afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment state of an order, stored as an integer column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum PaymentStatus {
    /// Awaiting payment
    #[sea_orm(num_value = 0)]
    Pending,
    /// Paid in full
    #[sea_orm(num_value = 1)]
    Paid,
}

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the order was placed, as a timestamp string
    pub order_date: String,
    /// Ordering customer
    pub customer_id: Option<i64>,
    /// Ordered tour (the original or a forked variant)
    pub tour_id: Option<i64>,
    /// Responsible manager, if assigned
    pub manager_id: Option<i64>,
    /// Tour total cost at the time of ordering
    pub total_amount: i64,
    /// Current payment state
    pub payment_status: PaymentStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
