//! Plain records handed to the presentation layer.
//!
//! These mirror the stored rows but carry no persistence types, so callers can serialize
//! or render them directly.

use crate::entities::{hotel, manager, order, tour, transfer, transport};
use serde::Serialize;

pub use crate::entities::PaymentStatus;

/// A hotel as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HotelRecord {
    /// Hotel id
    pub id: i64,
    /// Display name
    pub name: String,
    /// City or address
    pub location: String,
    /// Star rating
    pub rating: i32,
    /// Price of the stay
    pub price: i64,
    /// Optional description
    pub description: Option<String>,
}

impl From<hotel::Model> for HotelRecord {
    fn from(value: hotel::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            location: value.location,
            rating: value.rating,
            price: value.price,
            description: value.description,
        }
    }
}

/// A transport as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportRecord {
    /// Transport id
    pub id: i64,
    /// Kind of transport
    #[serde(rename = "type")]
    pub kind: String,
    /// Operating company
    pub company: String,
    /// Ticket price
    pub price: i64,
    /// Departure location
    pub from_location: Option<String>,
    /// Arrival location
    pub to_location: Option<String>,
    /// Departure date
    pub from_date: Option<String>,
    /// Return or arrival date
    pub to_date: Option<String>,
}

impl From<transport::Model> for TransportRecord {
    fn from(value: transport::Model) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            company: value.company,
            price: value.price,
            from_location: value.from_location,
            to_location: value.to_location,
            from_date: value.from_date,
            to_date: value.to_date,
        }
    }
}

/// A transfer as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    /// Transfer id
    pub id: i64,
    /// Kind of transfer
    #[serde(rename = "type")]
    pub kind: String,
    /// Price
    pub price: i64,
}

impl From<transfer::Model> for TransferRecord {
    fn from(value: transfer::Model) -> Self {
        Self {
            id: value.id,
            kind: value.kind,
            price: value.price,
        }
    }
}

/// A tour as stored: its own fields and the ids of its components.
///
/// See [`crate::core::aggregate::DetailedTour`] for the tour with components resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TourRecord {
    /// Tour id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Linked hotel
    pub hotel_id: Option<i64>,
    /// Linked transport
    pub transport_id: Option<i64>,
    /// Linked transfer
    pub transfer_id: Option<i64>,
}

impl From<tour::Model> for TourRecord {
    fn from(value: tour::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            hotel_id: value.hotel_id,
            transport_id: value.transport_id,
            transfer_id: value.transfer_id,
        }
    }
}

/// A manager as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerRecord {
    /// Manager id
    pub id: i64,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: Option<String>,
    /// Work email
    pub email: String,
    /// Work phone
    pub phone: Option<String>,
}

impl From<manager::Model> for ManagerRecord {
    fn from(value: manager::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
            email: value.email,
            phone: value.phone,
        }
    }
}

/// An order as shown to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    /// Order id
    pub id: i64,
    /// When the order was placed
    pub order_date: String,
    /// Ordering customer
    pub customer_id: Option<i64>,
    /// Ordered tour
    pub tour_id: Option<i64>,
    /// Responsible manager
    pub manager_id: Option<i64>,
    /// Amount captured at ordering time
    pub total_amount: i64,
    /// Payment state
    pub payment_status: PaymentStatus,
}

impl From<order::Model> for OrderRecord {
    fn from(value: order::Model) -> Self {
        Self {
            id: value.id,
            order_date: value.order_date,
            customer_id: value.customer_id,
            tour_id: value.tour_id,
            manager_id: value.manager_id,
            total_amount: value.total_amount,
            payment_status: value.payment_status,
        }
    }
}
