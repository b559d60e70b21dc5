//! Transport business logic - The travel legs staff attach to tours.

use crate::{
    core::{records::TransportRecord, require_non_negative, require_text},
    entities::{Transport, transport},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields required to register a transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTransport {
    /// Kind of transport (e.g., "flight")
    #[serde(rename = "type")]
    pub kind: String,
    /// Operating company
    pub company: String,
    /// Ticket price
    pub price: i64,
    /// Departure location
    #[serde(default)]
    pub from_location: Option<String>,
    /// Arrival location
    #[serde(default)]
    pub to_location: Option<String>,
    /// Departure date
    #[serde(default)]
    pub from_date: Option<String>,
    /// Return or arrival date
    #[serde(default)]
    pub to_date: Option<String>,
}

/// Partial transport update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransportUpdate {
    /// New kind
    pub kind: Option<String>,
    /// New company
    pub company: Option<String>,
    /// New price
    pub price: Option<i64>,
    /// New departure location; `Some(None)` clears it
    pub from_location: Option<Option<String>>,
    /// New arrival location; `Some(None)` clears it
    pub to_location: Option<Option<String>>,
    /// New departure date; `Some(None)` clears it
    pub from_date: Option<Option<String>>,
    /// New arrival date; `Some(None)` clears it
    pub to_date: Option<Option<String>>,
}

/// Creates a transport after validating kind, company and price.
#[instrument(skip(db, new_transport), fields(company = %new_transport.company))]
pub async fn create_transport<C>(db: &C, new_transport: NewTransport) -> Result<TransportRecord>
where
    C: ConnectionTrait,
{
    let transport = transport::ActiveModel {
        kind: Set(require_text("Transport type", &new_transport.kind)?),
        company: Set(require_text("Transport company", &new_transport.company)?),
        price: Set(require_non_negative("Transport price", new_transport.price)?),
        from_location: Set(new_transport.from_location),
        to_location: Set(new_transport.to_location),
        from_date: Set(new_transport.from_date),
        to_date: Set(new_transport.to_date),
        ..Default::default()
    };
    let created = transport.insert(db).await?;
    info!(
        "Created transport {} ({} {})",
        created.id, created.company, created.kind
    );
    Ok(created.into())
}

/// Finds a transport by id. Returns `None` if it does not exist.
pub async fn get_transport_by_id<C>(db: &C, transport_id: i64) -> Result<Option<TransportRecord>>
where
    C: ConnectionTrait,
{
    let transport = Transport::find_by_id(transport_id).one(db).await?;
    Ok(transport.map(TransportRecord::from))
}

/// Lists every transport in id order.
pub async fn list_transports<C>(db: &C) -> Result<Vec<TransportRecord>>
where
    C: ConnectionTrait,
{
    let transports = Transport::find()
        .order_by_asc(transport::Column::Id)
        .all(db)
        .await?;
    Ok(transports.into_iter().map(TransportRecord::from).collect())
}

/// Applies a partial update to an existing transport.
pub async fn update_transport<C>(
    db: &C,
    transport_id: i64,
    update: TransportUpdate,
) -> Result<TransportRecord>
where
    C: ConnectionTrait,
{
    let existing = Transport::find_by_id(transport_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "transport",
            id: transport_id,
        })?;

    let mut transport: transport::ActiveModel = existing.into();
    if let Some(kind) = update.kind {
        transport.kind = Set(require_text("Transport type", &kind)?);
    }
    if let Some(company) = update.company {
        transport.company = Set(require_text("Transport company", &company)?);
    }
    if let Some(price) = update.price {
        transport.price = Set(require_non_negative("Transport price", price)?);
    }
    if let Some(from_location) = update.from_location {
        transport.from_location = Set(from_location);
    }
    if let Some(to_location) = update.to_location {
        transport.to_location = Set(to_location);
    }
    if let Some(from_date) = update.from_date {
        transport.from_date = Set(from_date);
    }
    if let Some(to_date) = update.to_date {
        transport.to_date = Set(to_date);
    }
    Ok(transport.update(db).await?.into())
}

/// Deletes a transport. Returns `false` if no transport had that id.
pub async fn delete_transport<C>(db: &C, transport_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Transport::delete_by_id(transport_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
