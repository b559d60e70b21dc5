//! Tour business logic - Stored tours and bundle composition.
//!
//! A tour only stores references to its components. Staff can either point a tour at
//! existing hotels, transports and transfers, or create the transport and transfer inline
//! while composing the tour; inline components and the tour are persisted in one unit of
//! work.

use crate::{
    core::{
        records::TourRecord,
        require_text,
        transfer::{NewTransfer, create_transfer},
        transport::{NewTransport, create_transport},
    },
    entities::{Tour, tour},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// Placeholder for inline components whose descriptive fields were left blank.
const UNKNOWN: &str = "Unknown";

/// Fields of a tour that points at existing components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTour {
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

/// Partial tour update. `None` leaves the field unchanged; `Some(None)` unlinks a component.
#[derive(Debug, Clone, Default)]
pub struct TourUpdate {
    /// New name
    pub name: Option<String>,
    /// New description
    pub description: Option<Option<String>>,
    /// New hotel reference
    pub hotel_id: Option<Option<i64>>,
    /// New transport reference
    pub transport_id: Option<Option<i64>>,
    /// New transfer reference
    pub transfer_id: Option<Option<i64>>,
}

/// How a tour bundle picks one of its components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentChoice<T> {
    /// Leave the slot empty
    Empty,
    /// Reference an existing record
    Existing(i64),
    /// Create a record inline and reference it
    New(T),
}

impl<T> Default for ComponentChoice<T> {
    fn default() -> Self {
        Self::Empty
    }
}

/// A tour as composed by staff, possibly with inline transport and transfer.
#[derive(Debug, Clone, Default)]
pub struct TourDraft {
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Linked hotel
    pub hotel_id: Option<i64>,
    /// Transport selection
    pub transport: ComponentChoice<NewTransport>,
    /// Transfer selection
    pub transfer: ComponentChoice<NewTransfer>,
}

/// Creates a tour referencing the given component ids.
///
/// Component ids are not checked against the store; a reference to a missing record is
/// later resolved as absent.
#[instrument(skip(db, new_tour), fields(name = %new_tour.name))]
pub async fn create_tour<C>(db: &C, new_tour: NewTour) -> Result<TourRecord>
where
    C: ConnectionTrait,
{
    let tour = tour::ActiveModel {
        name: Set(require_text("Tour name", &new_tour.name)?),
        description: Set(new_tour.description),
        hotel_id: Set(new_tour.hotel_id),
        transport_id: Set(new_tour.transport_id),
        transfer_id: Set(new_tour.transfer_id),
        ..Default::default()
    };
    let created = tour.insert(db).await?;
    info!("Created tour {} ({})", created.id, created.name);
    Ok(created.into())
}

/// Finds the stored tour row by id. Returns `None` if it does not exist.
///
/// See [`crate::core::aggregate::get_detailed_tour`] for the tour with its components.
pub async fn get_tour_by_id<C>(db: &C, tour_id: i64) -> Result<Option<TourRecord>>
where
    C: ConnectionTrait,
{
    let tour = Tour::find_by_id(tour_id).one(db).await?;
    Ok(tour.map(TourRecord::from))
}

/// Lists every stored tour row in id order.
pub async fn list_tours<C>(db: &C) -> Result<Vec<TourRecord>>
where
    C: ConnectionTrait,
{
    let tours = Tour::find()
        .order_by_asc(tour::Column::Id)
        .all(db)
        .await?;
    Ok(tours.into_iter().map(TourRecord::from).collect())
}

/// Applies a partial update to a tour in place.
#[instrument(skip(db, update))]
pub async fn update_tour<C>(db: &C, tour_id: i64, update: TourUpdate) -> Result<TourRecord>
where
    C: ConnectionTrait,
{
    let existing = Tour::find_by_id(tour_id).one(db).await?.ok_or(Error::NotFound {
        entity: "tour",
        id: tour_id,
    })?;

    let mut tour: tour::ActiveModel = existing.into();
    if let Some(name) = update.name {
        tour.name = Set(require_text("Tour name", &name)?);
    }
    if let Some(description) = update.description {
        tour.description = Set(description);
    }
    if let Some(hotel_id) = update.hotel_id {
        tour.hotel_id = Set(hotel_id);
    }
    if let Some(transport_id) = update.transport_id {
        tour.transport_id = Set(transport_id);
    }
    if let Some(transfer_id) = update.transfer_id {
        tour.transfer_id = Set(transfer_id);
    }
    let updated = tour.update(db).await?;
    info!("Updated tour {}", updated.id);
    Ok(updated.into())
}

/// Deletes a tour. Returns `false` if no tour had that id.
pub async fn delete_tour<C>(db: &C, tour_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Tour::delete_by_id(tour_id).exec(db).await?;
    if result.rows_affected == 0 {
        warn!("No tour {} to delete", tour_id);
    }
    Ok(result.rows_affected > 0)
}

fn or_unknown(value: String) -> String {
    if value.trim().is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}

async fn resolve_transport(
    txn: &DatabaseTransaction,
    choice: ComponentChoice<NewTransport>,
) -> Result<Option<i64>> {
    match choice {
        ComponentChoice::Empty => Ok(None),
        ComponentChoice::Existing(id) => Ok(Some(id)),
        ComponentChoice::New(transport) => {
            let transport = NewTransport {
                kind: or_unknown(transport.kind),
                company: or_unknown(transport.company),
                ..transport
            };
            Ok(Some(create_transport(txn, transport).await?.id))
        }
    }
}

async fn resolve_transfer(
    txn: &DatabaseTransaction,
    choice: ComponentChoice<NewTransfer>,
) -> Result<Option<i64>> {
    match choice {
        ComponentChoice::Empty => Ok(None),
        ComponentChoice::Existing(id) => Ok(Some(id)),
        ComponentChoice::New(transfer) => {
            let transfer = NewTransfer {
                kind: or_unknown(transfer.kind),
                ..transfer
            };
            Ok(Some(create_transfer(txn, transfer).await?.id))
        }
    }
}

async fn store_draft(
    txn: &DatabaseTransaction,
    tour_id: Option<i64>,
    draft: TourDraft,
) -> Result<TourRecord> {
    let transfer_id = resolve_transfer(txn, draft.transfer).await?;
    let transport_id = resolve_transport(txn, draft.transport).await?;

    match tour_id {
        None => {
            create_tour(
                txn,
                NewTour {
                    name: draft.name,
                    description: draft.description,
                    hotel_id: draft.hotel_id,
                    transport_id,
                    transfer_id,
                },
            )
            .await
        }
        Some(tour_id) => {
            update_tour(
                txn,
                tour_id,
                TourUpdate {
                    name: Some(draft.name),
                    description: Some(draft.description),
                    hotel_id: Some(draft.hotel_id),
                    transport_id: Some(transport_id),
                    transfer_id: Some(transfer_id),
                },
            )
            .await
        }
    }
}

async fn commit_draft(
    db: &DatabaseConnection,
    tour_id: Option<i64>,
    draft: TourDraft,
) -> Result<TourRecord> {
    require_text("Tour name", &draft.name)?;

    let txn = db.begin().await?;
    match store_draft(&txn, tour_id, draft).await {
        Ok(tour) => {
            txn.commit().await?;
            Ok(tour)
        }
        Err(e) => {
            warn!("Rolling back tour bundle: {}", e);
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Creates a tour together with any inline transport and transfer, atomically.
pub async fn create_tour_bundle(db: &DatabaseConnection, draft: TourDraft) -> Result<TourRecord> {
    commit_draft(db, None, draft).await
}

/// Replaces a tour's fields and components in place, creating inline components as
/// needed. Either every change persists or none does.
pub async fn revise_tour_bundle(
    db: &DatabaseConnection,
    tour_id: i64,
    draft: TourDraft,
) -> Result<TourRecord> {
    commit_draft(db, Some(tour_id), draft).await
}
