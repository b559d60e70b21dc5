//! Catalog seeding - Loads the shared catalog from settings at startup.
//!
//! Seeding is idempotent. A record that already exists is skipped, matched on:
//! hotels by name and location, transports by company and route, transfers by type,
//! managers by email. Everything is inserted in one unit of work.

use crate::{
    config::settings::Settings,
    core::{
        hotel::{NewHotel, create_hotel},
        manager::{NewManager, create_manager, get_manager_by_email},
        transfer::{NewTransfer, create_transfer},
        transport::{NewTransport, create_transport},
    },
    entities::{Hotel, Transfer, Transport, hotel, transfer, transport},
    errors::Result,
};
use sea_orm::{ColumnTrait, ConnectionTrait, DatabaseConnection, QueryFilter, TransactionTrait, prelude::*};
use tracing::{debug, info, instrument, warn};

/// Number of records inserted by one seeding run, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Hotels inserted
    pub hotels: usize,
    /// Transports inserted
    pub transports: usize,
    /// Transfers inserted
    pub transfers: usize,
    /// Managers inserted
    pub managers: usize,
}

async fn hotel_exists<C: ConnectionTrait>(db: &C, candidate: &NewHotel) -> Result<bool> {
    let found = Hotel::find()
        .filter(hotel::Column::Name.eq(candidate.name.trim()))
        .filter(hotel::Column::Location.eq(candidate.location.trim()))
        .one(db)
        .await?;
    Ok(found.is_some())
}

async fn transport_exists<C: ConnectionTrait>(db: &C, candidate: &NewTransport) -> Result<bool> {
    let mut query = Transport::find().filter(transport::Column::Company.eq(candidate.company.trim()));
    query = match &candidate.from_location {
        Some(from) => query.filter(transport::Column::FromLocation.eq(from.as_str())),
        None => query.filter(transport::Column::FromLocation.is_null()),
    };
    query = match &candidate.to_location {
        Some(to) => query.filter(transport::Column::ToLocation.eq(to.as_str())),
        None => query.filter(transport::Column::ToLocation.is_null()),
    };
    Ok(query.one(db).await?.is_some())
}

async fn transfer_exists<C: ConnectionTrait>(db: &C, candidate: &NewTransfer) -> Result<bool> {
    let found = Transfer::find()
        .filter(transfer::Column::Kind.eq(candidate.kind.trim()))
        .one(db)
        .await?;
    Ok(found.is_some())
}

async fn manager_exists<C: ConnectionTrait>(db: &C, candidate: &NewManager) -> Result<bool> {
    Ok(get_manager_by_email(db, candidate.email.trim())
        .await?
        .is_some())
}

async fn seed_into<C: ConnectionTrait>(db: &C, settings: &Settings) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for candidate in &settings.hotels {
        if hotel_exists(db, candidate).await? {
            debug!("Hotel '{}' already present, skipping", candidate.name);
            continue;
        }
        create_hotel(db, candidate.clone()).await?;
        summary.hotels += 1;
    }
    for candidate in &settings.transports {
        if transport_exists(db, candidate).await? {
            debug!("Transport by '{}' already present, skipping", candidate.company);
            continue;
        }
        create_transport(db, candidate.clone()).await?;
        summary.transports += 1;
    }
    for candidate in &settings.transfers {
        if transfer_exists(db, candidate).await? {
            debug!("Transfer '{}' already present, skipping", candidate.kind);
            continue;
        }
        create_transfer(db, candidate.clone()).await?;
        summary.transfers += 1;
    }
    for candidate in &settings.managers {
        if manager_exists(db, candidate).await? {
            debug!("Manager '{}' already present, skipping", candidate.email);
            continue;
        }
        create_manager(db, candidate.clone()).await?;
        summary.managers += 1;
    }

    Ok(summary)
}

/// Inserts the catalog records from `settings` that are not in the store yet.
///
/// # Errors
/// Any invalid record aborts the whole run; nothing from it is kept.
#[instrument(skip(db, settings))]
pub async fn seed_catalog(db: &DatabaseConnection, settings: &Settings) -> Result<SeedSummary> {
    let txn = db.begin().await?;
    match seed_into(&txn, settings).await {
        Ok(summary) => {
            txn.commit().await?;
            info!(
                "Seeded {} hotels, {} transports, {} transfers, {} managers",
                summary.hotels, summary.transports, summary.transfers, summary.managers
            );
            Ok(summary)
        }
        Err(e) => {
            warn!("Catalog seeding failed, rolling back: {}", e);
            txn.rollback().await?;
            Err(e)
        }
    }
}
