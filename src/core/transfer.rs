//! Transfer business logic.

use crate::{
    core::{records::TransferRecord, require_non_negative, require_text},
    entities::{Transfer, transfer},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::info;

/// Fields required to register a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTransfer {
    /// Kind of transfer (e.g., "taxi")
    #[serde(rename = "type")]
    pub kind: String,
    /// Price of the transfer
    pub price: i64,
}

/// Partial transfer update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TransferUpdate {
    /// New kind
    pub kind: Option<String>,
    /// New price
    pub price: Option<i64>,
}

/// Creates a transfer after validating kind and price.
pub async fn create_transfer<C>(db: &C, new_transfer: NewTransfer) -> Result<TransferRecord>
where
    C: ConnectionTrait,
{
    let transfer = transfer::ActiveModel {
        kind: Set(require_text("Transfer type", &new_transfer.kind)?),
        price: Set(require_non_negative("Transfer price", new_transfer.price)?),
        ..Default::default()
    };
    let created = transfer.insert(db).await?;
    info!("Created transfer {} ({})", created.id, created.kind);
    Ok(created.into())
}

/// Finds a transfer by id. Returns `None` if it does not exist.
pub async fn get_transfer_by_id<C>(db: &C, transfer_id: i64) -> Result<Option<TransferRecord>>
where
    C: ConnectionTrait,
{
    let transfer = Transfer::find_by_id(transfer_id).one(db).await?;
    Ok(transfer.map(TransferRecord::from))
}

/// Lists every transfer in id order.
pub async fn list_transfers<C>(db: &C) -> Result<Vec<TransferRecord>>
where
    C: ConnectionTrait,
{
    let transfers = Transfer::find()
        .order_by_asc(transfer::Column::Id)
        .all(db)
        .await?;
    Ok(transfers.into_iter().map(TransferRecord::from).collect())
}

/// Applies a partial update to an existing transfer.
pub async fn update_transfer<C>(
    db: &C,
    transfer_id: i64,
    update: TransferUpdate,
) -> Result<TransferRecord>
where
    C: ConnectionTrait,
{
    let existing = Transfer::find_by_id(transfer_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "transfer",
            id: transfer_id,
        })?;

    let mut transfer: transfer::ActiveModel = existing.into();
    if let Some(kind) = update.kind {
        transfer.kind = Set(require_text("Transfer type", &kind)?);
    }
    if let Some(price) = update.price {
        transfer.price = Set(require_non_negative("Transfer price", price)?);
    }
    Ok(transfer.update(db).await?.into())
}

/// Deletes a transfer. Returns `false` if no transfer had that id.
pub async fn delete_transfer<C>(db: &C, transfer_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Transfer::delete_by_id(transfer_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
