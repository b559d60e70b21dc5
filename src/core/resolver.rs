//! Tour component lookup - Fetches the hotel, transport and transfer a tour points at.
//!
//! Each reference is resolved by primary key. An unset reference and a reference to a
//! record that no longer exists both resolve to `None`; the latter is logged because it
//! means a component was deleted while tours still used it.

use crate::{
    core::{
        hotel::get_hotel_by_id,
        records::{HotelRecord, TourRecord, TransferRecord, TransportRecord},
        transfer::get_transfer_by_id,
        transport::get_transport_by_id,
    },
    errors::Result,
};
use sea_orm::ConnectionTrait;
use tracing::warn;

/// Components linked from one tour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TourComponents {
    /// Linked hotel, if set and present
    pub hotel: Option<HotelRecord>,
    /// Linked transport, if set and present
    pub transport: Option<TransportRecord>,
    /// Linked transfer, if set and present
    pub transfer: Option<TransferRecord>,
}

fn note_dangling<T>(resolved: Option<T>, slot: &str, tour_id: i64, component_id: i64) -> Option<T> {
    if resolved.is_none() {
        warn!(
            "Tour {} references missing {} {}; treating it as absent",
            tour_id, slot, component_id
        );
    }
    resolved
}

/// Resolves the components of `tour`. Read-only.
pub async fn resolve_components<C>(db: &C, tour: &TourRecord) -> Result<TourComponents>
where
    C: ConnectionTrait,
{
    let mut components = TourComponents::default();

    if let Some(hotel_id) = tour.hotel_id {
        let hotel = get_hotel_by_id(db, hotel_id).await?;
        components.hotel = note_dangling(hotel, "hotel", tour.id, hotel_id);
    }
    if let Some(transport_id) = tour.transport_id {
        let transport = get_transport_by_id(db, transport_id).await?;
        components.transport = note_dangling(transport, "transport", tour.id, transport_id);
    }
    if let Some(transfer_id) = tour.transfer_id {
        let transfer = get_transfer_by_id(db, transfer_id).await?;
        components.transfer = note_dangling(transfer, "transfer", tour.id, transfer_id);
    }

    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hotel::delete_hotel;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_resolves_all_linked_components() -> Result<()> {
        let db = setup_test_db().await?;
        let hotel = create_test_hotel(&db, "H", 100).await?;
        let transport = create_test_transport(&db, 50).await?;
        let transfer = create_test_transfer(&db, 10).await?;
        let tour = create_test_tour(
            &db,
            "Full",
            Some(hotel.id),
            Some(transport.id),
            Some(transfer.id),
        )
        .await?;

        let components = resolve_components(&db, &tour).await?;
        assert_eq!(components.hotel, Some(hotel));
        assert_eq!(components.transport, Some(transport));
        assert_eq!(components.transfer, Some(transfer));
        Ok(())
    }

    #[tokio::test]
    async fn test_unset_references_resolve_to_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let tour = create_test_tour(&db, "Empty", None, None, None).await?;
        assert_eq!(
            resolve_components(&db, &tour).await?,
            TourComponents::default()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_dangling_reference_is_absent_not_error() -> Result<()> {
        let db = setup_test_db().await?;
        let hotel = create_test_hotel(&db, "Demolished", 100).await?;
        let transfer = create_test_transfer(&db, 15).await?;
        let tour = create_test_tour(&db, "Stale", Some(hotel.id), Some(999), Some(transfer.id))
            .await?;
        delete_hotel(&db, hotel.id).await?;

        let components = resolve_components(&db, &tour).await?;
        assert!(components.hotel.is_none());
        assert!(components.transport.is_none());
        assert_eq!(components.transfer, Some(transfer));
        Ok(())
    }
}
