//! Detailed tour views - Resolves a tour's components and derives its total cost.
//!
//! Both the single-tour and the bulk form go through [`detail_tour`], so the two can never
//! disagree on which fields are present or how the cost is computed.

use crate::{
    core::{
        records::{HotelRecord, TourRecord, TransferRecord, TransportRecord},
        resolver::{TourComponents, resolve_components},
        tour::{get_tour_by_id, list_tours},
    },
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::{debug, instrument};

/// A tour together with its resolved components and derived total cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedTour {
    /// Tour id
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Stored hotel reference (may dangle)
    pub hotel_id: Option<i64>,
    /// Stored transport reference (may dangle)
    pub transport_id: Option<i64>,
    /// Stored transfer reference (may dangle)
    pub transfer_id: Option<i64>,
    /// Resolved hotel
    pub hotel: Option<HotelRecord>,
    /// Resolved transport
    pub transport: Option<TransportRecord>,
    /// Resolved transfer
    pub transfer: Option<TransferRecord>,
    /// Sum of the resolved component prices
    pub total_cost: i64,
}

/// Sums the prices of the present components; an absent component contributes nothing.
///
/// # Errors
/// Returns [`Error::Validation`] if the sum does not fit in an `i64`.
pub fn total_cost(components: &TourComponents) -> Result<i64> {
    let prices = [
        components.hotel.as_ref().map_or(0, |h| h.price),
        components.transport.as_ref().map_or(0, |t| t.price),
        components.transfer.as_ref().map_or(0, |t| t.price),
    ];
    prices
        .into_iter()
        .try_fold(0_i64, i64::checked_add)
        .ok_or_else(|| Error::validation("Tour total cost is out of range"))
}

impl DetailedTour {
    /// Combines a stored tour with its already resolved components.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] if the total cost overflows.
    pub fn assemble(tour: TourRecord, components: TourComponents) -> Result<Self> {
        let total_cost = total_cost(&components)?;
        Ok(Self {
            id: tour.id,
            name: tour.name,
            description: tour.description,
            hotel_id: tour.hotel_id,
            transport_id: tour.transport_id,
            transfer_id: tour.transfer_id,
            hotel: components.hotel,
            transport: components.transport,
            transfer: components.transfer,
            total_cost,
        })
    }
}

/// Resolves and assembles one stored tour.
pub async fn detail_tour<C>(db: &C, tour: TourRecord) -> Result<DetailedTour>
where
    C: ConnectionTrait,
{
    let components = resolve_components(db, &tour).await?;
    DetailedTour::assemble(tour, components)
}

/// Returns the detailed view of one tour.
///
/// # Errors
/// Returns [`Error::NotFound`] if no tour has the given id.
#[instrument(skip(db))]
pub async fn get_detailed_tour<C>(db: &C, tour_id: i64) -> Result<DetailedTour>
where
    C: ConnectionTrait,
{
    let tour = get_tour_by_id(db, tour_id).await?.ok_or(Error::NotFound {
        entity: "tour",
        id: tour_id,
    })?;
    detail_tour(db, tour).await
}

/// Returns the detailed view of every tour in the store, in id order.
#[instrument(skip(db))]
pub async fn get_tours_detailed<C>(db: &C) -> Result<Vec<DetailedTour>>
where
    C: ConnectionTrait,
{
    let tours = list_tours(db).await?;
    let mut detailed = Vec::with_capacity(tours.len());
    for tour in tours {
        detailed.push(detail_tour(db, tour).await?);
    }
    debug!("Aggregated {} tours", detailed.len());
    Ok(detailed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{hotel::update_hotel, hotel::HotelUpdate};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_total_cost_skips_absent_components() -> Result<()> {
        let db = setup_test_db().await?;
        let hotel = create_test_hotel(&db, "Hotel", 100).await?;
        let transport = create_test_transport(&db, 50).await?;
        let tour = create_test_tour(&db, "No transfer", Some(hotel.id), Some(transport.id), None)
            .await?;

        let detailed = get_detailed_tour(&db, tour.id).await?;
        assert_eq!(detailed.total_cost, 150);
        assert_eq!(detailed.hotel.unwrap().price, 100);
        assert_eq!(detailed.transport.unwrap().price, 50);
        assert!(detailed.transfer.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_plain_tour_costs_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let tour = create_test_tour(&db, "Plain", None, None, None).await?;

        let detailed = get_detailed_tour(&db, tour.id).await?;
        assert_eq!(detailed.total_cost, 0);
        assert!(detailed.hotel.is_none());
        assert!(detailed.transport.is_none());
        assert!(detailed.transfer.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_tour_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = get_detailed_tour(&db, 31337).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "tour",
                id: 31337
            }
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_dangling_component_contributes_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let transfer = create_test_transfer(&db, 30).await?;
        let tour = create_test_tour(&db, "Dangling", Some(404), None, Some(transfer.id)).await?;

        let detailed = get_detailed_tour(&db, tour.id).await?;
        assert_eq!(detailed.hotel_id, Some(404));
        assert!(detailed.hotel.is_none());
        assert_eq!(detailed.total_cost, 30);
        Ok(())
    }

    #[tokio::test]
    async fn test_bulk_and_single_paths_agree() -> Result<()> {
        let db = setup_test_db().await?;
        let hotel = create_test_hotel(&db, "Shared", 200).await?;
        let transfer = create_test_transfer(&db, 20).await?;
        let first = create_test_tour(&db, "First", Some(hotel.id), None, None).await?;
        let second = create_test_tour(&db, "Second", Some(hotel.id), None, Some(transfer.id))
            .await?;
        let third = create_test_tour(&db, "Third", None, None, None).await?;

        let bulk = get_tours_detailed(&db).await?;
        let single = vec![
            get_detailed_tour(&db, first.id).await?,
            get_detailed_tour(&db, second.id).await?,
            get_detailed_tour(&db, third.id).await?,
        ];
        assert_eq!(bulk, single);
        assert_eq!(
            bulk.iter().map(|t| t.total_cost).collect::<Vec<_>>(),
            vec![200, 220, 0]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_total_cost_follows_component_price_changes() -> Result<()> {
        let db = setup_test_db().await?;
        let hotel = create_test_hotel(&db, "Repriced", 100).await?;
        let tour = create_test_tour(&db, "Live", Some(hotel.id), None, None).await?;

        update_hotel(
            &db,
            hotel.id,
            HotelUpdate {
                price: Some(130),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(get_detailed_tour(&db, tour.id).await?.total_cost, 130);
        Ok(())
    }

    #[test]
    fn test_total_cost_of_no_components_is_zero() {
        assert_eq!(total_cost(&TourComponents::default()).unwrap(), 0);
    }

    fn priced_components(hotel_price: i64, transfer_price: i64) -> TourComponents {
        TourComponents {
            hotel: Some(HotelRecord {
                id: 1,
                name: "Grand".to_string(),
                location: "Anywhere".to_string(),
                rating: 5,
                price: hotel_price,
                description: None,
            }),
            transport: None,
            transfer: Some(TransferRecord {
                id: 1,
                kind: "shuttle".to_string(),
                price: transfer_price,
            }),
        }
    }

    #[test]
    fn test_total_cost_overflow_is_rejected() {
        let result = total_cost(&priced_components(i64::MAX, 1));
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert_eq!(
            total_cost(&priced_components(i64::MAX - 1, 1)).unwrap(),
            i64::MAX
        );
    }

    #[tokio::test]
    async fn test_overflowing_tour_fails_instead_of_wrapping() -> Result<()> {
        let db = setup_test_db().await?;
        let hotel = create_test_hotel(&db, "Priceless", i64::MAX).await?;
        let transfer = create_test_transfer(&db, 1).await?;
        let tour = create_test_tour(&db, "Too dear", Some(hotel.id), None, Some(transfer.id))
            .await?;

        let result = get_detailed_tour(&db, tour.id).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(get_tours_detailed(&db).await.is_err());
        Ok(())
    }
}
