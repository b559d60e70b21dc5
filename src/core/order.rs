//! Order placement - Turns a customer's tour selection into a persisted order.
//!
//! When the caller's component selection differs from the stored tour, or the caller marks
//! the request as modified, a new tour variant is forked instead of editing the original.
//! The optional fork and the order are written in a single unit of work.
//!
//! Two concurrent orders against the same tour are not serialized: both may fork, leaving
//! two variants. Neither touches the original tour, so no data is lost.

use crate::{
    core::{
        aggregate::{DetailedTour, detail_tour},
        customer::{CustomerProfile, get_customer_by_id},
        manager::get_manager_by_id,
        records::{ManagerRecord, OrderRecord, PaymentStatus, TourRecord},
        tour::{NewTour, create_tour, get_tour_by_id},
    },
    entities::{Order, order},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseTransaction, QueryOrder, Set, TransactionTrait, prelude::*,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Format of order timestamps generated when the caller supplies none.
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Component ids picked by the customer for each slot of a tour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentSelection {
    /// Selected hotel
    pub hotel_id: Option<i64>,
    /// Selected transport
    pub transport_id: Option<i64>,
    /// Selected transfer
    pub transfer_id: Option<i64>,
}

impl ComponentSelection {
    /// The selection currently stored on `tour`.
    #[must_use]
    pub const fn of(tour: &TourRecord) -> Self {
        Self {
            hotel_id: tour.hotel_id,
            transport_id: tour.transport_id,
            transfer_id: tour.transfer_id,
        }
    }

    /// True if any slot differs from the one stored on `tour`.
    #[must_use]
    pub fn differs_from(&self, tour: &TourRecord) -> bool {
        *self != Self::of(tour)
    }
}

/// An order submission.
#[derive(Debug, Clone, Default)]
pub struct OrderRequest {
    /// Tour the customer started from. Required.
    pub tour_id: Option<i64>,
    /// Ordering customer. Required.
    pub customer_id: Option<i64>,
    /// Responsible manager
    pub manager_id: Option<i64>,
    /// Components the customer ended up with
    pub selection: ComponentSelection,
    /// Set by the caller to force a new tour variant
    pub is_modified: bool,
    /// Order timestamp; defaults to now
    pub order_date: Option<String>,
    /// Initial payment state; defaults to [`PaymentStatus::Pending`]
    pub payment_status: Option<PaymentStatus>,
}

/// Whether an order reused the requested tour or forked a new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourResolution {
    /// The order references the requested tour unchanged
    Reused,
    /// A new tour was created from the caller's selection
    Forked,
}

impl TourResolution {
    /// Fork when the selection changed or the caller asked for it, reuse otherwise.
    ///
    /// The caller's flag can force a fork even when the selection matches the stored tour.
    #[must_use]
    pub const fn decide(params_changed: bool, is_modified: bool) -> Self {
        if params_changed || is_modified {
            Self::Forked
        } else {
            Self::Reused
        }
    }
}

/// Result of a successful order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    /// The stored order
    pub order: OrderRecord,
    /// How the tour was resolved
    pub resolution: TourResolution,
    /// The tour the order references, as priced at ordering time
    pub tour: DetailedTour,
}

/// An order with everything it references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedOrder {
    /// The stored order
    pub order: OrderRecord,
    /// Ordering customer, if it still exists
    pub customer: Option<CustomerProfile>,
    /// Responsible manager, if any
    pub manager: Option<ManagerRecord>,
    /// Ordered tour with its current components
    pub tour: Option<DetailedTour>,
}

fn required(field: &str, value: Option<i64>) -> Result<i64> {
    value.ok_or_else(|| Error::validation(format!("{field} is required")))
}

async fn place_order(
    txn: &DatabaseTransaction,
    tour_id: i64,
    customer_id: i64,
    request: OrderRequest,
) -> Result<PlacedOrder> {
    let original = get_tour_by_id(txn, tour_id).await?.ok_or(Error::NotFound {
        entity: "tour",
        id: tour_id,
    })?;

    if get_customer_by_id(txn, customer_id).await?.is_none() {
        return Err(Error::NotFound {
            entity: "customer",
            id: customer_id,
        });
    }
    if let Some(manager_id) = request.manager_id
        && get_manager_by_id(txn, manager_id).await?.is_none()
    {
        return Err(Error::NotFound {
            entity: "manager",
            id: manager_id,
        });
    }

    let selection = request.selection;
    let resolution = TourResolution::decide(selection.differs_from(&original), request.is_modified);
    let ordered_tour = match resolution {
        TourResolution::Reused => original,
        TourResolution::Forked => {
            let variant = create_tour(
                txn,
                NewTour {
                    name: original.name.clone(),
                    description: original.description.clone(),
                    hotel_id: selection.hotel_id,
                    transport_id: selection.transport_id,
                    transfer_id: selection.transfer_id,
                },
            )
            .await?;
            debug!("Forked tour {} into {}", original.id, variant.id);
            variant
        }
    };

    let detailed = detail_tour(txn, ordered_tour).await?;
    let order_date = request
        .order_date
        .unwrap_or_else(|| Utc::now().format(ORDER_DATE_FORMAT).to_string());

    let order = order::ActiveModel {
        order_date: Set(order_date),
        customer_id: Set(Some(customer_id)),
        tour_id: Set(Some(detailed.id)),
        manager_id: Set(request.manager_id),
        total_amount: Set(detailed.total_cost),
        payment_status: Set(request.payment_status.unwrap_or(PaymentStatus::Pending)),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    Ok(PlacedOrder {
        order: order.into(),
        resolution,
        tour: detailed,
    })
}

/// Places an order for a tour, forking a new tour variant if the selection was edited.
///
/// The order's `total_amount` is the ordered tour's total cost at this moment.
///
/// # Errors
/// - [`Error::Validation`] if the tour or customer id is missing; nothing is read or written
/// - [`Error::NotFound`] if the tour, customer or manager does not exist
/// - [`Error::Persistence`] if the store fails; no tour or order is left behind
#[instrument(skip(db, request), fields(tour_id = ?request.tour_id, customer_id = ?request.customer_id))]
pub async fn compose_order(db: &DatabaseConnection, request: OrderRequest) -> Result<PlacedOrder> {
    let tour_id = required("Tour id", request.tour_id)?;
    let customer_id = required("Customer id", request.customer_id)?;

    let txn = db.begin().await?;
    match place_order(&txn, tour_id, customer_id, request).await {
        Ok(placed) => {
            txn.commit().await?;
            info!(
                "Placed order {} for tour {} ({:?}), amount {}",
                placed.order.id, placed.tour.id, placed.resolution, placed.order.total_amount
            );
            Ok(placed)
        }
        Err(e) => {
            warn!("Rolling back order for tour {}: {}", tour_id, e);
            txn.rollback().await?;
            Err(e)
        }
    }
}

/// Finds an order by id. Returns `None` if it does not exist.
pub async fn get_order_by_id<C>(db: &C, order_id: i64) -> Result<Option<OrderRecord>>
where
    C: ConnectionTrait,
{
    let order = Order::find_by_id(order_id).one(db).await?;
    Ok(order.map(OrderRecord::from))
}

/// Lists every order in id order.
pub async fn list_orders<C>(db: &C) -> Result<Vec<OrderRecord>>
where
    C: ConnectionTrait,
{
    let orders = Order::find()
        .order_by_asc(order::Column::Id)
        .all(db)
        .await?;
    Ok(orders.into_iter().map(OrderRecord::from).collect())
}

/// Lists every order with its customer, manager and tour resolved.
///
/// References that no longer resolve are left empty. `total_amount` is shown as stored,
/// even if the tour's components have been repriced since.
#[instrument(skip(db))]
pub async fn list_orders_detailed<C>(db: &C) -> Result<Vec<DetailedOrder>>
where
    C: ConnectionTrait,
{
    let orders = list_orders(db).await?;
    let mut detailed = Vec::with_capacity(orders.len());
    for order in orders {
        let customer = match order.customer_id {
            Some(id) => get_customer_by_id(db, id).await?,
            None => None,
        };
        let manager = match order.manager_id {
            Some(id) => get_manager_by_id(db, id).await?,
            None => None,
        };
        let tour = match order.tour_id {
            Some(id) => match get_tour_by_id(db, id).await? {
                Some(tour) => Some(detail_tour(db, tour).await?),
                None => None,
            },
            None => None,
        };
        detailed.push(DetailedOrder {
            order,
            customer,
            manager,
            tour,
        });
    }
    Ok(detailed)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::{
        hotel::{HotelUpdate, update_hotel},
        tour::list_tours,
    };
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    struct Catalog {
        hotel_id: i64,
        other_hotel_id: i64,
        transport_id: i64,
        transfer_id: i64,
        tour: TourRecord,
        customer_id: i64,
    }

    async fn catalog(db: &DatabaseConnection) -> Result<Catalog> {
        let hotel = create_test_hotel(db, "Seaside", 100).await?;
        let other_hotel = create_test_hotel(db, "Mountain Lodge", 300).await?;
        let transport = create_test_transport(db, 50).await?;
        let transfer = create_test_transfer(db, 20).await?;
        let tour = create_test_tour(
            db,
            "Summer",
            Some(hotel.id),
            Some(transport.id),
            Some(transfer.id),
        )
        .await?;
        let customer = create_test_customer(db, "buyer@example.com", "pw").await?;
        Ok(Catalog {
            hotel_id: hotel.id,
            other_hotel_id: other_hotel.id,
            transport_id: transport.id,
            transfer_id: transfer.id,
            tour,
            customer_id: customer.id,
        })
    }

    fn request_for(c: &Catalog, hotel_id: i64) -> OrderRequest {
        OrderRequest {
            tour_id: Some(c.tour.id),
            customer_id: Some(c.customer_id),
            selection: ComponentSelection {
                hotel_id: Some(hotel_id),
                transport_id: Some(c.transport_id),
                transfer_id: Some(c.transfer_id),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_decide_is_or_of_diff_and_flag() {
        assert_eq!(TourResolution::decide(false, false), TourResolution::Reused);
        assert_eq!(TourResolution::decide(true, false), TourResolution::Forked);
        assert_eq!(TourResolution::decide(false, true), TourResolution::Forked);
        assert_eq!(TourResolution::decide(true, true), TourResolution::Forked);
    }

    #[tokio::test]
    async fn test_unchanged_selection_reuses_tour() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;

        let placed = compose_order(&db, request_for(&c, c.hotel_id)).await?;

        assert_eq!(placed.resolution, TourResolution::Reused);
        assert_eq!(placed.order.tour_id, Some(c.tour.id));
        assert_eq!(placed.order.customer_id, Some(c.customer_id));
        assert_eq!(placed.order.total_amount, 170);
        assert_eq!(placed.order.payment_status, PaymentStatus::Pending);
        assert_eq!(list_tours(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_changed_hotel_forks_tour() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;

        let placed = compose_order(&db, request_for(&c, c.other_hotel_id)).await?;

        assert_eq!(placed.resolution, TourResolution::Forked);
        assert_ne!(placed.order.tour_id, Some(c.tour.id));
        assert_eq!(placed.order.total_amount, 370);

        let tours = list_tours(&db).await?;
        assert_eq!(tours.len(), 2);
        let fork = tours.iter().find(|t| t.id != c.tour.id).unwrap();
        assert_eq!(Some(fork.id), placed.order.tour_id);
        assert_eq!(fork.hotel_id, Some(c.other_hotel_id));
        assert_eq!(fork.name, c.tour.name);
        assert_eq!(fork.description, c.tour.description);

        // Original tour is untouched
        let original = get_tour_by_id(&db, c.tour.id).await?.unwrap();
        assert_eq!(original, c.tour);
        Ok(())
    }

    #[tokio::test]
    async fn test_modified_flag_forces_fork() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;

        let request = OrderRequest {
            is_modified: true,
            ..request_for(&c, c.hotel_id)
        };
        let placed = compose_order(&db, request).await?;

        assert_eq!(placed.resolution, TourResolution::Forked);
        assert_ne!(placed.tour.id, c.tour.id);
        assert_eq!(placed.tour.hotel_id, c.tour.hotel_id);
        assert_eq!(list_tours(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_order_insert_rolls_back_fork() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;
        db.execute_unprepared(
            "CREATE TRIGGER fail_order_insert BEFORE INSERT ON orders \
             BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
        )
        .await?;

        let result = compose_order(&db, request_for(&c, c.other_hotel_id)).await;

        assert!(matches!(result, Err(Error::Persistence { .. })));
        assert!(list_orders(&db).await?.is_empty());
        assert_eq!(list_tours(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_ids_fail_before_store_access() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let no_tour = compose_order(
            &db,
            OrderRequest {
                customer_id: Some(1),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(no_tour, Err(Error::Validation { .. })));

        let no_customer = compose_order(
            &db,
            OrderRequest {
                tour_id: Some(1),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(no_customer, Err(Error::Validation { .. })));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_tour_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let customer = create_test_customer(&db, "lost@example.com", "pw").await?;

        let result = compose_order(
            &db,
            OrderRequest {
                tour_id: Some(77),
                customer_id: Some(customer.id),
                ..Default::default()
            },
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "tour",
                id: 77
            })
        ));
        assert!(list_orders(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_customer_leaves_no_fork() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;

        let request = OrderRequest {
            customer_id: Some(999),
            ..request_for(&c, c.other_hotel_id)
        };
        let result = compose_order(&db, request).await;

        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "customer",
                ..
            })
        ));
        assert_eq!(list_tours(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_manager_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;

        let request = OrderRequest {
            manager_id: Some(55),
            ..request_for(&c, c.hotel_id)
        };
        let result = compose_order(&db, request).await;

        assert!(matches!(
            result,
            Err(Error::NotFound {
                entity: "manager",
                id: 55
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_caller_supplied_date_and_status_are_kept() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;
        let manager = create_test_manager(&db, "desk@example.com").await?;

        let request = OrderRequest {
            manager_id: Some(manager.id),
            order_date: Some("2024-05-01 10:00:00".to_string()),
            payment_status: Some(PaymentStatus::Paid),
            ..request_for(&c, c.hotel_id)
        };
        let placed = compose_order(&db, request).await?;

        let stored = get_order_by_id(&db, placed.order.id).await?.unwrap();
        assert_eq!(stored.order_date, "2024-05-01 10:00:00");
        assert_eq!(stored.payment_status, PaymentStatus::Paid);
        assert_eq!(stored.manager_id, Some(manager.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_default_order_date_is_formatted_timestamp() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;

        let placed = compose_order(&db, request_for(&c, c.hotel_id)).await?;

        assert!(
            chrono::NaiveDateTime::parse_from_str(&placed.order.order_date, ORDER_DATE_FORMAT)
                .is_ok()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_detailed_listing_keeps_stored_amount() -> Result<()> {
        let db = setup_test_db().await?;
        let c = catalog(&db).await?;
        let placed = compose_order(&db, request_for(&c, c.hotel_id)).await?;

        update_hotel(
            &db,
            c.hotel_id,
            HotelUpdate {
                price: Some(1000),
                ..Default::default()
            },
        )
        .await?;

        let orders = list_orders_detailed(&db).await?;
        assert_eq!(orders.len(), 1);
        let listed = &orders[0];
        assert_eq!(listed.order.id, placed.order.id);
        assert_eq!(listed.order.total_amount, 170);
        assert_eq!(listed.tour.as_ref().unwrap().total_cost, 1070);
        assert_eq!(
            listed.customer.as_ref().unwrap().email,
            "buyer@example.com"
        );
        assert!(listed.manager.is_none());
        Ok(())
    }
}
