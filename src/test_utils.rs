//! Shared test utilities for the booking backend.
//!
//! This module provides common helper functions for setting up test databases
//! and creating catalog, customer and staff records with sensible defaults.

use crate::{
    core::{
        customer::{self, CustomerProfile, NewCustomer},
        hotel::{self, NewHotel},
        manager::{self, NewManager},
        records::{HotelRecord, ManagerRecord, TourRecord, TransferRecord, TransportRecord},
        tour::{self, NewTour},
        transfer::{self, NewTransfer},
        transport::{self, NewTransport},
    },
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test hotel with the given name and price.
///
/// # Defaults
/// * `location`: "Testville"
/// * `rating`: 3
/// * `description`: None
pub async fn create_test_hotel(
    db: &DatabaseConnection,
    name: &str,
    price: i64,
) -> Result<HotelRecord> {
    hotel::create_hotel(
        db,
        NewHotel {
            name: name.to_string(),
            location: "Testville".to_string(),
            rating: 3,
            price,
            description: None,
        },
    )
    .await
}

/// Creates a test flight from Paris to Rome with the given price.
pub async fn create_test_transport(
    db: &DatabaseConnection,
    price: i64,
) -> Result<TransportRecord> {
    transport::create_transport(
        db,
        NewTransport {
            kind: "flight".to_string(),
            company: "Test Air".to_string(),
            price,
            from_location: Some("Paris".to_string()),
            to_location: Some("Rome".to_string()),
            from_date: Some("2024-07-01".to_string()),
            to_date: Some("2024-07-08".to_string()),
        },
    )
    .await
}

/// Creates a test shuttle transfer with the given price.
pub async fn create_test_transfer(
    db: &DatabaseConnection,
    price: i64,
) -> Result<TransferRecord> {
    transfer::create_transfer(
        db,
        NewTransfer {
            kind: "shuttle".to_string(),
            price,
        },
    )
    .await
}

/// Creates a test tour linking the given component ids, which are stored as-is.
pub async fn create_test_tour(
    db: &DatabaseConnection,
    name: &str,
    hotel_id: Option<i64>,
    transport_id: Option<i64>,
    transfer_id: Option<i64>,
) -> Result<TourRecord> {
    tour::create_tour(
        db,
        NewTour {
            name: name.to_string(),
            description: Some(format!("{name} package")),
            hotel_id,
            transport_id,
            transfer_id,
        },
    )
    .await
}

/// Registers a test customer.
///
/// # Defaults
/// * `name`: "Test", `surname`: "Customer"
/// * `status`: "active"
pub async fn create_test_customer(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<CustomerProfile> {
    customer::register_customer(
        db,
        NewCustomer {
            name: "Test".to_string(),
            surname: Some("Customer".to_string()),
            status: Some("active".to_string()),
            email: email.to_string(),
            phone: None,
            password: password.to_string(),
        },
    )
    .await
}

/// Creates a test manager with the given email.
pub async fn create_test_manager(
    db: &DatabaseConnection,
    email: &str,
) -> Result<ManagerRecord> {
    manager::create_manager(
        db,
        NewManager {
            name: "Test".to_string(),
            surname: Some("Manager".to_string()),
            email: email.to_string(),
            phone: None,
        },
    )
    .await
}
