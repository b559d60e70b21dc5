//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables of the booking backend.
//! Callers outside the crate see the plain records in `core::records` instead.

pub mod customer;
pub mod hotel;
pub mod manager;
pub mod order;
pub mod tour;
pub mod transfer;
pub mod transport;

// Re-export specific types to avoid conflicts
pub use customer::Entity as Customer;
pub use hotel::Entity as Hotel;
pub use manager::Entity as Manager;
pub use order::{Entity as Order, PaymentStatus};
pub use tour::Entity as Tour;
pub use transfer::Entity as Transfer;
pub use transport::Entity as Transport;

#[cfg(test)]
pub use self::{
    customer::Model as CustomerModel, hotel::Model as HotelModel, manager::Model as ManagerModel,
    order::Model as OrderModel, tour::Model as TourModel, transfer::Model as TransferModel,
    transport::Model as TransportModel,
};
