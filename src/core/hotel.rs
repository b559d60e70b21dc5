//! Hotel business logic - Creating, retrieving, updating, and removing hotels.
//!
//! All functions are generic over [`ConnectionTrait`], so they run either directly against
//! the connection or inside a caller-supplied unit of work.

use crate::{
    core::{records::HotelRecord, require_non_negative, require_text},
    entities::{Hotel, hotel},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields required to register a hotel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewHotel {
    /// Display name
    pub name: String,
    /// City or address
    pub location: String,
    /// Star rating, 0 to 5
    pub rating: i32,
    /// Price of the stay
    pub price: i64,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial hotel update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct HotelUpdate {
    /// New name
    pub name: Option<String>,
    /// New location
    pub location: Option<String>,
    /// New rating
    pub rating: Option<i32>,
    /// New price
    pub price: Option<i64>,
    /// New description; `Some(None)` clears it
    pub description: Option<Option<String>>,
}

fn require_rating(rating: i32) -> Result<i32> {
    if (0..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(Error::validation(format!(
            "Hotel rating must be between 0 and 5, got {rating}"
        )))
    }
}

/// Creates a hotel after validating name, location, rating and price.
#[instrument(skip(db, new_hotel), fields(name = %new_hotel.name))]
pub async fn create_hotel<C>(db: &C, new_hotel: NewHotel) -> Result<HotelRecord>
where
    C: ConnectionTrait,
{
    let hotel = hotel::ActiveModel {
        name: Set(require_text("Hotel name", &new_hotel.name)?),
        location: Set(require_text("Hotel location", &new_hotel.location)?),
        rating: Set(require_rating(new_hotel.rating)?),
        price: Set(require_non_negative("Hotel price", new_hotel.price)?),
        description: Set(new_hotel.description),
        ..Default::default()
    };
    let created = hotel.insert(db).await?;
    info!("Created hotel {} ({})", created.id, created.name);
    Ok(created.into())
}

/// Finds a hotel by id. Returns `None` if it does not exist.
pub async fn get_hotel_by_id<C>(db: &C, hotel_id: i64) -> Result<Option<HotelRecord>>
where
    C: ConnectionTrait,
{
    let hotel = Hotel::find_by_id(hotel_id).one(db).await?;
    Ok(hotel.map(HotelRecord::from))
}

/// Lists every hotel in id order.
pub async fn list_hotels<C>(db: &C) -> Result<Vec<HotelRecord>>
where
    C: ConnectionTrait,
{
    let hotels = Hotel::find()
        .order_by_asc(hotel::Column::Id)
        .all(db)
        .await?;
    Ok(hotels.into_iter().map(HotelRecord::from).collect())
}

/// Applies a partial update to an existing hotel.
#[instrument(skip(db, update))]
pub async fn update_hotel<C>(db: &C, hotel_id: i64, update: HotelUpdate) -> Result<HotelRecord>
where
    C: ConnectionTrait,
{
    let existing = Hotel::find_by_id(hotel_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "hotel",
            id: hotel_id,
        })?;

    let mut hotel: hotel::ActiveModel = existing.into();
    if let Some(name) = update.name {
        hotel.name = Set(require_text("Hotel name", &name)?);
    }
    if let Some(location) = update.location {
        hotel.location = Set(require_text("Hotel location", &location)?);
    }
    if let Some(rating) = update.rating {
        hotel.rating = Set(require_rating(rating)?);
    }
    if let Some(price) = update.price {
        hotel.price = Set(require_non_negative("Hotel price", price)?);
    }
    if let Some(description) = update.description {
        hotel.description = Set(description);
    }
    Ok(hotel.update(db).await?.into())
}

/// Deletes a hotel. Returns `false` if no hotel had that id.
///
/// Tours that referenced the hotel keep the dangling id and aggregate it as absent.
pub async fn delete_hotel<C>(db: &C, hotel_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Hotel::delete_by_id(hotel_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
