//! Manager business logic - Staff records referenced by orders.

use crate::{
    core::{records::ManagerRecord, require_text},
    entities::{Manager, manager},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use serde::Deserialize;
use tracing::{info, instrument};

/// Fields required to register a manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewManager {
    /// Given name
    pub name: String,
    /// Family name
    #[serde(default)]
    pub surname: Option<String>,
    /// Work email
    pub email: String,
    /// Work phone
    #[serde(default)]
    pub phone: Option<String>,
}

/// Partial manager update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ManagerUpdate {
    /// New given name
    pub name: Option<String>,
    /// New family name; `Some(None)` clears it
    pub surname: Option<Option<String>>,
    /// New work email
    pub email: Option<String>,
    /// New work phone; `Some(None)` clears it
    pub phone: Option<Option<String>>,
}

/// Creates a manager after validating name and email.
pub async fn create_manager<C>(db: &C, new_manager: NewManager) -> Result<ManagerRecord>
where
    C: ConnectionTrait,
{
    let manager = manager::ActiveModel {
        name: Set(require_text("Manager name", &new_manager.name)?),
        surname: Set(new_manager.surname),
        email: Set(require_text("Manager email", &new_manager.email)?),
        phone: Set(new_manager.phone),
        ..Default::default()
    };
    let created = manager.insert(db).await?;
    info!("Created manager {} ({})", created.id, created.email);
    Ok(created.into())
}

/// Finds a manager by id. Returns `None` if it does not exist.
pub async fn get_manager_by_id<C>(db: &C, manager_id: i64) -> Result<Option<ManagerRecord>>
where
    C: ConnectionTrait,
{
    let manager = Manager::find_by_id(manager_id).one(db).await?;
    Ok(manager.map(ManagerRecord::from))
}

/// Finds a manager by email. Used to keep catalog seeding idempotent.
pub async fn get_manager_by_email<C>(db: &C, email: &str) -> Result<Option<ManagerRecord>>
where
    C: ConnectionTrait,
{
    let manager = Manager::find()
        .filter(manager::Column::Email.eq(email))
        .one(db)
        .await?;
    Ok(manager.map(ManagerRecord::from))
}

/// Lists every manager in id order.
pub async fn list_managers<C>(db: &C) -> Result<Vec<ManagerRecord>>
where
    C: ConnectionTrait,
{
    let managers = Manager::find()
        .order_by_asc(manager::Column::Id)
        .all(db)
        .await?;
    Ok(managers.into_iter().map(ManagerRecord::from).collect())
}

/// Applies a partial update to an existing manager.
#[instrument(skip(db, update))]
pub async fn update_manager<C>(
    db: &C,
    manager_id: i64,
    update: ManagerUpdate,
) -> Result<ManagerRecord>
where
    C: ConnectionTrait,
{
    let existing = Manager::find_by_id(manager_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "manager",
            id: manager_id,
        })?;

    let mut manager: manager::ActiveModel = existing.into();
    if let Some(name) = update.name {
        manager.name = Set(require_text("Manager name", &name)?);
    }
    if let Some(surname) = update.surname {
        manager.surname = Set(surname);
    }
    if let Some(email) = update.email {
        manager.email = Set(require_text("Manager email", &email)?);
    }
    if let Some(phone) = update.phone {
        manager.phone = Set(phone);
    }
    Ok(manager.update(db).await?.into())
}

/// Deletes a manager. Returns `false` if no manager had that id.
///
/// Orders that referenced the manager keep the id and list it as absent.
pub async fn delete_manager<C>(db: &C, manager_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Manager::delete_by_id(manager_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
