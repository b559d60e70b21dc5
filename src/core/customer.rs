//! Customer business logic - Registration, profile maintenance and credential lookup.
//!
//! Lookups that find nothing return `Ok(None)` rather than an error. Credential matching
//! compares the stored password verbatim. That mirrors the legacy behavior and is a
//! security defect: new deployments must store and compare salted hashes instead.

use crate::{
    core::require_text,
    entities::{Customer, customer},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Registration form for a new customer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    /// Given name
    pub name: String,
    /// Family name
    #[serde(default)]
    pub surname: Option<String>,
    /// Account status
    #[serde(default)]
    pub status: Option<String>,
    /// Login email, unique across customers
    pub email: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Password as typed by the customer
    pub password: String,
}

/// Partial customer update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct CustomerUpdate {
    /// New given name
    pub name: Option<String>,
    /// New family name; `Some(None)` clears it
    pub surname: Option<Option<String>>,
    /// New account status; `Some(None)` clears it
    pub status: Option<Option<String>>,
    /// New login email, must stay unique
    pub email: Option<String>,
    /// New phone; `Some(None)` clears it
    pub phone: Option<Option<String>>,
    /// New password
    pub password: Option<String>,
}

/// Customer record handed to callers. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerProfile {
    /// Customer id
    pub id: i64,
    /// Given name
    pub name: String,
    /// Family name
    pub surname: Option<String>,
    /// Account status
    pub status: Option<String>,
    /// Login email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
}

impl From<customer::Model> for CustomerProfile {
    fn from(value: customer::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            surname: value.surname,
            status: value.status,
            email: value.email,
            phone: value.phone,
        }
    }
}

fn require_email(email: &str) -> Result<String> {
    let email = require_text("Customer email", email)?;
    if email.contains('@') {
        Ok(email)
    } else {
        Err(Error::validation(format!("'{email}' is not a valid email")))
    }
}

async fn find_by_email<C>(db: &C, email: &str) -> Result<Option<customer::Model>>
where
    C: ConnectionTrait,
{
    Customer::find()
        .filter(customer::Column::Email.eq(email))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a new customer.
///
/// # Errors
/// Returns [`Error::Validation`] if a required field is blank, the email is malformed, or
/// another customer already uses the email.
#[instrument(skip(db, new_customer), fields(email = %new_customer.email))]
pub async fn register_customer<C>(db: &C, new_customer: NewCustomer) -> Result<CustomerProfile>
where
    C: ConnectionTrait,
{
    let name = require_text("Customer name", &new_customer.name)?;
    let email = require_email(&new_customer.email)?;
    if new_customer.password.is_empty() {
        return Err(Error::validation("Password cannot be empty"));
    }

    if find_by_email(db, &email).await?.is_some() {
        return Err(Error::validation(format!(
            "A customer with email {email} is already registered"
        )));
    }

    let customer = customer::ActiveModel {
        name: Set(name),
        surname: Set(new_customer.surname),
        status: Set(new_customer.status),
        email: Set(email),
        phone: Set(new_customer.phone),
        password: Set(new_customer.password),
        ..Default::default()
    };
    let created = customer.insert(db).await?;
    info!("Registered customer {}", created.id);
    Ok(created.into())
}

/// Finds a customer by id. Returns `None` if it does not exist.
pub async fn get_customer_by_id<C>(db: &C, customer_id: i64) -> Result<Option<CustomerProfile>>
where
    C: ConnectionTrait,
{
    Ok(Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .map(CustomerProfile::from))
}

/// Lists every customer in id order.
pub async fn list_customers<C>(db: &C) -> Result<Vec<CustomerProfile>>
where
    C: ConnectionTrait,
{
    let customers = Customer::find()
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await?;
    Ok(customers.into_iter().map(CustomerProfile::from).collect())
}

/// Applies a partial update to an existing customer.
///
/// # Errors
/// - [`Error::NotFound`] if no customer has the id
/// - [`Error::Validation`] if a field is blank or malformed, or the new email belongs to
///   another customer
#[instrument(skip(db, update))]
pub async fn update_customer<C>(
    db: &C,
    customer_id: i64,
    update: CustomerUpdate,
) -> Result<CustomerProfile>
where
    C: ConnectionTrait,
{
    let existing = Customer::find_by_id(customer_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "customer",
            id: customer_id,
        })?;

    let mut customer: customer::ActiveModel = existing.into();
    if let Some(name) = update.name {
        customer.name = Set(require_text("Customer name", &name)?);
    }
    if let Some(surname) = update.surname {
        customer.surname = Set(surname);
    }
    if let Some(status) = update.status {
        customer.status = Set(status);
    }
    if let Some(phone) = update.phone {
        customer.phone = Set(phone);
    }
    if let Some(password) = update.password {
        if password.is_empty() {
            return Err(Error::validation("Password cannot be empty"));
        }
        customer.password = Set(password);
    }
    if let Some(email) = update.email {
        let email = require_email(&email)?;
        if let Some(holder) = find_by_email(db, &email).await?
            && holder.id != customer_id
        {
            return Err(Error::validation(format!(
                "A customer with email {email} is already registered"
            )));
        }
        customer.email = Set(email);
    }
    Ok(customer.update(db).await?.into())
}

/// Deletes a customer. Returns `false` if no customer had that id.
///
/// Orders placed by the customer keep the id and list it as absent.
pub async fn delete_customer<C>(db: &C, customer_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Customer::delete_by_id(customer_id).exec(db).await?;
    if result.rows_affected > 0 {
        info!("Deleted customer {}", customer_id);
    }
    Ok(result.rows_affected > 0)
}

/// Looks a customer up by email and password.
///
/// Returns `None` when the email is unknown or the password differs. The comparison is an
/// exact string match against the stored plaintext value.
#[instrument(skip(db, password))]
pub async fn find_customer_by_credentials<C>(
    db: &C,
    email: &str,
    password: &str,
) -> Result<Option<CustomerProfile>>
where
    C: ConnectionTrait,
{
    let Some(customer) = find_by_email(db, email).await? else {
        debug!("No customer registered under this email");
        return Ok(None);
    };
    if customer.password == password {
        Ok(Some(customer.into()))
    } else {
        debug!("Password mismatch for customer {}", customer.id);
        Ok(None)
    }
}
