//! Record store traits and the records they hold.
//!
//! The web layer only ever sees these traits; [`postgres`] backs them with
//! Diesel in production and [`memory`] backs them in tests.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::Role;
use crate::prelude::*;

pub mod memory;
pub mod postgres;

/// A stored user credential and profile.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Input for signup; the store assigns id and creation time.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// The writable fields of a shipment, as submitted from the forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentFields {
    pub shipment_number: String,
    pub route: String,
    pub device: String,
    pub po_number: String,
    pub ndc_number: String,
    pub serial_number: String,
    pub goods_type: String,
    pub expected_delivery_date: String,
    pub delivery_number: String,
    pub batch_id: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ShipmentRecord {
    pub id: Uuid,
    pub fields: ShipmentFields,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LoginAttempt {
    pub email: String,
    pub login_time: DateTime<Utc>,
    pub success: bool,
}

/// User lookup and maintenance. Email is the identity key and matches
/// case-sensitively; uniqueness is enforced here, at the application layer.
pub trait UserStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>>;
    /// Fails with [`Error::EmailTaken`] when the email is already registered.
    fn insert(&self, user: NewUser) -> Result<UserRecord>;
    fn all(&self) -> Result<Vec<UserRecord>>;
    /// Fails with [`Error::EmailTaken`] when the new email belongs to
    /// another user.
    fn update(&self, id: Uuid, name: &str, email: &str, role: Role) -> Result<()>;
    fn delete(&self, id: Uuid) -> Result<()>;
}

pub trait ShipmentStore: Send + Sync {
    fn insert(&self, fields: ShipmentFields) -> Result<ShipmentRecord>;
    fn all(&self) -> Result<Vec<ShipmentRecord>>;
    fn find(&self, id: Uuid) -> Result<Option<ShipmentRecord>>;
    fn update(&self, id: Uuid, fields: ShipmentFields) -> Result<()>;
    fn delete(&self, id: Uuid) -> Result<()>;
    /// Highest shipment number currently stored, by string order.
    fn latest_shipment_number(&self) -> Result<Option<String>>;
}

/// Append-only log of login attempts.
pub trait LoginLog: Send + Sync {
    fn record(&self, email: &str, success: bool) -> Result<()>;
}

const SHIPMENT_NUMBER_PREFIX: &str = "exfscm";

/// Suggests the next shipment number from the latest stored one.
pub fn next_shipment_number(latest: Option<&str>) -> String {
    let next = latest
        .and_then(|number| number.strip_prefix(SHIPMENT_NUMBER_PREFIX))
        .and_then(|digits| digits.parse::<u32>().ok())
        .map(|n| n + 1)
        .unwrap_or(1);
    format!("{SHIPMENT_NUMBER_PREFIX}{next:02}")
}
