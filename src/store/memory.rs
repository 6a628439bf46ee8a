//! In-memory record store backing the tests.

use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::{
    LoginAttempt, LoginLog, NewUser, ShipmentFields, ShipmentRecord, ShipmentStore, UserRecord,
    UserStore,
};
use crate::auth::Role;
use crate::prelude::*;

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<UserRecord>>,
    shipments: RwLock<Vec<ShipmentRecord>>,
    logins: RwLock<Vec<LoginAttempt>>,
}

impl MemoryStore {
    pub fn login_attempts(&self) -> Vec<LoginAttempt> {
        self.logins.read().expect("store lock poisoned").clone()
    }
}

impl UserStore for MemoryStore {
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        let users = self.users.read().expect("store lock poisoned");
        Ok(users.iter().find(|user| user.email == email).cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>> {
        let users = self.users.read().expect("store lock poisoned");
        Ok(users.iter().find(|user| user.id == id).cloned())
    }

    fn insert(&self, user: NewUser) -> Result<UserRecord> {
        let mut users = self.users.write().expect("store lock poisoned");
        if users.iter().any(|existing| existing.email == user.email) {
            return Err(Error::EmailTaken);
        }
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        users.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<UserRecord>> {
        Ok(self.users.read().expect("store lock poisoned").clone())
    }

    fn update(&self, id: Uuid, name: &str, email: &str, role: Role) -> Result<()> {
        let mut users = self.users.write().expect("store lock poisoned");
        if users
            .iter()
            .any(|other| other.email == email && other.id != id)
        {
            return Err(Error::EmailTaken);
        }
        if let Some(user) = users.iter_mut().find(|user| user.id == id) {
            user.name = String::from(name);
            user.email = String::from(email);
            user.role = role;
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut users = self.users.write().expect("store lock poisoned");
        users.retain(|user| user.id != id);
        Ok(())
    }
}

impl ShipmentStore for MemoryStore {
    fn insert(&self, fields: ShipmentFields) -> Result<ShipmentRecord> {
        let mut shipments = self.shipments.write().expect("store lock poisoned");
        let record = ShipmentRecord {
            id: Uuid::new_v4(),
            fields,
            created_at: Utc::now(),
        };
        shipments.push(record.clone());
        Ok(record)
    }

    fn all(&self) -> Result<Vec<ShipmentRecord>> {
        Ok(self.shipments.read().expect("store lock poisoned").clone())
    }

    fn find(&self, id: Uuid) -> Result<Option<ShipmentRecord>> {
        let shipments = self.shipments.read().expect("store lock poisoned");
        Ok(shipments.iter().find(|shipment| shipment.id == id).cloned())
    }

    fn update(&self, id: Uuid, fields: ShipmentFields) -> Result<()> {
        let mut shipments = self.shipments.write().expect("store lock poisoned");
        if let Some(shipment) = shipments.iter_mut().find(|shipment| shipment.id == id) {
            shipment.fields = fields;
        }
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<()> {
        let mut shipments = self.shipments.write().expect("store lock poisoned");
        shipments.retain(|shipment| shipment.id != id);
        Ok(())
    }

    fn latest_shipment_number(&self) -> Result<Option<String>> {
        let shipments = self.shipments.read().expect("store lock poisoned");
        Ok(shipments
            .iter()
            .map(|shipment| shipment.fields.shipment_number.clone())
            .max())
    }
}

impl LoginLog for MemoryStore {
    fn record(&self, email: &str, success: bool) -> Result<()> {
        let mut logins = self.logins.write().expect("store lock poisoned");
        logins.push(LoginAttempt {
            email: String::from(email),
            login_time: Utc::now(),
            success,
        });
        Ok(())
    }
}
