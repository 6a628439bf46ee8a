//! Diesel-backed record store.

use chrono::{DateTime, Utc};
use diesel::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use uuid::Uuid;

use super::{
    LoginLog, NewUser, ShipmentFields, ShipmentRecord, ShipmentStore, UserRecord, UserStore,
};
use crate::auth::Role;
use crate::prelude::*;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Clone)]
pub struct DbConnection {
    pub pool: Pool<ConnectionManager<PgConnection>>,
}

impl DbConnection {
    pub fn new(database_url: &str) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .build(manager)
            .expect("Failed to create database pool");
        Self { pool }
    }

    pub fn run_migrations(&self) -> Result<()> {
        let conn = &mut self.pool.get()?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|err| Error::Generic(format!("Migrations failed: {err}")))?;
        Ok(())
    }
}

pub struct PgStore {
    db: DbConnection,
}

impl PgStore {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
struct NewUserRow<'a> {
    id: Uuid,
    name: &'a str,
    email: &'a str,
    password_hash: &'a str,
    role: &'a str,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            role: Role::from(row.role.as_str()),
            created_at: row.created_at,
        }
    }
}

impl UserStore for PgStore {
    fn find_by_email(&self, target: &str) -> Result<Option<UserRecord>> {
        use crate::schema::users::dsl::*;
        let conn = &mut self.db.pool.get()?;
        let row = users
            .filter(email.eq(target))
            .select(UserRow::as_select())
            .first(conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn find_by_id(&self, target_id: Uuid) -> Result<Option<UserRecord>> {
        use crate::schema::users::dsl::*;
        let conn = &mut self.db.pool.get()?;
        let row = users
            .find(target_id)
            .select(UserRow::as_select())
            .first(conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn insert(&self, user: NewUser) -> Result<UserRecord> {
        use crate::schema::users::dsl::*;
        let conn = &mut self.db.pool.get()?;

        let taken: i64 = users
            .filter(email.eq(&user.email))
            .count()
            .get_result(conn)?;
        if taken > 0 {
            return Err(Error::EmailTaken);
        }

        let row = NewUserRow {
            id: Uuid::new_v4(),
            name: &user.name,
            email: &user.email,
            password_hash: &user.password_hash,
            role: user.role.as_str(),
            created_at: Utc::now(),
        };
        let inserted: UserRow = diesel::insert_into(users)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(conn)?;
        Ok(inserted.into())
    }

    fn all(&self) -> Result<Vec<UserRecord>> {
        use crate::schema::users::dsl::*;
        let conn = &mut self.db.pool.get()?;
        let rows: Vec<UserRow> = users
            .order(created_at.asc())
            .select(UserRow::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn update(&self, target_id: Uuid, new_name: &str, new_email: &str, new_role: Role) -> Result<()> {
        use crate::schema::users::dsl::*;
        let conn = &mut self.db.pool.get()?;

        let conflict: i64 = users
            .filter(email.eq(new_email))
            .filter(id.ne(target_id))
            .count()
            .get_result(conn)?;
        if conflict > 0 {
            return Err(Error::EmailTaken);
        }

        diesel::update(users.find(target_id))
            .set((
                name.eq(new_name),
                email.eq(new_email),
                role.eq(new_role.as_str()),
            ))
            .execute(conn)?;
        Ok(())
    }

    fn delete(&self, target_id: Uuid) -> Result<()> {
        use crate::schema::users::dsl::*;
        let conn = &mut self.db.pool.get()?;
        diesel::delete(users.find(target_id)).execute(conn)?;
        Ok(())
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::shipments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct ShipmentRow {
    id: Uuid,
    shipment_number: String,
    route: String,
    device: String,
    po_number: String,
    ndc_number: String,
    serial_number: String,
    goods_type: String,
    expected_delivery_date: String,
    delivery_number: String,
    batch_id: String,
    description: String,
    created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::shipments)]
struct NewShipmentRow<'a> {
    id: Uuid,
    #[diesel(embed)]
    fields: ShipmentChanges<'a>,
    created_at: DateTime<Utc>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::shipments)]
struct ShipmentChanges<'a> {
    shipment_number: &'a str,
    route: &'a str,
    device: &'a str,
    po_number: &'a str,
    ndc_number: &'a str,
    serial_number: &'a str,
    goods_type: &'a str,
    expected_delivery_date: &'a str,
    delivery_number: &'a str,
    batch_id: &'a str,
    description: &'a str,
}

impl<'a> ShipmentChanges<'a> {
    fn from_fields(fields: &'a ShipmentFields) -> Self {
        Self {
            shipment_number: &fields.shipment_number,
            route: &fields.route,
            device: &fields.device,
            po_number: &fields.po_number,
            ndc_number: &fields.ndc_number,
            serial_number: &fields.serial_number,
            goods_type: &fields.goods_type,
            expected_delivery_date: &fields.expected_delivery_date,
            delivery_number: &fields.delivery_number,
            batch_id: &fields.batch_id,
            description: &fields.description,
        }
    }
}

impl From<ShipmentRow> for ShipmentRecord {
    fn from(row: ShipmentRow) -> Self {
        Self {
            id: row.id,
            fields: ShipmentFields {
                shipment_number: row.shipment_number,
                route: row.route,
                device: row.device,
                po_number: row.po_number,
                ndc_number: row.ndc_number,
                serial_number: row.serial_number,
                goods_type: row.goods_type,
                expected_delivery_date: row.expected_delivery_date,
                delivery_number: row.delivery_number,
                batch_id: row.batch_id,
                description: row.description,
            },
            created_at: row.created_at,
        }
    }
}

impl ShipmentStore for PgStore {
    fn insert(&self, fields: ShipmentFields) -> Result<ShipmentRecord> {
        use crate::schema::shipments::dsl::*;
        let conn = &mut self.db.pool.get()?;
        let inserted: ShipmentRow = diesel::insert_into(shipments)
            .values(&NewShipmentRow {
                id: Uuid::new_v4(),
                fields: ShipmentChanges::from_fields(&fields),
                created_at: Utc::now(),
            })
            .returning(ShipmentRow::as_returning())
            .get_result(conn)?;
        Ok(inserted.into())
    }

    fn all(&self) -> Result<Vec<ShipmentRecord>> {
        use crate::schema::shipments::dsl::*;
        let conn = &mut self.db.pool.get()?;
        let rows: Vec<ShipmentRow> = shipments
            .order(created_at.asc())
            .select(ShipmentRow::as_select())
            .load(conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn find(&self, target_id: Uuid) -> Result<Option<ShipmentRecord>> {
        use crate::schema::shipments::dsl::*;
        let conn = &mut self.db.pool.get()?;
        let row = shipments
            .find(target_id)
            .select(ShipmentRow::as_select())
            .first(conn)
            .optional()?;
        Ok(row.map(Into::into))
    }

    fn update(&self, target_id: Uuid, fields: ShipmentFields) -> Result<()> {
        use crate::schema::shipments::dsl::*;
        let conn = &mut self.db.pool.get()?;
        diesel::update(shipments.find(target_id))
            .set(&ShipmentChanges::from_fields(&fields))
            .execute(conn)?;
        Ok(())
    }

    fn delete(&self, target_id: Uuid) -> Result<()> {
        use crate::schema::shipments::dsl::*;
        let conn = &mut self.db.pool.get()?;
        diesel::delete(shipments.find(target_id)).execute(conn)?;
        Ok(())
    }

    fn latest_shipment_number(&self) -> Result<Option<String>> {
        use crate::schema::shipments::dsl::*;
        let conn = &mut self.db.pool.get()?;
        Ok(shipments
            .order(shipment_number.desc())
            .select(shipment_number)
            .first::<String>(conn)
            .optional()?)
    }
}

impl LoginLog for PgStore {
    fn record(&self, target_email: &str, was_success: bool) -> Result<()> {
        use crate::schema::login_attempts::dsl::*;
        let conn = &mut self.db.pool.get()?;
        diesel::insert_into(login_attempts)
            .values((
                id.eq(Uuid::new_v4()),
                email.eq(target_email),
                login_time.eq(Utc::now()),
                success.eq(was_success),
            ))
            .execute(conn)?;
        Ok(())
    }
}
