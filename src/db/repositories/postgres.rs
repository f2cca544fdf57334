use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{FacilityStore, StoreResult};
use crate::db::models::{
    Customer, CustomerStatus, CustomerWithAssignment, NewCustomer, StorageAssignment,
    UpdateCustomer,
};
use crate::storage::location::{Section, StorageSlot};

const CUSTOMER_COLUMNS: &str = "id, name, license_plate, summer_tire_size, winter_tire_size, \
     phone, email, status, created_at, updated_at";

const ASSIGNMENT_COLUMNS: &str = "id, customer_id, hotel, section, shelf, created_at";

const JOINED_SELECT: &str = "SELECT c.id, c.name, c.license_plate, c.summer_tire_size, \
     c.winter_tire_size, c.phone, c.email, c.status, c.created_at, c.updated_at, \
     a.id AS assignment_id, a.hotel, a.section, a.shelf, a.created_at AS assigned_at \
     FROM customers c \
     LEFT JOIN storage_assignments a ON a.customer_id = c.id";

/// Flattened customer-plus-assignment row from the LEFT JOIN. The assignment
/// columns are all-or-nothing: `assignment_id` present means the rest are too.
#[derive(sqlx::FromRow)]
struct CustomerWithAssignmentRow {
    id: Uuid,
    name: String,
    license_plate: String,
    summer_tire_size: Option<String>,
    winter_tire_size: Option<String>,
    phone: String,
    email: String,
    status: CustomerStatus,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    assignment_id: Option<Uuid>,
    hotel: Option<i16>,
    section: Option<Section>,
    shelf: Option<i16>,
    assigned_at: Option<OffsetDateTime>,
}

impl From<CustomerWithAssignmentRow> for CustomerWithAssignment {
    fn from(row: CustomerWithAssignmentRow) -> Self {
        let customer = Customer {
            id: row.id,
            name: row.name,
            license_plate: row.license_plate,
            summer_tire_size: row.summer_tire_size,
            winter_tire_size: row.winter_tire_size,
            phone: row.phone,
            email: row.email,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };
        let storage_location = match (row.assignment_id, row.hotel, row.section, row.shelf) {
            (Some(id), Some(hotel), Some(section), Some(shelf)) => Some(StorageAssignment {
                id,
                customer_id: customer.id,
                hotel,
                section,
                shelf,
                created_at: row.assigned_at.unwrap_or(customer.created_at),
            }),
            _ => None,
        };
        Self {
            customer,
            storage_location,
        }
    }
}

/// Postgres-backed [`FacilityStore`].
#[derive(Clone)]
pub struct PgFacilityStore {
    pool: PgPool,
}

impl PgFacilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityStore for PgFacilityStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_customer(&self, new: &NewCustomer) -> StoreResult<Customer> {
        let sql = format!(
            "INSERT INTO customers (name, license_plate, summer_tire_size, winter_tire_size, \
             phone, email, status) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {CUSTOMER_COLUMNS}"
        );
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(&new.name)
            .bind(&new.license_plate)
            .bind(&new.summer_tire_size)
            .bind(&new.winter_tire_size)
            .bind(&new.phone)
            .bind(&new.email)
            .bind(new.status.unwrap_or(CustomerStatus::Active))
            .fetch_one(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn customer_by_id(&self, id: Uuid) -> StoreResult<Option<CustomerWithAssignment>> {
        let sql = format!("{JOINED_SELECT} WHERE c.id = $1");
        let row = sqlx::query_as::<_, CustomerWithAssignmentRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn update_customer(&self, id: Uuid, update: &UpdateCustomer) -> StoreResult<Customer> {
        let sql = format!(
            "UPDATE customers SET \
                name = COALESCE($1, name), \
                license_plate = COALESCE($2, license_plate), \
                summer_tire_size = COALESCE($3, summer_tire_size), \
                winter_tire_size = COALESCE($4, winter_tire_size), \
                phone = COALESCE($5, phone), \
                email = COALESCE($6, email), \
                status = COALESCE($7, status), \
                updated_at = NOW() \
             WHERE id = $8 \
             RETURNING {CUSTOMER_COLUMNS}"
        );
        let customer = sqlx::query_as::<_, Customer>(&sql)
            .bind(&update.name)
            .bind(&update.license_plate)
            .bind(&update.summer_tire_size)
            .bind(&update.winter_tire_size)
            .bind(&update.phone)
            .bind(&update.email)
            .bind(update.status)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn find_matching_identity(&self, new: &NewCustomer) -> StoreResult<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers \
             WHERE name = $1 OR license_plate = $2 OR phone = $3 OR email = $4"
        );
        let matches = sqlx::query_as::<_, Customer>(&sql)
            .bind(&new.name)
            .bind(&new.license_plate)
            .bind(&new.phone)
            .bind(&new.email)
            .fetch_all(&self.pool)
            .await?;
        Ok(matches)
    }

    async fn search_customers(
        &self,
        query: &str,
        limit: i64,
    ) -> StoreResult<Vec<CustomerWithAssignment>> {
        let sql = format!(
            "{JOINED_SELECT} \
             WHERE c.name ILIKE '%' || $1 || '%' OR c.license_plate ILIKE '%' || $1 || '%' \
             ORDER BY c.created_at DESC LIMIT $2"
        );
        let rows = sqlx::query_as::<_, CustomerWithAssignmentRow>(&sql)
            .bind(query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn customers_with_assignments(&self) -> StoreResult<Vec<CustomerWithAssignment>> {
        let sql = format!("{JOINED_SELECT} ORDER BY c.created_at DESC");
        let rows = sqlx::query_as::<_, CustomerWithAssignmentRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn assignment_for_customer(
        &self,
        customer_id: Uuid,
    ) -> StoreResult<Option<StorageAssignment>> {
        let sql =
            format!("SELECT {ASSIGNMENT_COLUMNS} FROM storage_assignments WHERE customer_id = $1");
        let assignment = sqlx::query_as::<_, StorageAssignment>(&sql)
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(assignment)
    }

    async fn insert_assignment(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> StoreResult<StorageAssignment> {
        let sql = format!(
            "INSERT INTO storage_assignments (customer_id, hotel, section, shelf) \
             VALUES ($1, $2, $3, $4) RETURNING {ASSIGNMENT_COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, StorageAssignment>(&sql)
            .bind(customer_id)
            .bind(slot.hotel as i16)
            .bind(slot.section)
            .bind(slot.shelf as i16)
            .fetch_one(&self.pool)
            .await?;
        Ok(assignment)
    }

    async fn move_assignment(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> StoreResult<StorageAssignment> {
        let sql = format!(
            "UPDATE storage_assignments SET hotel = $2, section = $3, shelf = $4 \
             WHERE customer_id = $1 RETURNING {ASSIGNMENT_COLUMNS}"
        );
        let assignment = sqlx::query_as::<_, StorageAssignment>(&sql)
            .bind(customer_id)
            .bind(slot.hotel as i16)
            .bind(slot.section)
            .bind(slot.shelf as i16)
            .fetch_one(&self.pool)
            .await?;
        Ok(assignment)
    }

    async fn delete_assignment(&self, customer_id: Uuid) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM storage_assignments WHERE customer_id = $1")
            .bind(customer_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
