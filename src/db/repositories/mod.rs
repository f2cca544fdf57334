mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{
    Customer, CustomerWithAssignment, NewCustomer, StorageAssignment, UpdateCustomer,
};
use super::DatabaseError;
use crate::storage::location::StorageSlot;

pub use postgres::PgFacilityStore;

pub type StoreResult<T> = Result<T, DatabaseError>;

/// Persistence capability behind the customer directory and the storage
/// allocation service. Injected explicitly rather than reached through a
/// shared global client, so tests substitute the in-memory implementation.
///
/// All name/plate casing quirks and column mapping live behind this boundary;
/// callers only ever see the model structs.
#[async_trait]
pub trait FacilityStore: Send + Sync {
    async fn ping(&self) -> StoreResult<()>;

    async fn insert_customer(&self, new: &NewCustomer) -> StoreResult<Customer>;

    async fn customer_by_id(&self, id: Uuid) -> StoreResult<Option<CustomerWithAssignment>>;

    async fn update_customer(&self, id: Uuid, update: &UpdateCustomer) -> StoreResult<Customer>;

    /// Customers sharing any of the identifying fields (exact match on name,
    /// license plate, phone or email) with the candidate record.
    async fn find_matching_identity(&self, new: &NewCustomer) -> StoreResult<Vec<Customer>>;

    /// Case-insensitive substring match over name and license plate,
    /// newest-first, capped at `limit`.
    async fn search_customers(
        &self,
        query: &str,
        limit: i64,
    ) -> StoreResult<Vec<CustomerWithAssignment>>;

    /// The full roster with current assignments, newest customer first. Read
    /// fresh for every occupancy decision; nothing is cached.
    async fn customers_with_assignments(&self) -> StoreResult<Vec<CustomerWithAssignment>>;

    async fn assignment_for_customer(
        &self,
        customer_id: Uuid,
    ) -> StoreResult<Option<StorageAssignment>>;

    /// Create an assignment row. Surfaces `DatabaseError::Duplicate` when the
    /// slot or the customer already has a row (the unique-constraint backstop
    /// behind the occupancy pre-check).
    async fn insert_assignment(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> StoreResult<StorageAssignment>;

    /// Update the customer's existing assignment row to new coordinates.
    async fn move_assignment(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> StoreResult<StorageAssignment>;

    /// Delete the customer's assignment row, returning how many rows went
    /// away (zero when the customer was already unassigned).
    async fn delete_assignment(&self, customer_id: Uuid) -> StoreResult<u64>;
}
