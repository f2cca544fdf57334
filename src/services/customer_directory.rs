use std::sync::Arc;

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::db::models::{Customer, CustomerWithAssignment, NewCustomer, UpdateCustomer};
use crate::db::repositories::FacilityStore;
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::storage::location::StorageSlot;
use crate::storage::occupancy::OccupancyIndex;

/// Hard cap on search result sets; staff pick from a short list, they never
/// page through the whole roster.
const SEARCH_LIMIT: i64 = 10;

/// Create/search/fetch/update operations over customer profile records.
#[derive(Clone)]
pub struct CustomerDirectory {
    store: Arc<dyn FacilityStore>,
}

impl CustomerDirectory {
    pub fn new(store: Arc<dyn FacilityStore>) -> Self {
        Self { store }
    }

    /// Register a new customer. Creation is refused when an existing customer
    /// shares the name, license plate, phone or email; the pre-check produces
    /// the friendly error, and a unique violation from the store is reported
    /// the same way.
    pub async fn create(&self, new: NewCustomer) -> AppResult<Customer> {
        new.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.store.find_matching_identity(&new).await?;
        if !existing.is_empty() {
            return Err(AppError::DuplicateCustomer);
        }

        let customer = self.store.insert_customer(&new).await.map_err(|err| match err {
            DatabaseError::Duplicate => AppError::DuplicateCustomer,
            other => other.into(),
        })?;
        info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }

    /// Free-text search. A query containing a location code is routed to
    /// slot-occupant lookup; anything else is a case-insensitive substring
    /// match over name and license plate, newest first, capped at
    /// [`SEARCH_LIMIT`]. With `only_unassigned` the results are narrowed to
    /// customers without a slot (the "pick a customer for this shelf" flow).
    pub async fn search(
        &self,
        query: &str,
        only_unassigned: bool,
    ) -> AppResult<Vec<CustomerWithAssignment>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut results = match StorageSlot::parse(query) {
            Some(slot) => {
                let roster = self.store.customers_with_assignments().await?;
                let index = OccupancyIndex::build(&roster);
                index.occupant_of(slot).cloned().into_iter().collect()
            }
            None => self.store.search_customers(query, SEARCH_LIMIT).await?,
        };

        if only_unassigned {
            results.retain(|record| record.storage_location.is_none());
        }
        Ok(results)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<CustomerWithAssignment> {
        self.store
            .customer_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("customer {id}")))
    }

    /// Partial profile update. Storage assignments are never touched here;
    /// moving a customer goes through the allocation service.
    pub async fn update(&self, id: Uuid, update: UpdateCustomer) -> AppResult<Customer> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.store
            .update_customer(id, &update)
            .await
            .map_err(|err| match err {
                DatabaseError::NotFound => AppError::NotFound(format!("customer {id}")),
                other => other.into(),
            })
    }
}
