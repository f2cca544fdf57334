//! In-memory [`FacilityStore`] used by the service tests. Mirrors the
//! Postgres semantics that matter to callers: exact-match identity lookup,
//! case-insensitive substring search, newest-first ordering, and the two
//! uniqueness constraints on assignments.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{FacilityStore, StoreResult};
use crate::db::models::{
    Customer, CustomerStatus, CustomerWithAssignment, NewCustomer, StorageAssignment,
    UpdateCustomer,
};
use crate::db::DatabaseError;
use crate::storage::location::StorageSlot;

#[derive(Default)]
struct Inner {
    customers: Vec<Customer>,
    assignments: Vec<StorageAssignment>,
}

#[derive(Default)]
pub struct MemoryFacilityStore {
    inner: Mutex<Inner>,
}

impl MemoryFacilityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Inner {
    fn with_assignment(&self, customer: &Customer) -> CustomerWithAssignment {
        CustomerWithAssignment {
            customer: customer.clone(),
            storage_location: self
                .assignments
                .iter()
                .find(|a| a.customer_id == customer.id)
                .cloned(),
        }
    }
}

#[async_trait]
impl FacilityStore for MemoryFacilityStore {
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn insert_customer(&self, new: &NewCustomer) -> StoreResult<Customer> {
        let now = OffsetDateTime::now_utc();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: new.name.clone(),
            license_plate: new.license_plate.clone(),
            summer_tire_size: new.summer_tire_size.clone(),
            winter_tire_size: new.winter_tire_size.clone(),
            phone: new.phone.clone(),
            email: new.email.clone(),
            status: new.status.unwrap_or(CustomerStatus::Active),
            created_at: now,
            updated_at: now,
        };
        self.inner.lock().unwrap().customers.push(customer.clone());
        Ok(customer)
    }

    async fn customer_by_id(&self, id: Uuid) -> StoreResult<Option<CustomerWithAssignment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .find(|c| c.id == id)
            .map(|c| inner.with_assignment(c)))
    }

    async fn update_customer(&self, id: Uuid, update: &UpdateCustomer) -> StoreResult<Customer> {
        let mut inner = self.inner.lock().unwrap();
        let customer = inner
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DatabaseError::NotFound)?;
        if let Some(name) = &update.name {
            customer.name = name.clone();
        }
        if let Some(plate) = &update.license_plate {
            customer.license_plate = plate.clone();
        }
        if let Some(size) = &update.summer_tire_size {
            customer.summer_tire_size = Some(size.clone());
        }
        if let Some(size) = &update.winter_tire_size {
            customer.winter_tire_size = Some(size.clone());
        }
        if let Some(phone) = &update.phone {
            customer.phone = phone.clone();
        }
        if let Some(email) = &update.email {
            customer.email = email.clone();
        }
        if let Some(status) = update.status {
            customer.status = status;
        }
        customer.updated_at = OffsetDateTime::now_utc();
        Ok(customer.clone())
    }

    async fn find_matching_identity(&self, new: &NewCustomer) -> StoreResult<Vec<Customer>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .filter(|c| {
                c.name == new.name
                    || c.license_plate == new.license_plate
                    || c.phone == new.phone
                    || c.email == new.email
            })
            .cloned()
            .collect())
    }

    async fn search_customers(
        &self,
        query: &str,
        limit: i64,
    ) -> StoreResult<Vec<CustomerWithAssignment>> {
        let needle = query.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .rev()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.license_plate.to_lowercase().contains(&needle)
            })
            .take(limit as usize)
            .map(|c| inner.with_assignment(c))
            .collect())
    }

    async fn customers_with_assignments(&self) -> StoreResult<Vec<CustomerWithAssignment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .customers
            .iter()
            .rev()
            .map(|c| inner.with_assignment(c))
            .collect())
    }

    async fn assignment_for_customer(
        &self,
        customer_id: Uuid,
    ) -> StoreResult<Option<StorageAssignment>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .assignments
            .iter()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn insert_assignment(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> StoreResult<StorageAssignment> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.customers.iter().any(|c| c.id == customer_id) {
            return Err(DatabaseError::NotFound);
        }
        let taken = inner
            .assignments
            .iter()
            .any(|a| a.slot() == slot || a.customer_id == customer_id);
        if taken {
            return Err(DatabaseError::Duplicate);
        }
        let assignment = StorageAssignment {
            id: Uuid::new_v4(),
            customer_id,
            hotel: slot.hotel as i16,
            section: slot.section,
            shelf: slot.shelf as i16,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn move_assignment(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> StoreResult<StorageAssignment> {
        let mut inner = self.inner.lock().unwrap();
        let taken = inner
            .assignments
            .iter()
            .any(|a| a.slot() == slot && a.customer_id != customer_id);
        if taken {
            return Err(DatabaseError::Duplicate);
        }
        let assignment = inner
            .assignments
            .iter_mut()
            .find(|a| a.customer_id == customer_id)
            .ok_or(DatabaseError::NotFound)?;
        assignment.hotel = slot.hotel as i16;
        assignment.section = slot.section;
        assignment.shelf = slot.shelf as i16;
        Ok(assignment.clone())
    }

    async fn delete_assignment(&self, customer_id: Uuid) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.assignments.len();
        inner.assignments.retain(|a| a.customer_id != customer_id);
        Ok((before - inner.assignments.len()) as u64)
    }
}
