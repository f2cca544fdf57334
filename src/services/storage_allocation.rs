use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::db::models::CustomerWithAssignment;
use crate::db::repositories::FacilityStore;
use crate::db::DatabaseError;
use crate::error::{AppError, AppResult};
use crate::storage::location::StorageSlot;
use crate::storage::occupancy::OccupancyIndex;

/// The mutating half of the storage subsystem: move customers between the
/// `Unassigned` and `Assigned(slot)` states.
///
/// Every transition pre-checks occupancy against a fresh read of the roster.
/// The database unique constraints remain the authority under concurrent
/// writes; when they fire the violation surfaces as the same `SlotOccupied`
/// the pre-check would have produced.
#[derive(Clone)]
pub struct StorageAllocation {
    store: Arc<dyn FacilityStore>,
}

impl StorageAllocation {
    pub fn new(store: Arc<dyn FacilityStore>) -> Self {
        Self { store }
    }

    /// Assign `customer_id` to `slot`, moving them if they already hold one.
    /// Fails with [`AppError::SlotOccupied`] when a different customer holds
    /// the slot; assigning a customer to their own slot is a no-op update.
    ///
    /// Returns the customer re-read after the write, so callers always render
    /// post-transition occupancy rather than whatever they had on screen.
    pub async fn assign(
        &self,
        customer_id: Uuid,
        slot: StorageSlot,
    ) -> AppResult<CustomerWithAssignment> {
        let roster = self.store.customers_with_assignments().await?;
        let index = OccupancyIndex::build(&roster);
        if let Some(occupant) = index.occupant_of(slot) {
            if occupant.customer.id != customer_id {
                return Err(AppError::SlotOccupied(slot));
            }
        }

        let current = self.store.assignment_for_customer(customer_id).await?;
        let outcome = match current {
            Some(_) => self.store.move_assignment(customer_id, slot).await,
            None => self.store.insert_assignment(customer_id, slot).await,
        };

        match outcome {
            Ok(assignment) => {
                info!(
                    customer_id = %customer_id,
                    slot = %assignment.slot(),
                    "storage slot assigned"
                );
                self.store
                    .customer_by_id(customer_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("customer {customer_id}")))
            }
            // Constraint backstop: a concurrent assign won the slot between
            // our pre-check and the write.
            Err(DatabaseError::Duplicate) => Err(AppError::SlotOccupied(slot)),
            Err(DatabaseError::NotFound) => {
                Err(AppError::NotFound(format!("customer {customer_id}")))
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Remove the customer from storage. Vacating an already-unassigned
    /// customer is a no-op, not an error.
    pub async fn vacate(&self, customer_id: Uuid) -> AppResult<()> {
        let removed = self.store.delete_assignment(customer_id).await?;
        if removed == 0 {
            debug!(customer_id = %customer_id, "vacate requested for customer with no slot");
        } else {
            info!(customer_id = %customer_id, "storage slot vacated");
        }
        Ok(())
    }

    /// Fresh occupancy snapshot of the whole grid.
    pub async fn occupancy(&self) -> AppResult<OccupancyIndex> {
        let roster = self.store.customers_with_assignments().await?;
        Ok(OccupancyIndex::build(&roster))
    }
}
