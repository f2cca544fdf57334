use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;

use crate::storage::location::{LocationError, Section, StorageSlot};

/// The binding of one customer to one slot. At most one row per customer and
/// at most one row per slot exist at any time; moving a customer updates the
/// row in place rather than inserting a second one.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct StorageAssignment {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub hotel: i16,
    pub section: Section,
    pub shelf: i16,
    pub created_at: OffsetDateTime,
}

impl StorageAssignment {
    /// Coordinates of this assignment as a slot address. Rows are kept
    /// in-bounds by the database CHECK constraints.
    pub fn slot(&self) -> StorageSlot {
        StorageSlot {
            hotel: self.hotel as u8,
            section: self.section,
            shelf: self.shelf as u8,
        }
    }

    /// Canonical `H<hotel>-<section>-<shelf>` code for this assignment.
    pub fn location_code(&self) -> String {
        self.slot().location_code()
    }
}

/// Assign-or-move request body. Coordinates arrive raw and are bounds-checked
/// through [`NewStorageAssignment::slot`] before any persistence work happens.
#[derive(Debug, Clone, Deserialize)]
pub struct NewStorageAssignment {
    pub customer_id: Uuid,
    pub hotel: u8,
    pub section: Section,
    pub shelf: u8,
}

impl NewStorageAssignment {
    pub fn slot(&self) -> Result<StorageSlot, LocationError> {
        StorageSlot::new(self.hotel, self.section, self.shelf)
    }
}
