use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::OffsetDateTime;
use validator::Validate;

use super::storage_assignment::StorageAssignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "customer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    /// Tires dropped off but not yet checked in to a slot.
    Interim,
    Inactive,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub summer_tire_size: Option<String>,
    pub winter_tire_size: Option<String>,
    pub phone: String,
    pub email: String,
    pub status: CustomerStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A customer together with their current storage slot, if any. This is the
/// read model the occupancy index and the search results are built from;
/// "no assignment" is always the absent case, never an empty placeholder row.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerWithAssignment {
    #[serde(flatten)]
    pub customer: Customer,
    pub storage_location: Option<StorageAssignment>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCustomer {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "License plate must not be empty"))]
    pub license_plate: String,
    pub summer_tire_size: Option<String>,
    pub winter_tire_size: Option<String>,
    #[validate(length(min = 1, message = "Phone must not be empty"))]
    pub phone: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub status: Option<CustomerStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub license_plate: Option<String>,
    pub summer_tire_size: Option<String>,
    pub winter_tire_size: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub status: Option<CustomerStatus>,
}
