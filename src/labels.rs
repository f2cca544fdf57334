//! Payloads for the printed QR labels and the scan-to-search flow.
//!
//! Field names are camelCase because that is what the labels already in
//! circulation carry; scans of old and new labels must decode identically.
//! Rendering the QR image itself happens client-side.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::db::models::CustomerWithAssignment;
use crate::storage::location::{Section, StorageSlot};

/// Contents of a customer identification label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLabel {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
    pub summer_tire_size: Option<String>,
    pub winter_tire_size: Option<String>,
    /// Printed under the QR code when the customer is in storage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_code: Option<String>,
}

impl CustomerLabel {
    pub fn for_customer(record: &CustomerWithAssignment) -> Self {
        Self {
            id: record.customer.id,
            name: record.customer.name.clone(),
            license_plate: record.customer.license_plate.clone(),
            summer_tire_size: record.customer.summer_tire_size.clone(),
            winter_tire_size: record.customer.winter_tire_size.clone(),
            location_code: record
                .storage_location
                .as_ref()
                .map(|assignment| assignment.location_code()),
        }
    }
}

/// Contents of a shelf location label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationLabel {
    pub hotel: u8,
    pub section: Section,
    pub shelf: u8,
    pub code: String,
}

impl LocationLabel {
    pub fn for_slot(slot: StorageSlot) -> Self {
        Self {
            hotel: slot.hotel,
            section: slot.section,
            shelf: slot.shelf,
            code: slot.location_code(),
        }
    }
}

/// Where a decoded scan should take the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanTarget {
    /// The scan identified a storage slot; look up its occupant.
    Slot(StorageSlot),
    /// Free text to run through the regular customer search.
    Query(String),
}

/// Loose view of a scanned JSON payload. Older location labels stored the
/// shelf as a string, so the coordinates are accepted as either numbers or
/// numeric strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScannedFields {
    hotel: Option<Value>,
    section: Option<String>,
    shelf: Option<Value>,
    license_plate: Option<String>,
}

fn coerce_u8(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u8::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode raw scanner output into a search route. Location labels carry
/// hotel/section/shelf, customer labels carry the license plate, and anything
/// else (including hand-typed location codes) falls through to free-text
/// search, which does its own location-code routing.
pub fn decode_scan(raw: &str) -> ScanTarget {
    if let Ok(fields) = serde_json::from_str::<ScannedFields>(raw) {
        let slot = match (&fields.hotel, &fields.section, &fields.shelf) {
            (Some(hotel), Some(section), Some(shelf)) => {
                match (coerce_u8(hotel), section.parse::<Section>(), coerce_u8(shelf)) {
                    (Some(hotel), Ok(section), Some(shelf)) => {
                        StorageSlot::new(hotel, section, shelf).ok()
                    }
                    _ => None,
                }
            }
            _ => None,
        };
        if let Some(slot) = slot {
            return ScanTarget::Slot(slot);
        }
        if let Some(plate) = fields.license_plate {
            return ScanTarget::Query(plate);
        }
    }
    ScanTarget::Query(raw.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_payload_routes_to_the_slot() {
        let target = decode_scan(r#"{"hotel":2,"section":"B","shelf":4}"#);
        assert_eq!(
            target,
            ScanTarget::Slot(StorageSlot::new(2, Section::B, 4).unwrap())
        );
    }

    #[test]
    fn legacy_string_shelf_still_decodes() {
        let target = decode_scan(r#"{"hotel":1,"section":"A","shelf":"3"}"#);
        assert_eq!(
            target,
            ScanTarget::Slot(StorageSlot::new(1, Section::A, 3).unwrap())
        );
    }

    #[test]
    fn customer_payload_routes_to_plate_search() {
        let raw = r#"{"id":"8f2e8e7e-6f54-4d39-9a61-0f0f34d3a111","name":"Maija Smith","licensePlate":"ABC-123","summerTireSize":"205/55R16","winterTireSize":null}"#;
        assert_eq!(decode_scan(raw), ScanTarget::Query("ABC-123".to_string()));
    }

    #[test]
    fn plain_text_falls_through_as_query() {
        assert_eq!(
            decode_scan("  H1-A-3 \n"),
            ScanTarget::Query("H1-A-3".to_string())
        );
        assert_eq!(decode_scan("Smith"), ScanTarget::Query("Smith".to_string()));
    }

    #[test]
    fn out_of_grid_payload_falls_through_as_query() {
        let raw = r#"{"hotel":9,"section":"A","shelf":1}"#;
        assert_eq!(decode_scan(raw), ScanTarget::Query(raw.to_string()));
    }

    #[test]
    fn customer_label_carries_the_location_code() {
        use crate::db::models::{Customer, CustomerStatus, StorageAssignment};
        use time::OffsetDateTime;

        let now = OffsetDateTime::now_utc();
        let id = Uuid::new_v4();
        let record = CustomerWithAssignment {
            customer: Customer {
                id,
                name: "Maija Smith".to_string(),
                license_plate: "ABC-123".to_string(),
                summer_tire_size: Some("205/55R16".to_string()),
                winter_tire_size: None,
                phone: "0401234567".to_string(),
                email: "maija@example.com".to_string(),
                status: CustomerStatus::Active,
                created_at: now,
                updated_at: now,
            },
            storage_location: Some(StorageAssignment {
                id: Uuid::new_v4(),
                customer_id: id,
                hotel: 1,
                section: Section::A,
                shelf: 3,
                created_at: now,
            }),
        };

        let label = CustomerLabel::for_customer(&record);
        assert_eq!(label.location_code.as_deref(), Some("H1-A-3"));

        let json = serde_json::to_value(&label).unwrap();
        assert_eq!(json["licensePlate"], "ABC-123");
        assert_eq!(json["summerTireSize"], "205/55R16");
    }
}
