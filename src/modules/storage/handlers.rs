use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{CustomerWithAssignment, NewStorageAssignment};
use crate::error::{AppError, AppResult};
use crate::labels::LocationLabel;
use crate::storage::location::{Section, StorageSlot};

/// One cell of the rendered storage map.
#[derive(Debug, Serialize)]
pub struct SlotView {
    pub code: String,
    pub hotel: u8,
    pub section: Section,
    pub shelf: u8,
    pub occupant: Option<OccupantView>,
}

#[derive(Debug, Serialize)]
pub struct OccupantView {
    pub id: Uuid,
    pub name: String,
    pub license_plate: String,
}

impl OccupantView {
    fn from_record(record: &CustomerWithAssignment) -> Self {
        Self {
            id: record.customer.id,
            name: record.customer.name.clone(),
            license_plate: record.customer.license_plate.clone(),
        }
    }
}

/// Occupancy of all 72 slots, hotel-major order.
pub async fn storage_map(State(state): State<AppState>) -> AppResult<Json<Vec<SlotView>>> {
    let index = state.storage.occupancy().await?;
    let slots = StorageSlot::all()
        .map(|slot| SlotView {
            code: slot.location_code(),
            hotel: slot.hotel,
            section: slot.section,
            shelf: slot.shelf,
            occupant: index.occupant_of(slot).map(OccupantView::from_record),
        })
        .collect();
    Ok(Json(slots))
}

/// Assign a customer to a slot, or move them if they already hold one.
pub async fn assign_slot(
    State(state): State<AppState>,
    Json(payload): Json<NewStorageAssignment>,
) -> AppResult<Json<CustomerWithAssignment>> {
    let slot = payload.slot()?;
    let record = state.storage.assign(payload.customer_id, slot).await?;
    Ok(Json(record))
}

/// Take a customer out of storage. Safe to call when they have no slot.
pub async fn vacate_slot(
    State(state): State<AppState>,
    Path(customer_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.storage.vacate(customer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Payload for a printed shelf location label.
pub async fn slot_label(Path(code): Path<String>) -> AppResult<Json<LocationLabel>> {
    let slot = StorageSlot::parse(&code).ok_or(AppError::BadLocationCode(code))?;
    Ok(Json(LocationLabel::for_slot(slot)))
}
