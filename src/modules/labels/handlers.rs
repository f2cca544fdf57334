use axum::{extract::State, Json};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::error::AppResult;
use crate::labels::{decode_scan, ScanTarget};
use crate::modules::customers::handlers::SearchResponse;

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    /// Raw decoded text from the scanner widget.
    pub payload: String,
}

/// Resolve a scanned QR payload to customers: location labels land on the
/// slot occupant, customer labels on the license plate.
pub async fn scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> AppResult<Json<SearchResponse>> {
    let query = match decode_scan(&request.payload) {
        ScanTarget::Slot(slot) => slot.location_code(),
        ScanTarget::Query(query) => query,
    };
    let customers = state.directory.search(&query, false).await?;
    Ok(Json(SearchResponse {
        total: customers.len(),
        customers,
    }))
}
