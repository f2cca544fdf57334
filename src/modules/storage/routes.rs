use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{assign_slot, slot_label, storage_map, vacate_slot};
use crate::app_state::AppState;

pub fn storage_routes() -> Router<AppState> {
    Router::new()
        .route("/map", get(storage_map))
        .route("/assignments", post(assign_slot))
        .route("/assignments/{customer_id}", delete(vacate_slot))
        .route("/slots/{code}/label", get(slot_label))
}
