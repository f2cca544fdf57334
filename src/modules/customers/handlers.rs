use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::db::models::{Customer, CustomerWithAssignment, NewCustomer, UpdateCustomer};
use crate::error::AppResult;
use crate::labels::CustomerLabel;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// Narrow to customers without a storage slot (the "pick a customer for
    /// this shelf" dialog).
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub customers: Vec<CustomerWithAssignment>,
    pub total: usize,
}

pub async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<NewCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state.directory.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn search_customers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let customers = state.directory.search(&params.q, params.available).await?;
    Ok(Json(SearchResponse {
        total: customers.len(),
        customers,
    }))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CustomerWithAssignment>> {
    Ok(Json(state.directory.get(id).await?))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomer>,
) -> AppResult<Json<Customer>> {
    Ok(Json(state.directory.update(id, payload).await?))
}

/// Payload for the printed customer identification label.
pub async fn customer_label(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CustomerLabel>> {
    let record = state.directory.get(id).await?;
    Ok(Json(CustomerLabel::for_customer(&record)))
}
