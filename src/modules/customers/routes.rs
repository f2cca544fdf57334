use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_customer, customer_label, get_customer, search_customers, update_customer,
};
use crate::app_state::AppState;

pub fn customer_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_customer))
        .route("/search", get(search_customers))
        .route("/{id}", get(get_customer).patch(update_customer))
        .route("/{id}/label", get(customer_label))
}
