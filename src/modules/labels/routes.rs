use axum::{routing::post, Router};

use super::handlers::scan;
use crate::app_state::AppState;

pub fn label_routes() -> Router<AppState> {
    Router::new().route("/scan", post(scan))
}
