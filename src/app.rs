use axum::{middleware, routing::get, Json, Router};
use serde_json::json;

use crate::{
    app_state::AppState,
    middleware::tracing::request_tracing,
    modules::{
        customers::routes::customer_routes, labels::routes::label_routes,
        storage::routes::storage_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/customers", customer_routes())
        .nest("/storage", storage_routes())
        .nest("/labels", label_routes())
        .layer(middleware::from_fn(request_tracing))
        .with_state(state)
}

async fn hello() -> &'static str {
    "Tire hotel backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": time::OffsetDateTime::now_utc().to_string(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status,
        }
    }))
}
