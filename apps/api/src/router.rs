use std::sync::Arc;

use axum::{routing::get, Router};

use registration_cell::router::registration_routes;
use shared_store::Store;

pub fn create_router(store: Arc<dyn Store>) -> Router {
    Router::new()
        .route("/", get(|| async { "Hospital Registration API is running!" }))
        .nest("/api", registration_routes(store))
}
