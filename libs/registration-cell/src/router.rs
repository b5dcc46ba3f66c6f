// libs/registration-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_store::Store;
use shared_utils::extractor::identity_middleware;

use crate::handlers;

pub fn registration_routes(store: Arc<dyn Store>) -> Router {
    // Every route runs behind the gateway identity layer
    let protected_routes = Router::new()
        // Department directory
        .route("/departments", get(handlers::get_all_departments))
        .route(
            "/departments/{department_id}",
            get(handlers::get_department_by_id),
        )
        // Booking and lifecycle
        .route("/registrations", post(handlers::create_registration))
        .route(
            "/registrations/{registration_id}",
            put(handlers::update_registration_status),
        )
        // Caller-scoped registration views
        .route(
            "/patient/registrations",
            get(handlers::get_registrations_by_patient),
        )
        .route(
            "/patient/registrations/{registration_id}",
            get(handlers::get_registration_by_patient),
        )
        .route(
            "/doctor/registrations",
            get(handlers::get_registrations_by_doctor),
        )
        .route(
            "/doctor/registrations/{registration_id}",
            get(handlers::get_registration_by_doctor),
        )
        // Milestones
        .route("/milestones", post(handlers::create_milestone))
        .route(
            "/milestones/{milestone_id}",
            put(handlers::update_milestone).delete(handlers::delete_milestone),
        )
        .layer(middleware::from_fn(identity_middleware));

    Router::new().merge(protected_routes).with_state(store)
}
