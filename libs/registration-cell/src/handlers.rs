// libs/registration-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_store::Store;

use crate::models::{
    CreateMileStoneRequest, CreateRegistrationRequest, UpdateMileStoneRequest,
    UpdateRegistrationStatusRequest,
};
use crate::services::department::DepartmentService;
use crate::services::milestone::MileStoneService;
use crate::services::registrations::RegistrationQueryService;
use crate::services::scheduler::RegistrationSchedulerService;

// ==============================================================================
// DEPARTMENT HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn get_all_departments(
    State(store): State<Arc<dyn Store>>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(store);
    let departments = service.list_departments().await?;

    Ok(Json(json!({
        "success": true,
        "departments": departments
    })))
}

#[axum::debug_handler]
pub async fn get_department_by_id(
    State(store): State<Arc<dyn Store>>,
    Path(department_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = DepartmentService::new(store);
    let department = service.department_detail(department_id).await?;

    Ok(Json(json!(department)))
}

// ==============================================================================
// REGISTRATION HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_registration(
    State(store): State<Arc<dyn Store>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<CreateRegistrationRequest>,
) -> Result<Json<Value>, AppError> {
    let service = RegistrationSchedulerService::new(store);
    let registration_id = service.create_registration(&user, request).await?;

    Ok(Json(json!({
        "success": true,
        "registration_id": registration_id,
        "message": "Registration created successfully"
    })))
}

#[axum::debug_handler]
pub async fn update_registration_status(
    State(store): State<Arc<dyn Store>>,
    Path(registration_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<UpdateRegistrationStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let service = RegistrationSchedulerService::new(store);
    service
        .update_registration_status(
            &user,
            registration_id,
            request.status,
            request.terminated_cause,
        )
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Registration status updated"
    })))
}

#[axum::debug_handler]
pub async fn get_registrations_by_patient(
    State(store): State<Arc<dyn Store>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = RegistrationQueryService::new(store);
    let registrations = service.registrations_for_patient(&user).await?;

    Ok(Json(json!({
        "success": true,
        "registrations": registrations
    })))
}

#[axum::debug_handler]
pub async fn get_registration_by_patient(
    State(store): State<Arc<dyn Store>>,
    Path(registration_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = RegistrationQueryService::new(store);
    let registration = service
        .registration_detail_for_patient(&user, registration_id)
        .await?;

    Ok(Json(json!(registration)))
}

#[axum::debug_handler]
pub async fn get_registrations_by_doctor(
    State(store): State<Arc<dyn Store>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = RegistrationQueryService::new(store);
    let registrations = service.registrations_for_doctor(&user).await?;

    Ok(Json(json!({
        "success": true,
        "registrations": registrations
    })))
}

#[axum::debug_handler]
pub async fn get_registration_by_doctor(
    State(store): State<Arc<dyn Store>>,
    Path(registration_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = RegistrationQueryService::new(store);
    let registration = service
        .registration_detail_for_doctor(&user, registration_id)
        .await?;

    Ok(Json(json!(registration)))
}

// ==============================================================================
// MILESTONE HANDLERS
// ==============================================================================

#[axum::debug_handler]
pub async fn create_milestone(
    State(store): State<Arc<dyn Store>>,
    Json(request): Json<CreateMileStoneRequest>,
) -> Result<Json<Value>, AppError> {
    let service = MileStoneService::new(store);
    let milestone_id = service.create_milestone(request).await?;

    Ok(Json(json!({
        "success": true,
        "milestone_id": milestone_id
    })))
}

#[axum::debug_handler]
pub async fn update_milestone(
    State(store): State<Arc<dyn Store>>,
    Path(milestone_id): Path<Uuid>,
    Json(request): Json<UpdateMileStoneRequest>,
) -> Result<Json<Value>, AppError> {
    let service = MileStoneService::new(store);
    service.update_milestone(milestone_id, request).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Milestone updated"
    })))
}

#[axum::debug_handler]
pub async fn delete_milestone(
    State(store): State<Arc<dyn Store>>,
    Path(milestone_id): Path<Uuid>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let service = MileStoneService::new(store);
    service.delete_milestone(&user, milestone_id).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Milestone deleted"
    })))
}
