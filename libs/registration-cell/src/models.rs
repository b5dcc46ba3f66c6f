// libs/registration-cell/src/models.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_models::error::AppError;
use shared_models::records::{
    DepartmentSchedule, HalfDay, MileStone, RegistrationStatus, SlotKey,
};
use shared_store::StoreError;

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegistrationRequest {
    pub department_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub half_day: HalfDay,
}

impl CreateRegistrationRequest {
    pub fn slot(&self) -> SlotKey {
        SlotKey {
            department_id: self.department_id,
            year: self.year,
            month: self.month,
            day: self.day,
            half_day: self.half_day,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRegistrationStatusRequest {
    pub status: RegistrationStatus,
    pub terminated_cause: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMileStoneRequest {
    pub registration_id: Uuid,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMileStoneRequest {
    pub activity: String,
    pub checked: bool,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

/// Department with its schedules and the display names of its doctors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDetail {
    pub id: Uuid,
    pub name: String,
    pub detail: String,
    pub doctors: Vec<String>,
    pub schedules: Vec<DepartmentSchedule>,
}

/// Listing row for the patient/doctor registration views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationSummary {
    pub id: Uuid,
    pub department: String,
    pub status: RegistrationStatus,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub half_day: HalfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationDetail {
    pub id: Uuid,
    pub department: String,
    pub patient: String,
    pub doctor: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub half_day: HalfDay,
    pub status: RegistrationStatus,
    pub terminated_cause: Option<String>,
    pub milestones: Vec<MileStone>,
}

// ==============================================================================
// ERROR MODEL
// ==============================================================================

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Department not found")]
    DepartmentNotFound,

    #[error("Patient not found")]
    PatientNotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Registration not found")]
    RegistrationNotFound,

    #[error("Milestone not found")]
    MileStoneNotFound,

    #[error("A registration for this slot already exists")]
    DuplicateRegistration,

    #[error("Schedule missing or not bookable")]
    InvalidRegistration,

    #[error("No capacity left for this slot")]
    NotEnoughCapacity,

    #[error("No doctor available in this department")]
    CannotAssignDoctor,

    #[error("Registration status update not allowed")]
    RegistrationUpdateFailed,

    #[error("Not authorized to modify this milestone")]
    MileStoneUnauthorized,

    #[error("Database error: {0}")]
    Store(#[from] StoreError),
}

impl From<RegistrationError> for AppError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::DepartmentNotFound
            | RegistrationError::PatientNotFound
            | RegistrationError::DoctorNotFound
            | RegistrationError::AccountNotFound
            | RegistrationError::RegistrationNotFound
            | RegistrationError::MileStoneNotFound => AppError::NotFound(err.to_string()),

            RegistrationError::DuplicateRegistration
            | RegistrationError::NotEnoughCapacity
            | RegistrationError::CannotAssignDoctor => AppError::Conflict(err.to_string()),

            RegistrationError::InvalidRegistration
            | RegistrationError::RegistrationUpdateFailed => AppError::BadRequest(err.to_string()),

            RegistrationError::MileStoneUnauthorized => AppError::Auth(err.to_string()),

            RegistrationError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
