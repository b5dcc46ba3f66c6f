// libs/registration-cell/src/services/registrations.rs
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_models::auth::AuthUser;
use shared_models::records::Registration;
use shared_store::Store;

use crate::models::{RegistrationDetail, RegistrationError, RegistrationSummary};

/// Read-only registration views, scoped to the caller's own records.
pub struct RegistrationQueryService {
    store: Arc<dyn Store>,
}

impl RegistrationQueryService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn registrations_for_patient(
        &self,
        caller: &AuthUser,
    ) -> Result<Vec<RegistrationSummary>, RegistrationError> {
        let patient = self
            .store
            .find_patient_by_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::PatientNotFound)?;

        let registrations = self.store.registrations_by_patient(patient.id).await?;
        self.summaries(registrations).await
    }

    pub async fn registrations_for_doctor(
        &self,
        caller: &AuthUser,
    ) -> Result<Vec<RegistrationSummary>, RegistrationError> {
        let doctor = self
            .store
            .find_doctor_by_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::DoctorNotFound)?;

        let registrations = self.store.registrations_by_doctor(doctor.id).await?;
        self.summaries(registrations).await
    }

    /// One registration owned by the calling patient, with names and
    /// milestones joined in. A registration that exists but belongs to
    /// someone else reads as not found.
    pub async fn registration_detail_for_patient(
        &self,
        caller: &AuthUser,
        registration_id: Uuid,
    ) -> Result<RegistrationDetail, RegistrationError> {
        let patient = self
            .store
            .find_patient_by_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::PatientNotFound)?;

        let registration = self
            .store
            .find_registration(registration_id)
            .await?
            .filter(|r| r.patient_id == patient.id)
            .ok_or(RegistrationError::RegistrationNotFound)?;

        self.detail(registration).await
    }

    pub async fn registration_detail_for_doctor(
        &self,
        caller: &AuthUser,
        registration_id: Uuid,
    ) -> Result<RegistrationDetail, RegistrationError> {
        let doctor = self
            .store
            .find_doctor_by_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::DoctorNotFound)?;

        let registration = self
            .store
            .find_registration(registration_id)
            .await?
            .filter(|r| r.doctor_id == doctor.id)
            .ok_or(RegistrationError::RegistrationNotFound)?;

        self.detail(registration).await
    }

    async fn summaries(
        &self,
        registrations: Vec<Registration>,
    ) -> Result<Vec<RegistrationSummary>, RegistrationError> {
        debug!("Assembling {} registration summaries", registrations.len());

        let mut rows = Vec::with_capacity(registrations.len());
        for registration in registrations {
            let department = self
                .store
                .find_department(registration.department_id)
                .await?
                .map(|d| d.name)
                .unwrap_or_default();
            rows.push(RegistrationSummary {
                id: registration.id,
                department,
                status: registration.status,
                year: registration.year,
                month: registration.month,
                day: registration.day,
                half_day: registration.half_day,
            });
        }
        Ok(rows)
    }

    async fn detail(
        &self,
        registration: Registration,
    ) -> Result<RegistrationDetail, RegistrationError> {
        let department = self
            .store
            .find_department(registration.department_id)
            .await?
            .map(|d| d.name)
            .unwrap_or_default();

        let patient = match self.store.find_patient(registration.patient_id).await? {
            Some(patient) => self
                .store
                .find_account(patient.account_id)
                .await?
                .map(|a| a.display_name())
                .unwrap_or_default(),
            None => String::new(),
        };

        let doctor = match self.store.find_doctor(registration.doctor_id).await? {
            Some(doctor) => self
                .store
                .find_account(doctor.account_id)
                .await?
                .map(|a| a.display_name())
                .unwrap_or_default(),
            None => String::new(),
        };

        let milestones = self
            .store
            .milestones_by_registration(registration.id)
            .await?;

        Ok(RegistrationDetail {
            id: registration.id,
            department,
            patient,
            doctor,
            year: registration.year,
            month: registration.month,
            day: registration.day,
            half_day: registration.half_day,
            status: registration.status,
            terminated_cause: registration.terminated_cause,
            milestones,
        })
    }
}
