// libs/registration-cell/src/services/scheduler.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use shared_models::auth::AuthUser;
use shared_models::records::{AccountType, Registration, RegistrationStatus};
use shared_store::Store;

use crate::models::{CreateRegistrationRequest, RegistrationError};
use crate::services::lifecycle::RegistrationLifecycleService;

pub struct RegistrationSchedulerService {
    store: Arc<dyn Store>,
    lifecycle_service: RegistrationLifecycleService,
}

impl RegistrationSchedulerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            lifecycle_service: RegistrationLifecycleService::new(),
        }
    }

    /// Book a slot for the calling patient.
    ///
    /// Every check and both writes run on one store transaction, so a failure
    /// at any step leaves capacity and the registration table untouched, and
    /// two concurrent bookings cannot both squeeze past the capacity check.
    /// Single attempt; the caller resubmits on conflict.
    pub async fn create_registration(
        &self,
        caller: &AuthUser,
        request: CreateRegistrationRequest,
    ) -> Result<Uuid, RegistrationError> {
        info!(
            "Creating registration in department {} for {}-{:02}-{:02} {}",
            request.department_id, request.year, request.month, request.day, request.half_day
        );

        let slot = request.slot();
        let mut tx = self.store.begin().await?;

        // Step 1: department must exist
        let department = tx
            .find_department(request.department_id)
            .await?
            .ok_or(RegistrationError::DepartmentNotFound)?;

        // Step 2: caller must resolve to a patient record
        let patient = tx
            .find_patient_by_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::PatientNotFound)?;

        // Step 3: reject a duplicate booking while an earlier one is live
        let slot_registrations = tx.registrations_for_slot(&slot).await?;
        let has_live_duplicate = slot_registrations
            .iter()
            .any(|r| r.patient_id == patient.id && !r.is_terminated());
        if has_live_duplicate {
            warn!(
                "Patient {} already holds a live registration for this slot",
                patient.id
            );
            return Err(RegistrationError::DuplicateRegistration);
        }

        // Step 4: the slot must have a bookable schedule row
        let mut schedule = tx
            .find_schedule_for_slot(&slot)
            .await?
            .ok_or(RegistrationError::InvalidRegistration)?;
        if !schedule_bookable(&schedule.slot_date(), Utc::now().date_naive()) {
            warn!("Schedule {} is not bookable", schedule.id);
            return Err(RegistrationError::InvalidRegistration);
        }

        // Step 5: capacity
        if schedule.current >= schedule.capacity {
            return Err(RegistrationError::NotEnoughCapacity);
        }

        // Step 6: least-loaded doctor for this exact slot; id order breaks ties
        let mut doctors = tx.doctors_by_department(department.id).await?;
        doctors.sort_by_key(|d| d.id);

        let mut assigned = None;
        let mut min_load = usize::MAX;
        for doctor in &doctors {
            let load = slot_registrations
                .iter()
                .filter(|r| r.doctor_id == doctor.id)
                .count();
            if load < min_load {
                min_load = load;
                assigned = Some(doctor.id);
            }
        }
        let doctor_id = assigned.ok_or(RegistrationError::CannotAssignDoctor)?;

        // Step 7: persist the registration and the occupancy bump together
        let registration = Registration {
            id: Uuid::new_v4(),
            department_id: department.id,
            patient_id: patient.id,
            doctor_id,
            year: slot.year,
            month: slot.month,
            day: slot.day,
            half_day: slot.half_day,
            status: RegistrationStatus::Committed,
            terminated_cause: None,
            created_at: Utc::now(),
        };
        tx.insert_registration(&registration).await?;

        schedule.current += 1;
        tx.save_schedule(&schedule).await?;

        tx.commit().await?;

        info!(
            "Registration {} created, doctor {} assigned (load {})",
            registration.id, doctor_id, min_load
        );
        Ok(registration.id)
    }

    /// Move a registration through its lifecycle on behalf of the caller.
    ///
    /// Single-row update; the legal moves are the lifecycle table plus an
    /// ownership check against the caller's patient/doctor record.
    pub async fn update_registration_status(
        &self,
        caller: &AuthUser,
        registration_id: Uuid,
        target: RegistrationStatus,
        terminated_cause: Option<String>,
    ) -> Result<(), RegistrationError> {
        let account = self
            .store
            .find_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::AccountNotFound)?;

        let mut registration = self
            .store
            .find_registration(registration_id)
            .await?
            .ok_or(RegistrationError::RegistrationNotFound)?;

        let cause = terminated_cause
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let owns = match account.account_type {
            AccountType::Patient => {
                let patient = self
                    .store
                    .find_patient_by_account(account.id)
                    .await?
                    .ok_or(RegistrationError::PatientNotFound)?;
                patient.id == registration.patient_id
            }
            AccountType::Doctor => {
                let doctor = self
                    .store
                    .find_doctor_by_account(account.id)
                    .await?
                    .ok_or(RegistrationError::DoctorNotFound)?;
                doctor.id == registration.doctor_id
            }
            AccountType::Admin => false,
        };

        let allowed = owns
            && self.lifecycle_service.transition_allowed(
                registration.status,
                account.account_type,
                target,
                cause.is_some(),
            );
        if !allowed {
            warn!(
                "Rejected status update {} -> {} by {} on registration {}",
                registration.status, target, account.account_type, registration_id
            );
            return Err(RegistrationError::RegistrationUpdateFailed);
        }

        // The termination cause is recorded only on the doctor's
        // committed -> terminated move; the other transitions carry none.
        if registration.status == RegistrationStatus::Committed
            && account.account_type == AccountType::Doctor
            && target == RegistrationStatus::Terminated
        {
            registration.terminated_cause = cause.map(String::from);
        }
        registration.status = target;

        self.store.save_registration(&registration).await?;
        info!(
            "Registration {} moved to {} by {}",
            registration_id, target, account.account_type
        );
        Ok(())
    }
}

/// A slot is bookable while its date is well-formed and not in the past.
fn schedule_bookable(slot_date: &Option<NaiveDate>, today: NaiveDate) -> bool {
    match slot_date {
        Some(date) => *date >= today,
        None => false,
    }
}
