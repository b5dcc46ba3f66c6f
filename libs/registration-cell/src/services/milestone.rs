// libs/registration-cell/src/services/milestone.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::auth::AuthUser;
use shared_models::records::MileStone;
use shared_store::Store;

use crate::models::{CreateMileStoneRequest, RegistrationError, UpdateMileStoneRequest};

pub struct MileStoneService {
    store: Arc<dyn Store>,
}

impl MileStoneService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Attach a milestone to a registration. Creation carries no ownership
    /// check; only the parent registration has to exist.
    pub async fn create_milestone(
        &self,
        request: CreateMileStoneRequest,
    ) -> Result<Uuid, RegistrationError> {
        self.store
            .find_registration(request.registration_id)
            .await?
            .ok_or(RegistrationError::RegistrationNotFound)?;

        let milestone = MileStone {
            id: Uuid::new_v4(),
            registration_id: request.registration_id,
            activity: request.activity,
            checked: false,
        };
        self.store.insert_milestone(&milestone).await?;

        debug!(
            "Milestone {} created on registration {}",
            milestone.id, milestone.registration_id
        );
        Ok(milestone.id)
    }

    /// Replace the activity text and checked flag, and write the record back.
    pub async fn update_milestone(
        &self,
        milestone_id: Uuid,
        request: UpdateMileStoneRequest,
    ) -> Result<(), RegistrationError> {
        let mut milestone = self
            .store
            .find_milestone(milestone_id)
            .await?
            .ok_or(RegistrationError::MileStoneNotFound)?;

        milestone.activity = request.activity;
        milestone.checked = request.checked;
        self.store.save_milestone(&milestone).await?;

        debug!("Milestone {} updated", milestone_id);
        Ok(())
    }

    /// Delete a milestone. Only the doctor assigned to the parent
    /// registration may delete, and only while that registration is not
    /// terminated.
    pub async fn delete_milestone(
        &self,
        caller: &AuthUser,
        milestone_id: Uuid,
    ) -> Result<(), RegistrationError> {
        let doctor = self
            .store
            .find_doctor_by_account(caller.account_id)
            .await?
            .ok_or(RegistrationError::DoctorNotFound)?;

        let milestone = self
            .store
            .find_milestone(milestone_id)
            .await?
            .ok_or(RegistrationError::MileStoneNotFound)?;

        let registration = self
            .store
            .find_registration(milestone.registration_id)
            .await?
            .ok_or(RegistrationError::RegistrationNotFound)?;

        if registration.is_terminated() || registration.doctor_id != doctor.id {
            warn!(
                "Doctor {} denied deleting milestone {} on registration {}",
                doctor.id, milestone_id, registration.id
            );
            return Err(RegistrationError::MileStoneUnauthorized);
        }

        self.store.delete_milestone(milestone_id).await?;
        info!("Milestone {} deleted by doctor {}", milestone_id, doctor.id);
        Ok(())
    }
}
