// libs/registration-cell/src/services/department.rs
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use shared_models::records::Department;
use shared_store::Store;

use crate::models::{DepartmentDetail, RegistrationError};

pub struct DepartmentService {
    store: Arc<dyn Store>,
}

impl DepartmentService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_departments(&self) -> Result<Vec<Department>, RegistrationError> {
        debug!("Listing all departments");
        Ok(self.store.departments().await?)
    }

    /// One department with its schedules and doctor display names.
    ///
    /// Doctors whose account record is missing are skipped rather than
    /// surfaced as an error; the directory is external and may lag.
    pub async fn department_detail(
        &self,
        department_id: Uuid,
    ) -> Result<DepartmentDetail, RegistrationError> {
        let department = self
            .store
            .find_department(department_id)
            .await?
            .ok_or(RegistrationError::DepartmentNotFound)?;

        let schedules = self.store.schedules_by_department(department.id).await?;
        let doctors = self.store.doctors_by_department(department.id).await?;

        let mut names = Vec::with_capacity(doctors.len());
        for doctor in &doctors {
            if let Some(account) = self.store.find_account(doctor.account_id).await? {
                names.push(account.display_name());
            }
        }

        Ok(DepartmentDetail {
            id: department.id,
            name: department.name,
            detail: department.detail,
            doctors: names,
            schedules,
        })
    }
}
