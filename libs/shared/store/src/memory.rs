// libs/shared/store/src/memory.rs
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use uuid::Uuid;

use shared_models::records::{
    Account, Department, DepartmentSchedule, Doctor, MileStone, Patient, Registration, SlotKey,
};

use crate::{Store, StoreError, StoreTx};

#[derive(Debug, Default, Clone)]
struct MemoryState {
    departments: BTreeMap<Uuid, Department>,
    schedules: BTreeMap<Uuid, DepartmentSchedule>,
    accounts: BTreeMap<Uuid, Account>,
    patients: BTreeMap<Uuid, Patient>,
    doctors: BTreeMap<Uuid, Doctor>,
    registrations: BTreeMap<Uuid, Registration>,
    milestones: BTreeMap<Uuid, MileStone>,
}

/// In-memory [`Store`] used by tests and the dev server.
///
/// A transaction takes the whole dataset exclusively until it commits or is
/// dropped, which makes every transaction serializable. The trade-off: a task
/// must not call the plain `Store` methods while it still holds an open
/// transaction on the same store, or it will deadlock on itself.
///
/// Tables are `BTreeMap`s keyed by id, so every scan enumerates rows in
/// ascending id order.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Directory data is owned by the (external) account subsystem; these
    // helpers stand in for it when seeding tests and dev environments.

    pub async fn insert_department(&self, department: Department) {
        self.state
            .lock()
            .await
            .departments
            .insert(department.id, department);
    }

    pub async fn insert_schedule(&self, schedule: DepartmentSchedule) {
        self.state.lock().await.schedules.insert(schedule.id, schedule);
    }

    pub async fn insert_account(&self, account: Account) {
        self.state.lock().await.accounts.insert(account.id, account);
    }

    pub async fn insert_patient(&self, patient: Patient) {
        self.state.lock().await.patients.insert(patient.id, patient);
    }

    pub async fn insert_doctor(&self, doctor: Doctor) {
        self.state.lock().await.doctors.insert(doctor.id, doctor);
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        debug!("memory store transaction opened");
        let snapshot = guard.clone();
        Ok(Box::new(MemoryTx {
            guard,
            snapshot: Some(snapshot),
        }))
    }

    async fn departments(&self) -> Result<Vec<Department>, StoreError> {
        Ok(self.state.lock().await.departments.values().cloned().collect())
    }

    async fn find_department(&self, id: Uuid) -> Result<Option<Department>, StoreError> {
        Ok(self.state.lock().await.departments.get(&id).cloned())
    }

    async fn schedules_by_department(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<DepartmentSchedule>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .schedules
            .values()
            .filter(|s| s.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn doctors_by_department(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<Doctor>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .doctors
            .values()
            .filter(|d| d.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn find_account(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.state.lock().await.accounts.get(&id).cloned())
    }

    async fn find_patient(&self, id: Uuid) -> Result<Option<Patient>, StoreError> {
        Ok(self.state.lock().await.patients.get(&id).cloned())
    }

    async fn find_patient_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Patient>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .patients
            .values()
            .find(|p| p.account_id == account_id)
            .cloned())
    }

    async fn find_doctor_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Doctor>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .doctors
            .values()
            .find(|d| d.account_id == account_id)
            .cloned())
    }

    async fn find_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError> {
        Ok(self.state.lock().await.doctors.get(&id).cloned())
    }

    async fn find_registration(&self, id: Uuid) -> Result<Option<Registration>, StoreError> {
        Ok(self.state.lock().await.registrations.get(&id).cloned())
    }

    async fn registrations_by_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .registrations
            .values()
            .filter(|r| r.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn registrations_by_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .registrations
            .values()
            .filter(|r| r.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn save_registration(&self, registration: &Registration) -> Result<(), StoreError> {
        self.state
            .lock()
            .await
            .registrations
            .insert(registration.id, registration.clone());
        Ok(())
    }

    async fn find_milestone(&self, id: Uuid) -> Result<Option<MileStone>, StoreError> {
        Ok(self.state.lock().await.milestones.get(&id).cloned())
    }

    async fn milestones_by_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<MileStone>, StoreError> {
        Ok(self
            .state
            .lock()
            .await
            .milestones
            .values()
            .filter(|m| m.registration_id == registration_id)
            .cloned()
            .collect())
    }

    async fn insert_milestone(&self, milestone: &MileStone) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        if state.milestones.contains_key(&milestone.id) {
            return Err(StoreError::Backend(format!(
                "milestone {} already exists",
                milestone.id
            )));
        }
        state.milestones.insert(milestone.id, milestone.clone());
        Ok(())
    }

    async fn save_milestone(&self, milestone: &MileStone) -> Result<(), StoreError> {
        self.state
            .lock()
            .await
            .milestones
            .insert(milestone.id, milestone.clone());
        Ok(())
    }

    async fn delete_milestone(&self, id: Uuid) -> Result<(), StoreError> {
        self.state.lock().await.milestones.remove(&id);
        Ok(())
    }
}

/// Exclusive transaction over the in-memory dataset. Writes land directly in
/// the live tables; the pre-transaction snapshot is restored if the handle is
/// dropped before [`StoreTx::commit`].
struct MemoryTx {
    guard: OwnedMutexGuard<MemoryState>,
    snapshot: Option<MemoryState>,
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            debug!("memory store transaction rolled back");
            *self.guard = snapshot;
        }
    }
}

#[async_trait]
impl StoreTx for MemoryTx {
    async fn find_department(&mut self, id: Uuid) -> Result<Option<Department>, StoreError> {
        Ok(self.guard.departments.get(&id).cloned())
    }

    async fn find_patient_by_account(
        &mut self,
        account_id: Uuid,
    ) -> Result<Option<Patient>, StoreError> {
        Ok(self
            .guard
            .patients
            .values()
            .find(|p| p.account_id == account_id)
            .cloned())
    }

    async fn registrations_for_slot(
        &mut self,
        slot: &SlotKey,
    ) -> Result<Vec<Registration>, StoreError> {
        Ok(self
            .guard
            .registrations
            .values()
            .filter(|r| r.matches_slot(slot))
            .cloned()
            .collect())
    }

    async fn find_schedule_for_slot(
        &mut self,
        slot: &SlotKey,
    ) -> Result<Option<DepartmentSchedule>, StoreError> {
        Ok(self
            .guard
            .schedules
            .values()
            .find(|s| {
                s.department_id == slot.department_id
                    && s.year == slot.year
                    && s.month == slot.month
                    && s.day == slot.day
                    && s.half_day == slot.half_day
            })
            .cloned())
    }

    async fn doctors_by_department(
        &mut self,
        department_id: Uuid,
    ) -> Result<Vec<Doctor>, StoreError> {
        Ok(self
            .guard
            .doctors
            .values()
            .filter(|d| d.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn insert_registration(
        &mut self,
        registration: &Registration,
    ) -> Result<(), StoreError> {
        if self.guard.registrations.contains_key(&registration.id) {
            return Err(StoreError::Backend(format!(
                "registration {} already exists",
                registration.id
            )));
        }
        self.guard
            .registrations
            .insert(registration.id, registration.clone());
        Ok(())
    }

    async fn save_schedule(&mut self, schedule: &DepartmentSchedule) -> Result<(), StoreError> {
        self.guard.schedules.insert(schedule.id, schedule.clone());
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        self.snapshot = None;
        debug!("memory store transaction committed");
        Ok(())
    }
}
