// libs/shared/store/src/lib.rs
//
// Persistence seam for the registration backend. Services receive a
// `dyn Store` handle by injection; nothing reaches for a global connection.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use shared_models::records::{
    Account, Department, DepartmentSchedule, Doctor, MileStone, Patient, Registration, SlotKey,
};

pub mod memory;

pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(String),

    #[error("transaction aborted: {0}")]
    TxAborted(String),
}

/// Record store used by every service in the workspace.
///
/// Plain methods are point-in-time reads and single-row writes. Multi-step
/// booking work goes through [`Store::begin`], which hands out a
/// [`StoreTx`]. Implementations MUST give transactions serializable
/// isolation: two transactions over the same rows may not interleave their
/// read-check-write sequences. The in-memory implementation does this by
/// holding the dataset exclusively for the transaction's lifetime; a SQL
/// implementation would run at SERIALIZABLE or lock the rows it reads.
#[async_trait]
pub trait Store: Send + Sync {
    /// Open a transaction. Dropping the handle without calling
    /// [`StoreTx::commit`] discards every write made through it.
    async fn begin(&self) -> Result<Box<dyn StoreTx>, StoreError>;

    async fn departments(&self) -> Result<Vec<Department>, StoreError>;
    async fn find_department(&self, id: Uuid) -> Result<Option<Department>, StoreError>;
    async fn schedules_by_department(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<DepartmentSchedule>, StoreError>;
    async fn doctors_by_department(&self, department_id: Uuid)
        -> Result<Vec<Doctor>, StoreError>;

    async fn find_account(&self, id: Uuid) -> Result<Option<Account>, StoreError>;
    async fn find_patient(&self, id: Uuid) -> Result<Option<Patient>, StoreError>;
    async fn find_patient_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Patient>, StoreError>;
    async fn find_doctor_by_account(
        &self,
        account_id: Uuid,
    ) -> Result<Option<Doctor>, StoreError>;
    async fn find_doctor(&self, id: Uuid) -> Result<Option<Doctor>, StoreError>;

    async fn find_registration(&self, id: Uuid) -> Result<Option<Registration>, StoreError>;
    async fn registrations_by_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError>;
    async fn registrations_by_doctor(
        &self,
        doctor_id: Uuid,
    ) -> Result<Vec<Registration>, StoreError>;
    /// Upsert by id.
    async fn save_registration(&self, registration: &Registration) -> Result<(), StoreError>;

    async fn find_milestone(&self, id: Uuid) -> Result<Option<MileStone>, StoreError>;
    async fn milestones_by_registration(
        &self,
        registration_id: Uuid,
    ) -> Result<Vec<MileStone>, StoreError>;
    async fn insert_milestone(&self, milestone: &MileStone) -> Result<(), StoreError>;
    /// Upsert by id.
    async fn save_milestone(&self, milestone: &MileStone) -> Result<(), StoreError>;
    async fn delete_milestone(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Transactional view handed out by [`Store::begin`].
///
/// Reads observe earlier writes made through the same handle. All scans
/// return rows in ascending id order, so enumeration order is stable across
/// calls and across implementations.
#[async_trait]
pub trait StoreTx: Send {
    async fn find_department(&mut self, id: Uuid) -> Result<Option<Department>, StoreError>;
    async fn find_patient_by_account(
        &mut self,
        account_id: Uuid,
    ) -> Result<Option<Patient>, StoreError>;
    /// Every registration occupying the given slot, any status.
    async fn registrations_for_slot(
        &mut self,
        slot: &SlotKey,
    ) -> Result<Vec<Registration>, StoreError>;
    async fn find_schedule_for_slot(
        &mut self,
        slot: &SlotKey,
    ) -> Result<Option<DepartmentSchedule>, StoreError>;
    async fn doctors_by_department(
        &mut self,
        department_id: Uuid,
    ) -> Result<Vec<Doctor>, StoreError>;

    async fn insert_registration(&mut self, registration: &Registration)
        -> Result<(), StoreError>;
    async fn save_schedule(&mut self, schedule: &DepartmentSchedule) -> Result<(), StoreError>;

    /// Make the transaction's writes visible to everyone else.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
