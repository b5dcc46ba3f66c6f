#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Datelike, Days, Utc};
use uuid::Uuid;

use registration_cell::models::CreateRegistrationRequest;
use shared_models::auth::AuthUser;
use shared_models::records::{
    Account, AccountType, Department, DepartmentSchedule, Doctor, HalfDay, Patient,
    Registration, RegistrationStatus, SlotKey,
};
use shared_store::{MemoryStore, Store};
use shared_utils::test_utils::{
    test_account, test_department, test_doctor, test_patient, test_schedule,
};

/// One seeded department with a bookable schedule thirty days out, one
/// patient, and a configurable number of doctors.
pub struct TestClinic {
    pub store: Arc<MemoryStore>,
    pub department: Department,
    pub schedule: DepartmentSchedule,
    pub patient_account: Account,
    pub patient: Patient,
    pub doctors: Vec<(Account, Doctor)>,
}

pub async fn clinic(doctor_count: usize, capacity: u32) -> TestClinic {
    let store = Arc::new(MemoryStore::new());

    let department = test_department("Cardiology");
    store.insert_department(department.clone()).await;

    let date = Utc::now().date_naive() + Days::new(30);
    let schedule = test_schedule(
        department.id,
        date.year(),
        date.month(),
        date.day(),
        HalfDay::Morning,
        capacity,
    );
    store.insert_schedule(schedule.clone()).await;

    let patient_account = test_account("Alice", "Zhang", AccountType::Patient);
    let patient = test_patient(patient_account.id);
    store.insert_account(patient_account.clone()).await;
    store.insert_patient(patient.clone()).await;

    let mut doctors = Vec::new();
    for i in 0..doctor_count {
        let account = test_account(&format!("Doc{}", i), "Li", AccountType::Doctor);
        let doctor = test_doctor(account.id, department.id);
        store.insert_account(account.clone()).await;
        store.insert_doctor(doctor.clone()).await;
        doctors.push((account, doctor));
    }

    TestClinic {
        store,
        department,
        schedule,
        patient_account,
        patient,
        doctors,
    }
}

impl TestClinic {
    pub fn dyn_store(&self) -> Arc<dyn Store> {
        self.store.clone()
    }

    pub fn patient_caller(&self) -> AuthUser {
        AuthUser::new(self.patient_account.id, AccountType::Patient)
    }

    pub fn doctor_caller(&self, index: usize) -> AuthUser {
        let (account, _) = &self.doctors[index];
        AuthUser::new(account.id, AccountType::Doctor)
    }

    pub fn doctor_caller_by_id(&self, doctor_id: Uuid) -> AuthUser {
        let (account, _) = self
            .doctors
            .iter()
            .find(|(_, d)| d.id == doctor_id)
            .expect("doctor id not part of this clinic");
        AuthUser::new(account.id, AccountType::Doctor)
    }

    pub fn slot(&self) -> SlotKey {
        SlotKey {
            department_id: self.department.id,
            year: self.schedule.year,
            month: self.schedule.month,
            day: self.schedule.day,
            half_day: self.schedule.half_day,
        }
    }

    pub fn booking_request(&self) -> CreateRegistrationRequest {
        CreateRegistrationRequest {
            department_id: self.department.id,
            year: self.schedule.year,
            month: self.schedule.month,
            day: self.schedule.day,
            half_day: self.schedule.half_day,
        }
    }

    /// Current occupancy of the fixture schedule, read back from the store.
    pub async fn current_occupancy(&self) -> u32 {
        self.store
            .schedules_by_department(self.department.id)
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.id == self.schedule.id)
            .unwrap()
            .current
    }

    /// Add another patient to the directory and return a caller for them.
    pub async fn add_patient(&self, first_name: &str) -> (Patient, AuthUser) {
        let account = test_account(first_name, "Wang", AccountType::Patient);
        let patient = test_patient(account.id);
        self.store.insert_account(account.clone()).await;
        self.store.insert_patient(patient.clone()).await;
        (patient, AuthUser::new(account.id, AccountType::Patient))
    }
}

/// A pre-existing registration row, for seeding doctor loads directly.
pub fn registration_row(
    slot: &SlotKey,
    patient_id: Uuid,
    doctor_id: Uuid,
    status: RegistrationStatus,
) -> Registration {
    Registration {
        id: Uuid::new_v4(),
        department_id: slot.department_id,
        patient_id,
        doctor_id,
        year: slot.year,
        month: slot.month,
        day: slot.day,
        half_day: slot.half_day,
        status,
        terminated_cause: None,
        created_at: Utc::now(),
    }
}
