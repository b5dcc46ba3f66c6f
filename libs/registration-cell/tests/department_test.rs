// libs/registration-cell/tests/department_test.rs
mod common;

use assert_matches::assert_matches;
use uuid::Uuid;

use registration_cell::models::RegistrationError;
use registration_cell::services::department::DepartmentService;
use shared_models::records::AccountType;
use shared_utils::test_utils::{test_account, test_department, test_doctor};

use common::clinic;

#[tokio::test]
async fn lists_all_departments() {
    let clinic = clinic(1, 5).await;
    clinic
        .store
        .insert_department(test_department("Dermatology"))
        .await;

    let service = DepartmentService::new(clinic.dyn_store());
    let departments = service.list_departments().await.unwrap();
    assert_eq!(departments.len(), 2);
}

#[tokio::test]
async fn unknown_department_detail_is_rejected() {
    let clinic = clinic(1, 5).await;
    let service = DepartmentService::new(clinic.dyn_store());

    let result = service.department_detail(Uuid::new_v4()).await;
    assert_matches!(result, Err(RegistrationError::DepartmentNotFound));
}

#[tokio::test]
async fn detail_joins_schedules_and_doctor_names() {
    let clinic = clinic(2, 5).await;
    let service = DepartmentService::new(clinic.dyn_store());

    let detail = service.department_detail(clinic.department.id).await.unwrap();
    assert_eq!(detail.id, clinic.department.id);
    assert_eq!(detail.name, clinic.department.name);
    assert_eq!(detail.schedules.len(), 1);
    assert_eq!(detail.doctors.len(), 2);
    for (account, _) in &clinic.doctors {
        assert!(detail.doctors.contains(&account.display_name()));
    }
}

#[tokio::test]
async fn doctors_without_account_records_are_skipped() {
    let clinic = clinic(1, 5).await;

    // directory drift: a doctor row whose account is gone
    let orphan_account = test_account("Gone", "Away", AccountType::Doctor);
    clinic
        .store
        .insert_doctor(test_doctor(orphan_account.id, clinic.department.id))
        .await;

    let service = DepartmentService::new(clinic.dyn_store());
    let detail = service.department_detail(clinic.department.id).await.unwrap();
    assert_eq!(detail.doctors.len(), 1);
}

#[tokio::test]
async fn detail_reads_are_idempotent() {
    let clinic = clinic(3, 5).await;
    let service = DepartmentService::new(clinic.dyn_store());

    let first = service.department_detail(clinic.department.id).await.unwrap();
    let second = service.department_detail(clinic.department.id).await.unwrap();
    assert_eq!(first.doctors, second.doctors);
    assert_eq!(
        first.schedules.iter().map(|s| s.id).collect::<Vec<_>>(),
        second.schedules.iter().map(|s| s.id).collect::<Vec<_>>()
    );
}
