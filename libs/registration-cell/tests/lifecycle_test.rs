// libs/registration-cell/tests/lifecycle_test.rs
mod common;

use assert_matches::assert_matches;
use uuid::Uuid;

use registration_cell::models::RegistrationError;
use registration_cell::services::scheduler::RegistrationSchedulerService;
use shared_models::auth::AuthUser;
use shared_models::records::{AccountType, RegistrationStatus};
use shared_store::Store;
use shared_utils::test_utils::{test_account, test_doctor};

use common::{clinic, TestClinic};

/// Book the fixture slot and return (registration id, assigned doctor caller).
async fn booked(clinic: &TestClinic) -> (Uuid, AuthUser) {
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let registration_id = service
        .create_registration(&clinic.patient_caller(), clinic.booking_request())
        .await
        .unwrap();
    let registration = clinic
        .store
        .find_registration(registration_id)
        .await
        .unwrap()
        .unwrap();
    (
        registration_id,
        clinic.doctor_caller_by_id(registration.doctor_id),
    )
}

async fn status_of(clinic: &TestClinic, registration_id: Uuid) -> RegistrationStatus {
    clinic
        .store
        .find_registration(registration_id)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
async fn assigned_doctor_accepts_committed_registration() {
    let clinic = clinic(2, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, doctor) = booked(&clinic).await;

    service
        .update_registration_status(&doctor, registration_id, RegistrationStatus::Accepted, None)
        .await
        .unwrap();
    assert_eq!(
        status_of(&clinic, registration_id).await,
        RegistrationStatus::Accepted
    );
}

#[tokio::test]
async fn patient_cannot_accept() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, _) = booked(&clinic).await;

    let result = service
        .update_registration_status(
            &clinic.patient_caller(),
            registration_id,
            RegistrationStatus::Accepted,
            None,
        )
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationUpdateFailed));
    assert_eq!(
        status_of(&clinic, registration_id).await,
        RegistrationStatus::Committed
    );
}

#[tokio::test]
async fn owning_patient_terminates_committed_registration() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, _) = booked(&clinic).await;

    service
        .update_registration_status(
            &clinic.patient_caller(),
            registration_id,
            RegistrationStatus::Terminated,
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        status_of(&clinic, registration_id).await,
        RegistrationStatus::Terminated
    );
}

#[tokio::test]
async fn doctor_termination_without_cause_fails() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, doctor) = booked(&clinic).await;

    let result = service
        .update_registration_status(
            &doctor,
            registration_id,
            RegistrationStatus::Terminated,
            None,
        )
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationUpdateFailed));

    let blank = service
        .update_registration_status(
            &doctor,
            registration_id,
            RegistrationStatus::Terminated,
            Some("   ".to_string()),
        )
        .await;
    assert_matches!(blank, Err(RegistrationError::RegistrationUpdateFailed));
    assert_eq!(
        status_of(&clinic, registration_id).await,
        RegistrationStatus::Committed
    );
}

#[tokio::test]
async fn doctor_termination_with_cause_persists_it() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, doctor) = booked(&clinic).await;

    service
        .update_registration_status(
            &doctor,
            registration_id,
            RegistrationStatus::Terminated,
            Some("patient transferred".to_string()),
        )
        .await
        .unwrap();

    let registration = clinic
        .store
        .find_registration(registration_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Terminated);
    assert_eq!(
        registration.terminated_cause.as_deref(),
        Some("patient transferred")
    );
}

#[tokio::test]
async fn doctor_terminates_accepted_registration_without_cause() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, doctor) = booked(&clinic).await;

    service
        .update_registration_status(&doctor, registration_id, RegistrationStatus::Accepted, None)
        .await
        .unwrap();
    service
        .update_registration_status(
            &doctor,
            registration_id,
            RegistrationStatus::Terminated,
            None,
        )
        .await
        .unwrap();

    let registration = clinic
        .store
        .find_registration(registration_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Terminated);
    assert_eq!(registration.terminated_cause, None);
}

#[tokio::test]
async fn patient_cannot_terminate_accepted_registration() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, doctor) = booked(&clinic).await;

    service
        .update_registration_status(&doctor, registration_id, RegistrationStatus::Accepted, None)
        .await
        .unwrap();

    let result = service
        .update_registration_status(
            &clinic.patient_caller(),
            registration_id,
            RegistrationStatus::Terminated,
            None,
        )
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationUpdateFailed));
}

#[tokio::test]
async fn terminated_registration_admits_no_further_moves() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, doctor) = booked(&clinic).await;

    service
        .update_registration_status(
            &clinic.patient_caller(),
            registration_id,
            RegistrationStatus::Terminated,
            None,
        )
        .await
        .unwrap();

    let result = service
        .update_registration_status(&doctor, registration_id, RegistrationStatus::Accepted, None)
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationUpdateFailed));
}

#[tokio::test]
async fn non_assigned_doctor_cannot_transition() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, _) = booked(&clinic).await;

    // a doctor from the same department who is not on the registration
    let account = test_account("Devi", "Kumar", AccountType::Doctor);
    let doctor = test_doctor(account.id, clinic.department.id);
    clinic.store.insert_account(account.clone()).await;
    clinic.store.insert_doctor(doctor).await;
    let outsider = AuthUser::new(account.id, AccountType::Doctor);

    let result = service
        .update_registration_status(
            &outsider,
            registration_id,
            RegistrationStatus::Accepted,
            None,
        )
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationUpdateFailed));
}

#[tokio::test]
async fn admin_cannot_transition() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, _) = booked(&clinic).await;

    let account = test_account("Ada", "Min", AccountType::Admin);
    clinic.store.insert_account(account.clone()).await;
    let admin = AuthUser::new(account.id, AccountType::Admin);

    let result = service
        .update_registration_status(
            &admin,
            registration_id,
            RegistrationStatus::Terminated,
            Some("cleanup".to_string()),
        )
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationUpdateFailed));
}

#[tokio::test]
async fn unknown_account_is_rejected() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());
    let (registration_id, _) = booked(&clinic).await;

    let ghost = AuthUser::new(Uuid::new_v4(), AccountType::Patient);
    let result = service
        .update_registration_status(
            &ghost,
            registration_id,
            RegistrationStatus::Terminated,
            None,
        )
        .await;
    assert_matches!(result, Err(RegistrationError::AccountNotFound));
}

#[tokio::test]
async fn unknown_registration_is_rejected() {
    let clinic = clinic(1, 5).await;
    let service = RegistrationSchedulerService::new(clinic.dyn_store());

    let result = service
        .update_registration_status(
            &clinic.patient_caller(),
            Uuid::new_v4(),
            RegistrationStatus::Terminated,
            None,
        )
        .await;
    assert_matches!(result, Err(RegistrationError::RegistrationNotFound));
}
