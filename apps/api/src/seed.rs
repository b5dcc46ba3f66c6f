use chrono::{Datelike, Days, Utc};
use tracing::info;
use uuid::Uuid;

use shared_models::records::{
    Account, AccountType, Department, DepartmentSchedule, Doctor, HalfDay, Patient,
};
use shared_store::MemoryStore;

/// Populate the in-memory store with a small demo directory: two departments,
/// a handful of staff, one demo patient, and open schedules for the next
/// seven days. Enabled with SEED_DEMO_DATA=true.
pub async fn seed_demo_data(store: &MemoryStore) {
    let departments = [
        ("Cardiology", "Heart and vascular care"),
        ("Dermatology", "Skin, hair and nail care"),
    ];

    let patient_account = Account {
        id: Uuid::new_v4(),
        email: "demo.patient@example.com".to_string(),
        first_name: "Demo".to_string(),
        last_name: "Patient".to_string(),
        account_type: AccountType::Patient,
    };
    info!(
        "Seeding demo patient account {} ({})",
        patient_account.id, patient_account.email
    );
    store
        .insert_patient(Patient {
            id: Uuid::new_v4(),
            account_id: patient_account.id,
        })
        .await;
    store.insert_account(patient_account).await;

    for (name, detail) in departments {
        let department = Department {
            id: Uuid::new_v4(),
            name: name.to_string(),
            detail: detail.to_string(),
        };
        info!("Seeding department {} ({})", name, department.id);

        for i in 1..=2 {
            let account = Account {
                id: Uuid::new_v4(),
                email: format!("doctor{}.{}@example.com", i, name.to_lowercase()),
                first_name: format!("Doctor{}", i),
                last_name: name.to_string(),
                account_type: AccountType::Doctor,
            };
            store
                .insert_doctor(Doctor {
                    id: Uuid::new_v4(),
                    account_id: account.id,
                    department_id: department.id,
                })
                .await;
            store.insert_account(account).await;
        }

        let today = Utc::now().date_naive();
        for offset in 0..7 {
            let date = today + Days::new(offset);
            for half_day in [HalfDay::Morning, HalfDay::Afternoon] {
                store
                    .insert_schedule(DepartmentSchedule {
                        id: Uuid::new_v4(),
                        department_id: department.id,
                        year: date.year(),
                        month: date.month(),
                        day: date.day(),
                        half_day,
                        capacity: 20,
                        current: 0,
                    })
                    .await;
            }
        }

        store.insert_department(department).await;
    }

    info!("Demo data seeded");
}
