use uuid::Uuid;

use shared_models::records::{
    Account, AccountType, Department, DepartmentSchedule, Doctor, HalfDay, Patient,
};

// Record builders shared by the cell test suites. Ids are fresh v4 UUIDs so
// fixtures never collide across tests.

pub fn test_department(name: &str) -> Department {
    Department {
        id: Uuid::new_v4(),
        name: name.to_string(),
        detail: format!("{} department", name),
    }
}

pub fn test_schedule(
    department_id: Uuid,
    year: i32,
    month: u32,
    day: u32,
    half_day: HalfDay,
    capacity: u32,
) -> DepartmentSchedule {
    DepartmentSchedule {
        id: Uuid::new_v4(),
        department_id,
        year,
        month,
        day,
        half_day,
        capacity,
        current: 0,
    }
}

pub fn test_account(first_name: &str, last_name: &str, account_type: AccountType) -> Account {
    Account {
        id: Uuid::new_v4(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        account_type,
    }
}

pub fn test_patient(account_id: Uuid) -> Patient {
    Patient {
        id: Uuid::new_v4(),
        account_id,
    }
}

pub fn test_doctor(account_id: Uuid, department_id: Uuid) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        account_id,
        department_id,
    }
}
