// libs/shared/models/src/records.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// DIRECTORY RECORDS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
    pub detail: String,
}

/// Account type is a closed enumeration; role checks match on it exhaustively.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Patient,
    Doctor,
    Admin,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Patient => write!(f, "patient"),
            AccountType::Doctor => write!(f, "doctor"),
            AccountType::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub account_type: AccountType,
}

impl Account {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub account_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub account_id: Uuid,
    pub department_id: Uuid,
}

// ==============================================================================
// SCHEDULING RECORDS
// ==============================================================================

/// One of the two bookable periods per calendar day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HalfDay {
    Morning,
    Afternoon,
}

impl fmt::Display for HalfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalfDay::Morning => write!(f, "morning"),
            HalfDay::Afternoon => write!(f, "afternoon"),
        }
    }
}

/// Capacity record for a department on a specific date and half-day slot.
/// Invariant: `0 <= current <= capacity`. Mutated only inside the booking
/// transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentSchedule {
    pub id: Uuid,
    pub department_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub half_day: HalfDay,
    pub capacity: u32,
    pub current: u32,
}

impl DepartmentSchedule {
    /// The calendar date of this slot, if the stored year/month/day form one.
    pub fn slot_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Committed,
    Accepted,
    Terminated,
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationStatus::Committed => write!(f, "committed"),
            RegistrationStatus::Accepted => write!(f, "accepted"),
            RegistrationStatus::Terminated => write!(f, "terminated"),
        }
    }
}

/// A booking owned jointly by exactly one patient and one doctor. Both are
/// assigned at creation and never change; the record itself is never deleted,
/// only its status moves through the lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub department_id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub half_day: HalfDay,
    pub status: RegistrationStatus,
    pub terminated_cause: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn is_terminated(&self) -> bool {
        self.status == RegistrationStatus::Terminated
    }

    /// True when this registration occupies the given slot.
    pub fn matches_slot(&self, slot: &SlotKey) -> bool {
        self.department_id == slot.department_id
            && self.year == slot.year
            && self.month == slot.month
            && self.day == slot.day
            && self.half_day == slot.half_day
    }
}

/// Identifies one bookable slot: a department on a date and half-day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotKey {
    pub department_id: Uuid,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub half_day: HalfDay,
}

impl SlotKey {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

/// A doctor-recorded progress note attached to a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MileStone {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub activity: String,
    pub checked: bool,
}
