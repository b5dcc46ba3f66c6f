// libs/registration-cell/src/services/lifecycle.rs
use tracing::debug;

use shared_models::records::{AccountType, RegistrationStatus};

/// Lifecycle rules for a registration.
///
/// States run `committed -> accepted -> terminated`, with `terminated` the
/// only terminal state. Which moves are legal depends on who is asking:
///
/// | from      | actor   | to         | extra                  |
/// |-----------|---------|------------|------------------------|
/// | committed | patient | terminated |                        |
/// | committed | doctor  | accepted   |                        |
/// | committed | doctor  | terminated | non-empty cause        |
/// | accepted  | doctor  | terminated |                        |
///
/// Ownership (the actor being *the* patient/doctor on the registration) is
/// checked by the caller; this table only rules on (status, role, target).
pub struct RegistrationLifecycleService;

impl RegistrationLifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn transition_allowed(
        &self,
        current: RegistrationStatus,
        actor: AccountType,
        target: RegistrationStatus,
        has_cause: bool,
    ) -> bool {
        debug!(
            "Validating status transition {} -> {} by {}",
            current, target, actor
        );

        match (current, actor, target) {
            (RegistrationStatus::Committed, AccountType::Patient, RegistrationStatus::Terminated) => {
                true
            }
            (RegistrationStatus::Committed, AccountType::Doctor, RegistrationStatus::Accepted) => {
                true
            }
            (RegistrationStatus::Committed, AccountType::Doctor, RegistrationStatus::Terminated) => {
                has_cause
            }
            (RegistrationStatus::Accepted, AccountType::Doctor, RegistrationStatus::Terminated) => {
                true
            }
            _ => false,
        }
    }

    /// All targets the given actor may move a registration to from `current`.
    pub fn valid_transitions(
        &self,
        current: RegistrationStatus,
        actor: AccountType,
    ) -> Vec<RegistrationStatus> {
        [
            RegistrationStatus::Committed,
            RegistrationStatus::Accepted,
            RegistrationStatus::Terminated,
        ]
        .into_iter()
        .filter(|target| self.transition_allowed(current, actor, *target, true))
        .collect()
    }
}

impl Default for RegistrationLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
