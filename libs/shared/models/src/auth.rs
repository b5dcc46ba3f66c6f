use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::records::AccountType;

/// The authenticated caller, as established by the gateway in front of this
/// service. Handlers receive it from request extensions; nothing in this
/// workspace verifies credentials itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub account_id: Uuid,
    pub account_type: AccountType,
}

impl AuthUser {
    pub fn new(account_id: Uuid, account_type: AccountType) -> Self {
        Self {
            account_id,
            account_type,
        }
    }
}
