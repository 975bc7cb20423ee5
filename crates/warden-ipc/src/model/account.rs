// ── Account data ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use super::device::AccountNumber;

/// Account status fetched from the API via the daemon. The expiry drives
/// the client's expired/time-added screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub id: String,
    pub expiry: DateTime<Utc>,
}
