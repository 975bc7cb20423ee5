// ── App version info ──

use serde::{Deserialize, Serialize};

/// Version support status pushed by the daemon's version check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVersionInfo {
    /// Whether the running version is still supported by the API.
    pub supported: bool,
    /// Version string the user should upgrade to, if any.
    pub suggested_upgrade: Option<String>,
}
