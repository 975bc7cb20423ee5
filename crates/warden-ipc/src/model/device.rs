// ── Device and login state ──
//
// A "device" is one installation of the app registered on an account. The
// daemon owns the authoritative login state and pushes `DeviceEvent`s on
// every change, whether caused by this client or another session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account number, handled as an opaque token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountNumber(pub String);

impl From<&str> for AccountNumber {
    fn from(value: &str) -> Self {
        AccountNumber(value.to_owned())
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique id the API assigns to a registered device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A device registered on an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub created: DateTime<Utc>,
}

/// The account and device this client is logged in as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountAndDevice {
    pub account_number: AccountNumber,
    pub device: Device,
}

/// Login state as reported by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceState {
    LoggedIn(AccountAndDevice),
    LoggedOut,
    /// The device was removed from the account (e.g. from another session or
    /// the web interface) and the user must acknowledge before logging in
    /// again.
    Revoked,
}

impl DeviceState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, DeviceState::LoggedIn(_))
    }

    pub fn logged_in(&self) -> Option<&AccountAndDevice> {
        match self {
            DeviceState::LoggedIn(account) => Some(account),
            DeviceState::LoggedOut | DeviceState::Revoked => None,
        }
    }
}

/// What caused a device event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceEventCause {
    LoggedIn,
    LoggedOut,
    Revoked,
    /// Device metadata was refreshed from the API.
    Updated,
    RotatedKey,
}

/// Pushed by the daemon whenever the login state changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub cause: DeviceEventCause,
    pub new_state: DeviceState,
}

impl DeviceEvent {
    pub fn new(cause: DeviceEventCause, new_state: DeviceState) -> Self {
        Self { cause, new_state }
    }
}
