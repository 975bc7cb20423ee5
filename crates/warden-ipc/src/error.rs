// ── IPC error types ──
//
// Daemon command rejections as seen by the client. Only `TooManyDevices`
// gets dedicated routing in the login flow; every other login rejection is
// treated uniformly by the controller.

use thiserror::Error;

/// Errors surfaced by daemon commands.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IpcError {
    /// The account has reached its device limit. The caller must remove a
    /// device before login can complete.
    #[error("Account has too many devices")]
    TooManyDevices,

    #[error("Invalid account number")]
    InvalidAccount,

    #[error("A device is already logged in")]
    AlreadyLoggedIn,

    #[error("No such device")]
    DeviceNotFound,

    /// Opaque daemon or transport failure.
    #[error("Daemon call failed: {0}")]
    Rpc(String),

    /// The event channel to the daemon has shut down.
    #[error("Daemon channel closed")]
    ChannelClosed,
}

impl IpcError {
    /// Whether this error is the device-limit rejection that triggers the
    /// device-picker flow.
    pub fn is_too_many_devices(&self) -> bool {
        matches!(self, IpcError::TooManyDevices)
    }
}
