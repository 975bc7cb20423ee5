// ── Core error types ──
//
// Errors the controller surfaces to its embedder. Command rejections from
// the daemon are not errors at this level -- they resolve to notices and a
// well-defined controller state, never a dead controller.

use thiserror::Error;
use warden_ipc::IpcError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The controller actor has shut down; the handle is stale.
    #[error("Controller is no longer running")]
    ControllerGone,

    /// A daemon call failed in a context where there is no recovery flow.
    #[error("Daemon call failed: {0}")]
    Ipc(#[from] IpcError),

    /// A saved navigation snapshot could not be decoded.
    #[error("Invalid navigation snapshot: {0}")]
    InvalidSnapshot(String),
}
