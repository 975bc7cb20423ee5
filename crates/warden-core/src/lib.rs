// warden-core: Event reconciliation and navigation for the Warden client.
//
// Consumes the daemon/shell event stream from warden-ipc, reconciles it
// into a single in-memory view, and decides which screen the user sees.

pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod scheduler;
pub mod sequencer;
pub mod store;

mod expiry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ControllerOptions;
pub use controller::{AppController, AppControllerHandle, AppNotice, LoginFailure};
pub use error::CoreError;
pub use navigation::{
    HistorySnapshot, NavigationHistory, NavigationUpdate, Route, TransitionKind,
};
pub use scheduler::{Scheduler, TimerToken};
pub use sequencer::LoginSequence;
pub use store::{AppState, ExpiryStatus};
