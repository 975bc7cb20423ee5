// ── Route resolution ──
//
// Two pure, total functions. `base_route` maps the reconciled view to the
// screen the user should see; `transition_between` picks the stack
// operation for any (from, to) pair. Both are plain matches so an
// unhandled combination is a compile error, not a runtime fallback.

use warden_ipc::DeviceState;

use crate::sequencer::LoginSequence;
use crate::store::ExpiryStatus;

use super::route::{Route, TransitionKind};

/// The screen warranted by the current reconciled state.
///
/// An absent device state (daemon connected but no device report yet) is
/// treated as logged out.
pub fn base_route(
    connected_to_daemon: bool,
    device_state: Option<&DeviceState>,
    login: LoginSequence,
    expiry: ExpiryStatus,
) -> Route {
    if !connected_to_daemon {
        return Route::Launch;
    }
    if matches!(device_state, Some(DeviceState::Revoked)) {
        return Route::DeviceRevoked;
    }
    if matches!(login, LoginSequence::TooManyDevices) {
        return Route::TooManyDevices;
    }
    match device_state {
        Some(DeviceState::LoggedIn(_)) => match expiry {
            ExpiryStatus::Expired => Route::Expired,
            ExpiryStatus::TimeAdded => Route::TimeAdded,
            ExpiryStatus::None => Route::Main,
        },
        Some(DeviceState::LoggedOut) | Some(DeviceState::Revoked) | None => Route::Login,
    }
}

/// The transition for entering `to` from `from`, keyed by destination with
/// an explicit fallback arm per destination.
pub fn transition_between(from: Route, to: Route) -> TransitionKind {
    match to {
        Route::Launch => match from {
            Route::Login | Route::Main => TransitionKind::Pop,
            _ => TransitionKind::Dismiss,
        },
        Route::Login => match from {
            Route::Launch => TransitionKind::Push,
            Route::Main | Route::DeviceRevoked => TransitionKind::Pop,
            _ => TransitionKind::Dismiss,
        },
        Route::TooManyDevices => match from {
            Route::Login => TransitionKind::Push,
            _ => TransitionKind::Dismiss,
        },
        Route::DeviceRevoked => TransitionKind::Pop,
        Route::Main => match from {
            Route::Launch | Route::Login | Route::TooManyDevices => TransitionKind::Push,
            _ => TransitionKind::Dismiss,
        },
        Route::Expired => match from {
            Route::Launch | Route::Login | Route::Main => TransitionKind::Push,
            _ => TransitionKind::Dismiss,
        },
        Route::TimeAdded => match from {
            Route::Launch | Route::Login | Route::Main | Route::Expired => TransitionKind::Push,
            _ => TransitionKind::Dismiss,
        },
    }
}
