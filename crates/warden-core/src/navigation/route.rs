// ── Routes and transition kinds ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A named screen in the client's navigation graph.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Shown while no daemon session exists.
    #[default]
    Launch,
    Login,
    /// Device picker for the device-limit flow.
    TooManyDevices,
    /// This device was removed from the account elsewhere.
    DeviceRevoked,
    /// The connect screen.
    Main,
    Expired,
    /// Transient screen after time was added to an expired account.
    TimeAdded,
}

impl Route {
    /// All routes, for exhaustiveness checks.
    pub const ALL: [Route; 7] = [
        Self::Launch,
        Self::Login,
        Self::TooManyDevices,
        Self::DeviceRevoked,
        Self::Main,
        Self::Expired,
        Self::TimeAdded,
    ];
}

/// The stack operation (and animation category) applied when moving
/// between routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TransitionKind {
    /// Slide a new screen on top of the stack.
    Push,
    /// Return to an earlier screen in the stack.
    Pop,
    /// Collapse the stack onto the target with a modal-style dismissal.
    Dismiss,
}
