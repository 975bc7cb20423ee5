// ── Tunnel state ──

use serde::{Deserialize, Serialize};

/// Where the tunnel endpoint (or the client, when disconnected) is located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub country: String,
    pub city: Option<String>,
    pub hostname: Option<String>,
}

/// Features the daemon reports as active for the current tunnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FeatureIndicator {
    QuantumResistance,
    Multihop,
    SplitTunneling,
    LockdownMode,
    LanSharing,
    ServerIpOverride,
    CustomDns,
    CustomMtu,
}

/// What the daemon does once the tunnel is fully down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionAfterDisconnect {
    Nothing,
    Block,
    Reconnect,
}

/// Why the tunnel entered the error state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorStateCause {
    AuthFailed(Option<String>),
    Ipv6Unavailable,
    SetFirewallPolicyError,
    SetDnsError,
    StartTunnelError,
    TunnelParameterError,
    IsOffline,
}

/// Tunnel error state. `is_blocking` reports whether the firewall is
/// successfully blocking leaks while in this state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorState {
    pub cause: ErrorStateCause,
    pub is_blocking: bool,
}

/// The daemon's view of the tunnel, pushed on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TunnelState {
    Disconnected {
        location: Option<GeoLocation>,
        /// Lockdown mode keeps the firewall up even with the tunnel down.
        locked_down: bool,
    },
    Connecting {
        location: Option<GeoLocation>,
        feature_indicators: Vec<FeatureIndicator>,
    },
    Connected {
        location: Option<GeoLocation>,
        feature_indicators: Vec<FeatureIndicator>,
    },
    Disconnecting {
        after_disconnect: ActionAfterDisconnect,
    },
    Error(ErrorState),
}

impl TunnelState {
    pub fn is_connected(&self) -> bool {
        matches!(self, TunnelState::Connected { .. })
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, TunnelState::Disconnected { .. })
    }

    /// Whether traffic is currently firewalled off from the open network.
    /// True while securing/secured, in lockdown without a tunnel, and in any
    /// error state (a non-blocking error still leaves no usable tunnel).
    pub fn is_blocked(&self) -> bool {
        match self {
            TunnelState::Disconnected { locked_down, .. } => *locked_down,
            TunnelState::Connecting { .. } => true,
            TunnelState::Connected { .. } => false,
            TunnelState::Disconnecting { after_disconnect } => {
                matches!(after_disconnect, ActionAfterDisconnect::Block)
            }
            TunnelState::Error(_) => true,
        }
    }

    pub fn location(&self) -> Option<&GeoLocation> {
        match self {
            TunnelState::Disconnected { location, .. }
            | TunnelState::Connecting { location, .. }
            | TunnelState::Connected { location, .. } => location.as_ref(),
            TunnelState::Disconnecting { .. } | TunnelState::Error(_) => None,
        }
    }
}

impl Default for TunnelState {
    fn default() -> Self {
        TunnelState::Disconnected {
            location: None,
            locked_down: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_states() {
        assert!(!TunnelState::default().is_blocked());
        assert!(
            TunnelState::Disconnected {
                location: None,
                locked_down: true,
            }
            .is_blocked()
        );
        assert!(
            TunnelState::Connecting {
                location: None,
                feature_indicators: Vec::new(),
            }
            .is_blocked()
        );
        assert!(
            !TunnelState::Connected {
                location: None,
                feature_indicators: Vec::new(),
            }
            .is_blocked()
        );
        // A non-blocking error still means no usable tunnel.
        assert!(
            TunnelState::Error(ErrorState {
                cause: ErrorStateCause::SetDnsError,
                is_blocking: false,
            })
            .is_blocked()
        );
    }

    #[test]
    fn location_is_only_reported_while_routable() {
        let location = GeoLocation {
            country: "Sweden".to_owned(),
            city: Some("Gothenburg".to_owned()),
            hostname: None,
        };
        let connected = TunnelState::Connected {
            location: Some(location.clone()),
            feature_indicators: Vec::new(),
        };
        assert_eq!(connected.location(), Some(&location));

        let disconnecting = TunnelState::Disconnecting {
            after_disconnect: ActionAfterDisconnect::Nothing,
        };
        assert_eq!(disconnecting.location(), None);
    }
}
