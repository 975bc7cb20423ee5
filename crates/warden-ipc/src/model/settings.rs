// ── Daemon settings snapshot ──
//
// The daemon pushes the whole settings bundle on every change; the client
// never merges partial updates.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TunnelProtocol {
    #[default]
    WireGuard,
    OpenVpn,
}

/// Relay location constraint. `Any` lets the daemon pick.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocationConstraint {
    #[default]
    Any,
    Country(String),
    City {
        country: String,
        city: String,
    },
    Hostname(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelayConstraints {
    pub location: LocationConstraint,
    pub tunnel_protocol: TunnelProtocol,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BridgeState {
    #[default]
    Auto,
    On,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObfuscationMode {
    #[default]
    Auto,
    Off,
    Udp2Tcp,
    Shadowsocks,
}

/// Complete daemon settings. Replaced wholesale on each settings event.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub relay_constraints: RelayConstraints,
    pub bridge_state: BridgeState,
    pub obfuscation_mode: ObfuscationMode,
    pub allow_lan: bool,
    pub auto_connect: bool,
    /// Keep the firewall up whenever the tunnel is down.
    pub lockdown_mode: bool,
    pub show_beta_releases: bool,
}
