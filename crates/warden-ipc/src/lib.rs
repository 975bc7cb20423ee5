// warden-ipc: Typed contract between the Warden client and its daemon.
//
// The transport (socket/pipe/gRPC) lives elsewhere; this crate defines the
// events the daemon pushes, the commands the client issues, and the domain
// model both sides agree on.

pub mod error;
pub mod event;
pub mod model;
pub mod rpc;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::IpcError;
pub use event::{DaemonEvent, GatewayEvent, ShellEvent};
pub use rpc::DaemonRpc;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Account / device
    AccountAndDevice, AccountData, AccountNumber, Device, DeviceEvent, DeviceEventCause,
    DeviceId, DeviceState,
    // Tunnel
    ActionAfterDisconnect, ErrorState, ErrorStateCause, FeatureIndicator, GeoLocation,
    TunnelState,
    // Settings
    BridgeState, LocationConstraint, ObfuscationMode, RelayConstraints, Settings,
    TunnelProtocol,
    // Relays
    RelayCity, RelayCountry, RelayList,
    // Version / shell
    AppVersionInfo, GuiSettings, WindowShape,
};
