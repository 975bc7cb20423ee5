// ── Domain model ──
//
// Types shared between the daemon contract and the client core. All of
// these cross the IPC boundary and therefore derive serde.

pub mod account;
pub mod device;
pub mod relay;
pub mod settings;
pub mod shell;
pub mod tunnel;
pub mod version;

pub use account::{AccountData, AccountNumber};
pub use device::{
    AccountAndDevice, Device, DeviceEvent, DeviceEventCause, DeviceId, DeviceState,
};
pub use relay::{RelayCity, RelayCountry, RelayList};
pub use settings::{
    BridgeState, LocationConstraint, ObfuscationMode, RelayConstraints, Settings, TunnelProtocol,
};
pub use shell::{GuiSettings, WindowShape};
pub use tunnel::{
    ActionAfterDisconnect, ErrorState, ErrorStateCause, FeatureIndicator, GeoLocation,
    TunnelState,
};
pub use version::AppVersionInfo;
