// ── Event fan-in ──
//
// Every asynchronous signal the client controller reacts to, expressed as
// one message enum per source. Delivery order across kinds is not
// guaranteed; the controller tolerates any interleaving.

use crate::model::{
    AccountData, AccountNumber, AppVersionInfo, Device, DeviceEvent, GuiSettings, RelayList,
    Settings, TunnelState, WindowShape,
};

/// State pushed by the daemon over the management channel.
#[derive(Debug, Clone)]
pub enum DaemonEvent {
    TunnelState(TunnelState),
    Settings(Settings),
    RelayList(RelayList),
    AppVersionInfo(AppVersionInfo),
    CurrentVersion(String),
    Device(DeviceEvent),
    /// Devices registered on the given account, fetched on demand.
    DeviceList {
        account_number: AccountNumber,
        devices: Vec<Device>,
    },
    AccountData(AccountData),
    /// The most recently used account number, if any.
    AccountHistory(Option<AccountNumber>),
}

/// Signals from the windowing shell that embeds the client.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    GuiSettings(GuiSettings),
    AutoStart(bool),
    SplitTunnelApps(Vec<String>),
    WindowFocus(bool),
    WindowShape(WindowShape),
    /// The shell asks the client to return to its base screen.
    ResetNavigation,
    /// The shell asks the client to open a named screen (deep link, tray
    /// menu entry).
    OpenRoute(String),
}

/// The single stream the controller consumes.
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// A session with the daemon was established; initial state follows via
    /// the controller's startup fetch.
    Connected,
    /// The daemon went away; the client falls back to its launch screen
    /// until the session is re-established.
    Disconnected,
    Daemon(DaemonEvent),
    Shell(ShellEvent),
}
