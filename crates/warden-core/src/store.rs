// ── Reconciliation store ──
//
// The latest known value of each independent state facet, owned exclusively
// by the controller actor. One reducer entry point per event kind, so that
// every mutation and its navigation consequence stay co-located in the
// controller's dispatch.

use chrono::{DateTime, Utc};
use warden_ipc::model::{
    AccountNumber, AppVersionInfo, Device, DeviceState, GuiSettings, RelayList, Settings,
    TunnelState, WindowShape,
};

/// Tri-state expiry signal derived by the account reducer. `TimeAdded`
/// marks an expiry that moved back into the future after being expired,
/// and is sticky until logout or the next expired transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpiryStatus {
    #[default]
    None,
    Expired,
    TimeAdded,
}

/// In-memory view reconciled from the daemon/shell event stream. Absent
/// optional fields mean the daemon has not reported that facet yet.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub connected_to_daemon: bool,
    pub tunnel: TunnelState,
    pub settings: Option<Settings>,
    pub device: Option<DeviceState>,
    pub account_expiry: Option<DateTime<Utc>>,
    pub expiry_status: ExpiryStatus,
    /// Set when this client created the account it is logged in to.
    pub account_created_at: Option<DateTime<Utc>>,
    pub account_history: Option<AccountNumber>,
    /// Device list fetched for the too-many-devices picker.
    pub device_list: Option<(AccountNumber, Vec<Device>)>,
    pub relay_list: Option<RelayList>,
    pub version_info: Option<AppVersionInfo>,
    pub current_version: Option<String>,
    pub gui_settings: GuiSettings,
    pub auto_start: bool,
    pub split_tunnel_apps: Vec<String>,
    pub window_focused: bool,
    pub window_shape: WindowShape,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tunnel_state(&mut self, tunnel: TunnelState) {
        self.tunnel = tunnel;
    }

    /// Settings are replaced wholesale; the daemon never sends partials.
    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = Some(settings);
    }

    pub fn set_device_state(&mut self, device: DeviceState) {
        self.device = Some(device);
    }

    pub fn set_device_list(&mut self, account_number: AccountNumber, devices: Vec<Device>) {
        self.device_list = Some((account_number, devices));
    }

    pub fn set_account_history(&mut self, account_number: Option<AccountNumber>) {
        self.account_history = account_number;
    }

    pub fn set_relay_list(&mut self, relays: RelayList) {
        self.relay_list = Some(relays);
    }

    pub fn set_version_info(&mut self, info: AppVersionInfo) {
        self.version_info = Some(info);
    }

    pub fn set_current_version(&mut self, version: String) {
        self.current_version = Some(version);
    }

    pub fn set_gui_settings(&mut self, gui_settings: GuiSettings) {
        self.gui_settings = gui_settings;
    }

    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.auto_start = auto_start;
    }

    pub fn set_split_tunnel_apps(&mut self, apps: Vec<String>) {
        self.split_tunnel_apps = apps;
    }

    pub fn set_window_focused(&mut self, focused: bool) {
        self.window_focused = focused;
    }

    pub fn set_window_shape(&mut self, shape: WindowShape) {
        self.window_shape = shape;
    }

    /// Drop everything tied to the logged-in account. Called on logout and
    /// revocation.
    pub fn clear_account(&mut self) {
        self.account_expiry = None;
        self.expiry_status = ExpiryStatus::None;
        self.account_created_at = None;
        self.device_list = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.device
            .as_ref()
            .is_some_and(DeviceState::is_logged_in)
    }

    /// Account number of the logged-in device, if any.
    pub fn account_number(&self) -> Option<&AccountNumber> {
        self.device
            .as_ref()
            .and_then(DeviceState::logged_in)
            .map(|account| &account.account_number)
    }
}
