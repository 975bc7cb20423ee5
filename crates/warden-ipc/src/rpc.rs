// ── Daemon command surface ──
//
// Commands the client issues to the daemon. Implementations wrap the
// actual transport; the returned futures must be `Send` so callers can
// dispatch them on spawned tasks.

use std::future::Future;

use crate::error::IpcError;
use crate::model::{
    AccountData, AccountNumber, AppVersionInfo, Device, DeviceId, DeviceState, RelayList,
    Settings, TunnelState,
};

type IpcResult<T> = Result<T, IpcError>;

/// Async command interface to the daemon.
///
/// Implementations are cheap to clone (a channel handle or client stub) and
/// shared across spawned tasks.
pub trait DaemonRpc: Clone + Send + Sync + 'static {
    // ── Account / device ─────────────────────────────────────────────

    fn login_account(
        &self,
        account_number: AccountNumber,
    ) -> impl Future<Output = IpcResult<()>> + Send;

    fn logout_account(&self) -> impl Future<Output = IpcResult<()>> + Send;

    fn create_new_account(&self) -> impl Future<Output = IpcResult<AccountNumber>> + Send;

    fn list_devices(
        &self,
        account_number: AccountNumber,
    ) -> impl Future<Output = IpcResult<Vec<Device>>> + Send;

    fn remove_device(
        &self,
        account_number: AccountNumber,
        device_id: DeviceId,
    ) -> impl Future<Output = IpcResult<()>> + Send;

    fn get_device(&self) -> impl Future<Output = IpcResult<DeviceState>> + Send;

    fn get_account_data(
        &self,
        account_number: AccountNumber,
    ) -> impl Future<Output = IpcResult<AccountData>> + Send;

    fn get_account_history(
        &self,
    ) -> impl Future<Output = IpcResult<Option<AccountNumber>>> + Send;

    // ── Daemon state reads (startup replay) ──────────────────────────

    fn get_tunnel_state(&self) -> impl Future<Output = IpcResult<TunnelState>> + Send;

    fn get_settings(&self) -> impl Future<Output = IpcResult<Settings>> + Send;

    fn get_relay_locations(&self) -> impl Future<Output = IpcResult<RelayList>> + Send;

    fn get_version_info(&self) -> impl Future<Output = IpcResult<AppVersionInfo>> + Send;

    fn get_current_version(&self) -> impl Future<Output = IpcResult<String>> + Send;

    // ── Tunnel control (pass-through) ────────────────────────────────

    fn connect_tunnel(&self) -> impl Future<Output = IpcResult<bool>> + Send;

    fn disconnect_tunnel(&self) -> impl Future<Output = IpcResult<bool>> + Send;

    fn reconnect_tunnel(&self) -> impl Future<Output = IpcResult<bool>> + Send;
}
