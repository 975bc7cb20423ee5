//! End-to-end controller scenarios against a scripted fake daemon.
//!
//! All timer behavior runs on tokio's paused virtual clock, so the login
//! redirect and expiry timers elapse deterministically.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, watch};
use warden_core::{
    AppControllerHandle, AppController, AppNotice, ControllerOptions, HistorySnapshot,
    LoginFailure, NavigationUpdate, Route, TransitionKind,
};
use warden_ipc::model::{
    AccountAndDevice, AccountData, AccountNumber, AppVersionInfo, Device, DeviceEvent,
    DeviceEventCause, DeviceId, DeviceState, RelayList, Settings, TunnelState,
};
use warden_ipc::{DaemonEvent, DaemonRpc, GatewayEvent, IpcError, ShellEvent};

// ── Fake daemon ──────────────────────────────────────────────────

/// Scripted daemon: every command returns a preconfigured outcome.
#[derive(Clone)]
struct FakeDaemonRpc {
    inner: Arc<FakeInner>,
}

struct FakeInner {
    device_state: Mutex<DeviceState>,
    account_data: Mutex<Option<AccountData>>,
    login_result: Mutex<Result<(), IpcError>>,
    devices_result: Mutex<Result<Vec<Device>, IpcError>>,
}

impl FakeDaemonRpc {
    fn new() -> Self {
        Self {
            inner: Arc::new(FakeInner {
                device_state: Mutex::new(DeviceState::LoggedOut),
                account_data: Mutex::new(None),
                login_result: Mutex::new(Ok(())),
                devices_result: Mutex::new(Ok(Vec::new())),
            }),
        }
    }

    fn with_device_state(self, state: DeviceState) -> Self {
        *self.inner.device_state.lock().expect("lock") = state;
        self
    }

    fn with_account_expiry(self, expiry: DateTime<Utc>) -> Self {
        *self.inner.account_data.lock().expect("lock") = Some(AccountData {
            id: "acct-1".to_owned(),
            expiry,
        });
        self
    }

    fn with_login_result(self, result: Result<(), IpcError>) -> Self {
        *self.inner.login_result.lock().expect("lock") = result;
        self
    }

    fn with_devices_result(self, result: Result<Vec<Device>, IpcError>) -> Self {
        *self.inner.devices_result.lock().expect("lock") = result;
        self
    }
}

impl DaemonRpc for FakeDaemonRpc {
    async fn login_account(&self, _account_number: AccountNumber) -> Result<(), IpcError> {
        self.inner.login_result.lock().expect("lock").clone()
    }

    async fn logout_account(&self) -> Result<(), IpcError> {
        Ok(())
    }

    async fn create_new_account(&self) -> Result<AccountNumber, IpcError> {
        Ok("9999888877776666".into())
    }

    async fn list_devices(
        &self,
        _account_number: AccountNumber,
    ) -> Result<Vec<Device>, IpcError> {
        self.inner.devices_result.lock().expect("lock").clone()
    }

    async fn remove_device(
        &self,
        _account_number: AccountNumber,
        _device_id: DeviceId,
    ) -> Result<(), IpcError> {
        Ok(())
    }

    async fn get_device(&self) -> Result<DeviceState, IpcError> {
        Ok(self.inner.device_state.lock().expect("lock").clone())
    }

    async fn get_account_data(
        &self,
        _account_number: AccountNumber,
    ) -> Result<AccountData, IpcError> {
        self.inner
            .account_data
            .lock()
            .expect("lock")
            .clone()
            .ok_or_else(|| IpcError::Rpc("no account data scripted".to_owned()))
    }

    async fn get_account_history(&self) -> Result<Option<AccountNumber>, IpcError> {
        Ok(None)
    }

    async fn get_tunnel_state(&self) -> Result<TunnelState, IpcError> {
        Ok(TunnelState::default())
    }

    async fn get_settings(&self) -> Result<Settings, IpcError> {
        Ok(Settings::default())
    }

    async fn get_relay_locations(&self) -> Result<RelayList, IpcError> {
        Ok(RelayList::default())
    }

    async fn get_version_info(&self) -> Result<AppVersionInfo, IpcError> {
        Ok(AppVersionInfo {
            supported: true,
            suggested_upgrade: None,
        })
    }

    async fn get_current_version(&self) -> Result<String, IpcError> {
        Ok("2026.2".to_owned())
    }

    async fn connect_tunnel(&self) -> Result<bool, IpcError> {
        Ok(true)
    }

    async fn disconnect_tunnel(&self) -> Result<bool, IpcError> {
        Ok(true)
    }

    async fn reconnect_tunnel(&self) -> Result<bool, IpcError> {
        Ok(true)
    }
}

// ── Harness ──────────────────────────────────────────────────────

const ACCOUNT: &str = "1111222233334444";

fn account_and_device() -> AccountAndDevice {
    AccountAndDevice {
        account_number: ACCOUNT.into(),
        device: Device {
            id: DeviceId("dev-1".to_owned()),
            name: "brave otter".to_owned(),
            created: Utc::now(),
        },
    }
}

fn logged_in_event() -> GatewayEvent {
    GatewayEvent::Daemon(DaemonEvent::Device(DeviceEvent::new(
        DeviceEventCause::LoggedIn,
        DeviceState::LoggedIn(account_and_device()),
    )))
}

fn logged_out_event() -> GatewayEvent {
    GatewayEvent::Daemon(DaemonEvent::Device(DeviceEvent::new(
        DeviceEventCause::LoggedOut,
        DeviceState::LoggedOut,
    )))
}

fn five_devices() -> Vec<Device> {
    (1..=5)
        .map(|n| Device {
            id: DeviceId(format!("dev-{n}")),
            name: format!("device {n}"),
            created: Utc::now(),
        })
        .collect()
}

fn spawn(rpc: FakeDaemonRpc) -> (AppControllerHandle, mpsc::UnboundedSender<GatewayEvent>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let handle = AppController::spawn(rpc, events_rx, ControllerOptions::default());
    (handle, events_tx)
}

/// Wait (on virtual time) until the given route is current.
async fn wait_for_route(nav: &mut watch::Receiver<NavigationUpdate>, route: Route) -> NavigationUpdate {
    tokio::time::timeout(Duration::from_secs(60), async {
        loop {
            let update = *nav.borrow_and_update();
            if update.route == route {
                return update;
            }
            nav.changed().await.expect("controller alive");
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for route {route}"))
}

// ── Scenarios ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn connect_while_logged_out_lands_on_login() {
    let (handle, events) = spawn(FakeDaemonRpc::new());
    let mut nav = handle.navigation();

    assert_eq!(handle.current_route(), Route::Launch);
    events.send(GatewayEvent::Connected).expect("send");

    let update = wait_for_route(&mut nav, Route::Login).await;
    assert_eq!(update.transition, TransitionKind::Push);
}

#[tokio::test(start_paused = true)]
async fn successful_login_redirects_to_main_after_delay() {
    let (handle, events) = spawn(FakeDaemonRpc::new());
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    handle.login(ACCOUNT.into()).expect("login command");
    // Give the login command a chance to complete before the daemon
    // reports the new device state.
    tokio::time::sleep(Duration::from_millis(10)).await;
    events.send(logged_in_event()).expect("send");

    let update = wait_for_route(&mut nav, Route::Main).await;
    assert_eq!(update.transition, TransitionKind::Push);
}

#[tokio::test(start_paused = true)]
async fn too_many_devices_opens_the_picker() {
    let rpc = FakeDaemonRpc::new()
        .with_login_result(Err(IpcError::TooManyDevices))
        .with_devices_result(Ok(five_devices()));
    let (handle, events) = spawn(rpc.clone());
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    handle.login(ACCOUNT.into()).expect("login command");
    let update = wait_for_route(&mut nav, Route::TooManyDevices).await;
    assert_eq!(update.transition, TransitionKind::Push);

    // The user picks a device; the retried login succeeds and navigation
    // resets immediately.
    *rpc.inner.login_result.lock().expect("lock") = Ok(());
    handle.login(ACCOUNT.into()).expect("retry login");
    tokio::time::sleep(Duration::from_millis(10)).await;
    events.send(logged_in_event()).expect("send");

    wait_for_route(&mut nav, Route::Main).await;
}

#[tokio::test(start_paused = true)]
async fn login_rejection_surfaces_a_notice_and_stays_on_login() {
    let rpc = FakeDaemonRpc::new().with_login_result(Err(IpcError::InvalidAccount));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();
    let mut notices = handle.notices();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    handle.login(ACCOUNT.into()).expect("login command");
    let notice = tokio::time::timeout(Duration::from_secs(60), notices.recv())
        .await
        .expect("notice in time")
        .expect("notice");
    assert_eq!(
        notice,
        AppNotice::LoginFailed(LoginFailure::InvalidAccount)
    );
    assert_eq!(handle.current_route(), Route::Login);
}

#[tokio::test(start_paused = true)]
async fn device_list_fetch_failure_returns_to_login() {
    let rpc = FakeDaemonRpc::new()
        .with_login_result(Err(IpcError::TooManyDevices))
        .with_devices_result(Err(IpcError::Rpc("api unreachable".to_owned())));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();
    let mut notices = handle.notices();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    handle.login(ACCOUNT.into()).expect("login command");
    let notice = tokio::time::timeout(Duration::from_secs(60), notices.recv())
        .await
        .expect("notice in time")
        .expect("notice");
    assert!(matches!(notice, AppNotice::DeviceListFailed(_)));
    assert_eq!(handle.current_route(), Route::Login);
}

#[tokio::test(start_paused = true)]
async fn cancelled_login_still_applies_late_device_event() {
    let (handle, events) = spawn(FakeDaemonRpc::new());
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    handle.login(ACCOUNT.into()).expect("login command");
    handle.cancel_login().expect("cancel");
    tokio::time::sleep(Duration::from_millis(10)).await;

    // The daemon completed the login anyway; the event applies as an
    // unsolicited login with an immediate reset.
    events.send(logged_in_event()).expect("send");
    wait_for_route(&mut nav, Route::Main).await;

    let mut device = handle.device_state();
    let state = device.borrow_and_update().clone();
    assert!(matches!(state, Some(DeviceState::LoggedIn(_))));
}

#[tokio::test(start_paused = true)]
async fn unsolicited_login_resets_navigation() {
    let (handle, events) = spawn(FakeDaemonRpc::new());
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    events.send(logged_in_event()).expect("send");
    wait_for_route(&mut nav, Route::Main).await;
}

#[tokio::test(start_paused = true)]
async fn expired_account_at_startup_shows_expired() {
    let rpc = FakeDaemonRpc::new()
        .with_device_state(DeviceState::LoggedIn(account_and_device()))
        .with_account_expiry(Utc::now() - chrono::Duration::days(2));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Expired).await;
}

#[tokio::test(start_paused = true)]
async fn close_expiry_flips_to_expired_when_the_timer_fires() {
    let rpc = FakeDaemonRpc::new()
        .with_device_state(DeviceState::LoggedIn(account_and_device()))
        .with_account_expiry(Utc::now() + chrono::Duration::seconds(10));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Main).await;

    // Virtual time runs past the expiry instant; the armed timer fires.
    wait_for_route(&mut nav, Route::Expired).await;
}

#[tokio::test(start_paused = true)]
async fn adding_time_to_an_expired_account_shows_time_added() {
    let rpc = FakeDaemonRpc::new()
        .with_device_state(DeviceState::LoggedIn(account_and_device()))
        .with_account_expiry(Utc::now() - chrono::Duration::days(2));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Expired).await;

    events
        .send(GatewayEvent::Daemon(DaemonEvent::AccountData(AccountData {
            id: "acct-1".to_owned(),
            expiry: Utc::now() + chrono::Duration::days(30),
        })))
        .expect("send");
    let update = wait_for_route(&mut nav, Route::TimeAdded).await;
    assert_eq!(update.transition, TransitionKind::Push);
}

#[tokio::test(start_paused = true)]
async fn revoked_device_flow() {
    let rpc = FakeDaemonRpc::new().with_device_state(DeviceState::LoggedIn(account_and_device()));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Main).await;

    events
        .send(GatewayEvent::Daemon(DaemonEvent::Device(DeviceEvent::new(
            DeviceEventCause::Revoked,
            DeviceState::Revoked,
        ))))
        .expect("send");
    let update = wait_for_route(&mut nav, Route::DeviceRevoked).await;
    assert_eq!(update.transition, TransitionKind::Pop);

    // Leaving the revoked device logs out; the daemon confirms.
    handle.leave_revoked_device().expect("leave");
    tokio::time::sleep(Duration::from_millis(10)).await;
    events.send(logged_out_event()).expect("send");
    wait_for_route(&mut nav, Route::Login).await;
}

#[tokio::test(start_paused = true)]
async fn daemon_disconnect_returns_to_launch() {
    let rpc = FakeDaemonRpc::new().with_device_state(DeviceState::LoggedIn(account_and_device()));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Main).await;

    events.send(GatewayEvent::Disconnected).expect("send");
    let update = wait_for_route(&mut nav, Route::Launch).await;
    assert_eq!(update.transition, TransitionKind::Pop);
}

#[tokio::test(start_paused = true)]
async fn fetch_devices_returns_the_scripted_list() {
    let rpc = FakeDaemonRpc::new().with_devices_result(Ok(five_devices()));
    let (handle, events) = spawn(rpc);
    events.send(GatewayEvent::Connected).expect("send");

    let devices = handle.fetch_devices(ACCOUNT.into()).await.expect("devices");
    assert_eq!(devices.len(), 5);
}

#[tokio::test(start_paused = true)]
async fn history_snapshot_restores_with_pop_transition() {
    let (handle, _events) = spawn(FakeDaemonRpc::new());

    let snapshot = HistorySnapshot {
        entries: vec![Route::Launch, Route::Login, Route::Main],
        index: 2,
    };
    handle
        .restore_history(snapshot.clone())
        .await
        .expect("restore");

    let update = *handle.navigation().borrow();
    assert_eq!(update.route, Route::Main);
    assert_eq!(update.transition, TransitionKind::Pop);

    let restored = handle.snapshot_history().await.expect("snapshot");
    assert_eq!(restored, snapshot);
}

#[tokio::test(start_paused = true)]
async fn restore_rejects_corrupt_snapshot() {
    let (handle, _events) = spawn(FakeDaemonRpc::new());

    let result = handle
        .restore_history(HistorySnapshot {
            entries: vec![],
            index: 0,
        })
        .await;
    assert!(result.is_err());
    assert_eq!(handle.current_route(), Route::Launch);
}

#[tokio::test(start_paused = true)]
async fn tunnel_state_events_reach_the_tunnel_watch() {
    let rpc = FakeDaemonRpc::new().with_device_state(DeviceState::LoggedIn(account_and_device()));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();
    let mut tunnel = handle.tunnel_state();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Main).await;

    handle.connect_tunnel().expect("connect command");
    events
        .send(GatewayEvent::Daemon(DaemonEvent::TunnelState(
            TunnelState::Connecting {
                location: None,
                feature_indicators: Vec::new(),
            },
        )))
        .expect("send");

    tokio::time::timeout(Duration::from_secs(60), async {
        loop {
            if !tunnel.borrow_and_update().is_disconnected() {
                break;
            }
            tunnel.changed().await.expect("controller alive");
        }
    })
    .await
    .expect("tunnel state update");

    // A mid-flow tunnel event never disturbs the current screen.
    assert_eq!(handle.current_route(), Route::Main);
}

#[tokio::test(start_paused = true)]
async fn open_route_and_reset_navigation_requests() {
    let rpc = FakeDaemonRpc::new().with_device_state(DeviceState::LoggedIn(account_and_device()));
    let (handle, events) = spawn(rpc);
    let mut nav = handle.navigation();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Main).await;

    // A deep link pushes the requested screen...
    events
        .send(GatewayEvent::Shell(ShellEvent::OpenRoute(
            "login".to_owned(),
        )))
        .expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    // ...an unknown one is ignored...
    events
        .send(GatewayEvent::Shell(ShellEvent::OpenRoute(
            "notAScreen".to_owned(),
        )))
        .expect("send");

    // ...and a reset request returns to the base route.
    events
        .send(GatewayEvent::Shell(ShellEvent::ResetNavigation))
        .expect("send");
    wait_for_route(&mut nav, Route::Main).await;
}

#[tokio::test(start_paused = true)]
async fn account_creation_lands_on_main_without_redirect() {
    let (handle, events) = spawn(FakeDaemonRpc::new());
    let mut nav = handle.navigation();
    let mut notices = handle.notices();

    events.send(GatewayEvent::Connected).expect("send");
    wait_for_route(&mut nav, Route::Login).await;

    handle.create_new_account().expect("create account");
    let notice = tokio::time::timeout(Duration::from_secs(60), notices.recv())
        .await
        .expect("notice in time")
        .expect("notice");
    assert!(matches!(notice, AppNotice::AccountCreated(_)));

    events.send(logged_in_event()).expect("send");
    wait_for_route(&mut nav, Route::Main).await;
}
