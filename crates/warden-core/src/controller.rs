// ── App controller ──
//
// Composition root: consumes the gateway event stream, applies each event
// to the reconciliation store, runs the navigation resolver after any
// mutation that can change the base route, and sequences the interactive
// login/account flows. Runs as a single actor task; daemon commands are
// dispatched on spawned tasks and complete through the internal channel,
// so the actor is never re-entered and unrelated events are never queued
// behind an in-flight command.

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use warden_ipc::model::{
    AccountData, AccountNumber, AppVersionInfo, Device, DeviceEvent, DeviceState, RelayList,
    Settings, TunnelState,
};
use warden_ipc::{DaemonEvent, DaemonRpc, GatewayEvent, IpcError, ShellEvent};

use crate::config::ControllerOptions;
use crate::error::CoreError;
use crate::expiry::ExpiryMonitor;
use crate::navigation::{
    resolver, HistorySnapshot, NavigationHistory, NavigationUpdate, Route, TransitionKind,
};
use crate::scheduler::{Scheduler, TimerToken};
use crate::sequencer::{LoginCompletion, LoginSequence};
use crate::store::AppState;

const NOTICE_CHANNEL_SIZE: usize = 64;

// ── Notices ──────────────────────────────────────────────────────

/// Why a login attempt failed, as shown to the user. The device-limit case
/// never surfaces here -- it routes to the device picker instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidAccount,
    AlreadyLoggedIn,
    Other(String),
}

impl From<IpcError> for LoginFailure {
    fn from(error: IpcError) -> Self {
        match error {
            IpcError::InvalidAccount => LoginFailure::InvalidAccount,
            IpcError::AlreadyLoggedIn => LoginFailure::AlreadyLoggedIn,
            other => LoginFailure::Other(other.to_string()),
        }
    }
}

/// User-facing outcomes broadcast by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppNotice {
    LoginFailed(LoginFailure),
    DeviceListFailed(String),
    AccountCreated(AccountNumber),
    AccountCreationFailed(String),
}

// ── Commands and internal events ─────────────────────────────────

enum UiCommand {
    Login(AccountNumber),
    CancelLogin,
    Logout,
    LeaveRevokedDevice,
    CreateNewAccount,
    ConnectTunnel,
    DisconnectTunnel,
    ReconnectTunnel,
    FetchDevices {
        account_number: AccountNumber,
        respond_to: oneshot::Sender<Result<Vec<Device>, CoreError>>,
    },
    SnapshotHistory {
        respond_to: oneshot::Sender<HistorySnapshot>,
    },
    RestoreHistory {
        snapshot: HistorySnapshot,
        respond_to: oneshot::Sender<Result<(), CoreError>>,
    },
}

/// Startup snapshot fetched after the daemon session comes up. Optional
/// facets tolerate individual fetch failures; the next daemon event fills
/// them in.
struct InitialState {
    device: DeviceState,
    account_history: Option<AccountNumber>,
    account_data: Option<AccountData>,
    tunnel: TunnelState,
    settings: Option<Settings>,
    relay_list: Option<RelayList>,
    version_info: Option<AppVersionInfo>,
    current_version: Option<String>,
}

enum InternalEvent {
    InitialState(Box<InitialState>),
    InitialStateFailed(IpcError),
    LoginCompleted {
        account_number: AccountNumber,
        result: Result<(), IpcError>,
    },
    DeviceListFetched {
        account_number: AccountNumber,
        result: Result<Vec<Device>, IpcError>,
        respond_to: Option<oneshot::Sender<Result<Vec<Device>, CoreError>>>,
        for_login: bool,
    },
    AccountCreated(Result<AccountNumber, IpcError>),
    RedirectDue(TimerToken),
    ExpiryDue(TimerToken),
}

// ── Handle ───────────────────────────────────────────────────────

/// Cloneable handle to a running [`AppController`].
#[derive(Clone)]
pub struct AppControllerHandle {
    command_tx: mpsc::UnboundedSender<UiCommand>,
    navigation_rx: watch::Receiver<NavigationUpdate>,
    tunnel_rx: watch::Receiver<TunnelState>,
    device_rx: watch::Receiver<Option<DeviceState>>,
    notice_tx: broadcast::Sender<AppNotice>,
    cancel: CancellationToken,
}

impl AppControllerHandle {
    pub fn login(&self, account_number: AccountNumber) -> Result<(), CoreError> {
        self.send(UiCommand::Login(account_number))
    }

    /// Abandon an in-flight login attempt locally, without contacting the
    /// daemon.
    pub fn cancel_login(&self) -> Result<(), CoreError> {
        self.send(UiCommand::CancelLogin)
    }

    pub fn logout(&self) -> Result<(), CoreError> {
        self.send(UiCommand::Logout)
    }

    /// Acknowledge that this device was revoked and return to the login
    /// funnel.
    pub fn leave_revoked_device(&self) -> Result<(), CoreError> {
        self.send(UiCommand::LeaveRevokedDevice)
    }

    pub fn create_new_account(&self) -> Result<(), CoreError> {
        self.send(UiCommand::CreateNewAccount)
    }

    /// Ask the daemon to bring the tunnel up. The outcome arrives as
    /// tunnel-state events.
    pub fn connect_tunnel(&self) -> Result<(), CoreError> {
        self.send(UiCommand::ConnectTunnel)
    }

    pub fn disconnect_tunnel(&self) -> Result<(), CoreError> {
        self.send(UiCommand::DisconnectTunnel)
    }

    pub fn reconnect_tunnel(&self) -> Result<(), CoreError> {
        self.send(UiCommand::ReconnectTunnel)
    }

    /// Fetch the devices registered on `account_number`. The result is also
    /// reconciled into the store for the device picker.
    pub async fn fetch_devices(
        &self,
        account_number: AccountNumber,
    ) -> Result<Vec<Device>, CoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(UiCommand::FetchDevices {
            account_number,
            respond_to: tx,
        })?;
        rx.await.map_err(|_| CoreError::ControllerGone)?
    }

    /// Snapshot the navigation history for persistence.
    pub async fn snapshot_history(&self) -> Result<HistorySnapshot, CoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(UiCommand::SnapshotHistory { respond_to: tx })?;
        rx.await.map_err(|_| CoreError::ControllerGone)
    }

    /// Restore a persisted navigation history verbatim. The restored route
    /// replays with a pop transition and suppresses the next login
    /// redirect.
    pub async fn restore_history(&self, snapshot: HistorySnapshot) -> Result<(), CoreError> {
        let (tx, rx) = oneshot::channel();
        self.send(UiCommand::RestoreHistory {
            snapshot,
            respond_to: tx,
        })?;
        rx.await.map_err(|_| CoreError::ControllerGone)?
    }

    /// Observe navigation transitions.
    pub fn navigation(&self) -> watch::Receiver<NavigationUpdate> {
        self.navigation_rx.clone()
    }

    pub fn current_route(&self) -> Route {
        self.navigation_rx.borrow().route
    }

    /// Observe tunnel state changes.
    pub fn tunnel_state(&self) -> watch::Receiver<TunnelState> {
        self.tunnel_rx.clone()
    }

    /// Observe login/device state changes. `None` until the daemon reports.
    pub fn device_state(&self) -> watch::Receiver<Option<DeviceState>> {
        self.device_rx.clone()
    }

    /// Subscribe to user-facing notices.
    pub fn notices(&self) -> broadcast::Receiver<AppNotice> {
        self.notice_tx.subscribe()
    }

    /// Stop the controller actor.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn send(&self, command: UiCommand) -> Result<(), CoreError> {
        self.command_tx
            .send(command)
            .map_err(|_| CoreError::ControllerGone)
    }
}

// ── Controller ───────────────────────────────────────────────────

/// The controller actor. Owns the reconciliation store and the navigation
/// history; nothing else writes them.
pub struct AppController<R: DaemonRpc> {
    rpc: R,
    options: ControllerOptions,
    state: AppState,
    login: LoginSequence,
    history: NavigationHistory,
    expiry: ExpiryMonitor,
    redirect_timer: Scheduler<InternalEvent>,
    expiry_timer: Scheduler<InternalEvent>,
    /// Set when a restored history must not be clobbered by the redirect of
    /// a replayed login.
    suppress_next_redirect: bool,
    internal_tx: mpsc::UnboundedSender<InternalEvent>,
    navigation_tx: watch::Sender<NavigationUpdate>,
    tunnel_tx: watch::Sender<TunnelState>,
    device_tx: watch::Sender<Option<DeviceState>>,
    notice_tx: broadcast::Sender<AppNotice>,
}

impl<R: DaemonRpc> AppController<R> {
    /// Spawn the controller actor and return its handle. `events` is the
    /// gateway stream from the IPC layer; the actor stops when it closes or
    /// when [`AppControllerHandle::shutdown`] is called.
    pub fn spawn(
        rpc: R,
        events: mpsc::UnboundedReceiver<GatewayEvent>,
        options: ControllerOptions,
    ) -> AppControllerHandle {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();
        let (navigation_tx, navigation_rx) = watch::channel(NavigationUpdate {
            route: Route::Launch,
            transition: TransitionKind::Push,
        });
        let (tunnel_tx, tunnel_rx) = watch::channel(TunnelState::default());
        let (device_tx, device_rx) = watch::channel(None);
        let (notice_tx, _) = broadcast::channel(NOTICE_CHANNEL_SIZE);
        let cancel = CancellationToken::new();

        let controller = AppController {
            rpc,
            expiry: ExpiryMonitor::new(options.close_to_expiry_window),
            options,
            state: AppState::new(),
            login: LoginSequence::None,
            history: NavigationHistory::new(),
            redirect_timer: Scheduler::new(internal_tx.clone()),
            expiry_timer: Scheduler::new(internal_tx.clone()),
            suppress_next_redirect: false,
            internal_tx,
            navigation_tx,
            tunnel_tx,
            device_tx,
            notice_tx: notice_tx.clone(),
        };

        tokio::spawn(controller.run(events, command_rx, internal_rx, cancel.clone()));

        AppControllerHandle {
            command_tx,
            navigation_rx,
            tunnel_rx,
            device_rx,
            notice_tx,
            cancel,
        }
    }

    async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<GatewayEvent>,
        mut command_rx: mpsc::UnboundedReceiver<UiCommand>,
        mut internal_rx: mpsc::UnboundedReceiver<InternalEvent>,
        cancel: CancellationToken,
    ) {
        info!("controller started");
        loop {
            tokio::select! {
                biased;

                () = cancel.cancelled() => break,

                Some(internal) = internal_rx.recv() => self.handle_internal(internal),

                Some(command) = command_rx.recv() => self.handle_command(command),

                event = events.recv() => match event {
                    Some(event) => self.handle_gateway(event),
                    None => {
                        info!("gateway stream closed");
                        break;
                    }
                },
            }
        }
        debug!("controller stopped");
    }

    // ── Gateway events ───────────────────────────────────────────

    fn handle_gateway(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Connected => self.on_daemon_connected(),
            GatewayEvent::Disconnected => self.on_daemon_disconnected(),
            GatewayEvent::Daemon(event) => self.handle_daemon_event(event),
            GatewayEvent::Shell(event) => self.handle_shell_event(event),
        }
    }

    fn on_daemon_connected(&mut self) {
        info!("daemon session established; fetching initial state");
        let rpc = self.rpc.clone();
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let message = match fetch_initial_state(&rpc).await {
                Ok(initial) => InternalEvent::InitialState(Box::new(initial)),
                Err(error) => InternalEvent::InitialStateFailed(error),
            };
            let _ = tx.send(message);
        });
    }

    fn on_daemon_disconnected(&mut self) {
        info!("daemon session lost");
        self.redirect_timer.cancel();
        self.login = LoginSequence::None;
        self.state.connected_to_daemon = false;
        self.recompute_navigation();
    }

    fn handle_daemon_event(&mut self, event: DaemonEvent) {
        match event {
            DaemonEvent::TunnelState(tunnel) => {
                debug!(?tunnel, "tunnel state changed");
                self.state.set_tunnel_state(tunnel.clone());
                self.tunnel_tx.send_replace(tunnel);
                // Tunnel state feeds derived display state; the base route
                // itself is unaffected, and recomputing is idempotent.
                self.recompute_navigation();
            }
            DaemonEvent::Settings(settings) => self.state.set_settings(settings),
            DaemonEvent::RelayList(relay_list) => self.state.set_relay_list(relay_list),
            DaemonEvent::AppVersionInfo(info) => self.state.set_version_info(info),
            DaemonEvent::CurrentVersion(version) => self.state.set_current_version(version),
            DaemonEvent::Device(event) => self.handle_device_event(event),
            DaemonEvent::DeviceList {
                account_number,
                devices,
            } => self.state.set_device_list(account_number, devices),
            DaemonEvent::AccountData(data) => self.evaluate_expiry(Some(data.expiry)),
            DaemonEvent::AccountHistory(account_number) => {
                self.state.set_account_history(account_number);
            }
        }
    }

    fn handle_shell_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::GuiSettings(gui_settings) => self.state.set_gui_settings(gui_settings),
            ShellEvent::AutoStart(auto_start) => self.state.set_auto_start(auto_start),
            ShellEvent::SplitTunnelApps(apps) => self.state.set_split_tunnel_apps(apps),
            ShellEvent::WindowFocus(focused) => self.state.set_window_focused(focused),
            ShellEvent::WindowShape(shape) => self.state.set_window_shape(shape),
            ShellEvent::ResetNavigation => self.recompute_navigation(),
            ShellEvent::OpenRoute(name) => match name.parse::<Route>() {
                Ok(route) => self.navigate_to(route),
                Err(_) => warn!(route = %name, "ignoring unknown route request"),
            },
        }
    }

    // ── Device / login flow ──────────────────────────────────────

    fn handle_device_event(&mut self, event: DeviceEvent) {
        debug!(cause = ?event.cause, "device event");
        match event.new_state {
            DeviceState::LoggedIn(_) => {
                self.state.set_device_state(event.new_state.clone());
                self.device_tx.send_replace(Some(event.new_state));

                let (next, completion) = self.login.on_logged_in();
                self.login = next;
                match completion {
                    LoginCompletion::Unsolicited | LoginCompletion::AfterDevicePick => {
                        self.recompute_navigation();
                    }
                    LoginCompletion::Direct => {
                        if self.suppress_next_redirect {
                            self.suppress_next_redirect = false;
                            self.recompute_navigation();
                        } else {
                            // Leave the confirmation screen up briefly
                            // before moving to the main screen.
                            self.redirect_timer.schedule(
                                self.options.login_redirect_delay,
                                InternalEvent::RedirectDue,
                            );
                        }
                    }
                    LoginCompletion::NewAccount => {
                        self.state.account_created_at = Some(Utc::now());
                        self.recompute_navigation();
                    }
                }
            }
            DeviceState::LoggedOut | DeviceState::Revoked => {
                self.redirect_timer.cancel();
                self.expiry_timer.cancel();
                self.expiry.reset();
                self.login = self.login.on_logged_out();
                self.state.set_device_state(event.new_state.clone());
                self.state.clear_account();
                self.device_tx.send_replace(Some(event.new_state));
                self.recompute_navigation();
            }
        }
    }

    // ── Internal events ──────────────────────────────────────────

    fn handle_internal(&mut self, event: InternalEvent) {
        match event {
            InternalEvent::InitialState(initial) => self.apply_initial_state(*initial),
            InternalEvent::InitialStateFailed(error) => {
                // The IPC layer retries the session; a fresh Connected
                // event restarts the fetch.
                warn!(%error, "initial state fetch failed");
            }
            InternalEvent::LoginCompleted {
                account_number,
                result,
            } => self.handle_login_completed(account_number, result),
            InternalEvent::DeviceListFetched {
                account_number,
                result,
                respond_to,
                for_login,
            } => self.handle_device_list(account_number, result, respond_to, for_login),
            InternalEvent::AccountCreated(result) => self.handle_account_created(result),
            InternalEvent::RedirectDue(token) => {
                if self.redirect_timer.try_fire(token) {
                    debug!("login redirect elapsed");
                    self.recompute_navigation();
                }
            }
            InternalEvent::ExpiryDue(token) => {
                if self.expiry_timer.try_fire(token) {
                    debug!("account expiry reached");
                    let eval = self.expiry.timer_elapsed(self.state.expiry_status);
                    self.state.expiry_status = eval.status;
                    if eval.crossed_expired_boundary && !self.redirect_timer.is_running() {
                        self.recompute_navigation();
                    }
                }
            }
        }
    }

    fn handle_login_completed(
        &mut self,
        account_number: AccountNumber,
        result: Result<(), IpcError>,
    ) {
        match result {
            // The daemon accepted the login; the matching device event
            // completes the cycle.
            Ok(()) => debug!("login command accepted"),
            Err(IpcError::TooManyDevices) => {
                info!("device limit reached; fetching device list");
                self.spawn_device_list_fetch(account_number, None, true);
            }
            Err(error) => {
                warn!(%error, "login rejected");
                self.login = self.login.rejected();
                self.notify(AppNotice::LoginFailed(LoginFailure::from(error)));
            }
        }
    }

    fn handle_device_list(
        &mut self,
        account_number: AccountNumber,
        result: Result<Vec<Device>, IpcError>,
        respond_to: Option<oneshot::Sender<Result<Vec<Device>, CoreError>>>,
        for_login: bool,
    ) {
        // Only an in-flight login may move to the picker; the user may have
        // cancelled while the fetch was running.
        let login_waiting = matches!(self.login, LoginSequence::LoggingIn { .. });

        match result {
            Ok(devices) => {
                self.state.set_device_list(account_number, devices.clone());
                if let Some(respond_to) = respond_to {
                    let _ = respond_to.send(Ok(devices));
                }
                if for_login && login_waiting {
                    self.login = self.login.device_limit_reached();
                    self.recompute_navigation();
                }
            }
            Err(error) => {
                warn!(%error, "listing devices failed");
                if let Some(respond_to) = respond_to {
                    let _ = respond_to.send(Err(CoreError::Ipc(error.clone())));
                }
                if for_login && login_waiting {
                    self.login = self.login.rejected();
                    self.notify(AppNotice::DeviceListFailed(error.to_string()));
                }
            }
        }
    }

    fn handle_account_created(&mut self, result: Result<AccountNumber, IpcError>) {
        match result {
            Ok(account_number) => {
                // The device event that follows records the device; the
                // account number is surfaced for display.
                self.notify(AppNotice::AccountCreated(account_number));
            }
            Err(error) => {
                warn!(%error, "account creation failed");
                self.login = self.login.rejected();
                self.notify(AppNotice::AccountCreationFailed(error.to_string()));
            }
        }
    }

    // ── Commands from the UI layer ───────────────────────────────

    fn handle_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::Login(account_number) => {
                self.login = self.login.begin_login();
                let rpc = self.rpc.clone();
                let tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    let result = rpc.login_account(account_number.clone()).await;
                    let _ = tx.send(InternalEvent::LoginCompleted {
                        account_number,
                        result,
                    });
                });
            }
            UiCommand::CancelLogin => {
                self.login = self.login.cancel();
            }
            UiCommand::Logout | UiCommand::LeaveRevokedDevice => {
                // Completion arrives as a logged-out device event.
                let rpc = self.rpc.clone();
                tokio::spawn(async move {
                    if let Err(error) = rpc.logout_account().await {
                        warn!(%error, "logout failed");
                    }
                });
            }
            UiCommand::CreateNewAccount => {
                self.login = self.login.begin_account_creation();
                let rpc = self.rpc.clone();
                let tx = self.internal_tx.clone();
                tokio::spawn(async move {
                    let result = rpc.create_new_account().await;
                    let _ = tx.send(InternalEvent::AccountCreated(result));
                });
            }
            // Tunnel control is fire-and-forget: the daemon answers with
            // tunnel-state events either way.
            UiCommand::ConnectTunnel => {
                let rpc = self.rpc.clone();
                tokio::spawn(async move {
                    if let Err(error) = rpc.connect_tunnel().await {
                        warn!(%error, "connect failed");
                    }
                });
            }
            UiCommand::DisconnectTunnel => {
                let rpc = self.rpc.clone();
                tokio::spawn(async move {
                    if let Err(error) = rpc.disconnect_tunnel().await {
                        warn!(%error, "disconnect failed");
                    }
                });
            }
            UiCommand::ReconnectTunnel => {
                let rpc = self.rpc.clone();
                tokio::spawn(async move {
                    if let Err(error) = rpc.reconnect_tunnel().await {
                        warn!(%error, "reconnect failed");
                    }
                });
            }
            UiCommand::FetchDevices {
                account_number,
                respond_to,
            } => self.spawn_device_list_fetch(account_number, Some(respond_to), false),
            UiCommand::SnapshotHistory { respond_to } => {
                let _ = respond_to.send(self.history.snapshot());
            }
            UiCommand::RestoreHistory {
                snapshot,
                respond_to,
            } => match NavigationHistory::restore(snapshot) {
                Ok((history, update)) => {
                    self.history = history;
                    self.suppress_next_redirect = true;
                    self.navigation_tx.send_replace(update);
                    let _ = respond_to.send(Ok(()));
                }
                Err(error) => {
                    let _ = respond_to.send(Err(error));
                }
            },
        }
    }

    fn spawn_device_list_fetch(
        &self,
        account_number: AccountNumber,
        respond_to: Option<oneshot::Sender<Result<Vec<Device>, CoreError>>>,
        for_login: bool,
    ) {
        let rpc = self.rpc.clone();
        let tx = self.internal_tx.clone();
        tokio::spawn(async move {
            let result = rpc.list_devices(account_number.clone()).await;
            let _ = tx.send(InternalEvent::DeviceListFetched {
                account_number,
                result,
                respond_to,
                for_login,
            });
        });
    }

    // ── Startup replay ───────────────────────────────────────────

    /// Apply the startup snapshot in dependency order: login state and
    /// account before expiry, tunnel state before anything derived from
    /// it. Only then is the daemon considered connected and navigation
    /// recomputed once.
    fn apply_initial_state(&mut self, initial: InitialState) {
        debug!("applying initial daemon state");

        self.state.set_device_state(initial.device.clone());
        self.device_tx.send_replace(Some(initial.device));
        self.state.set_account_history(initial.account_history);

        self.evaluate_expiry(initial.account_data.map(|data| data.expiry));

        self.state.set_tunnel_state(initial.tunnel.clone());
        self.tunnel_tx.send_replace(initial.tunnel);

        if let Some(settings) = initial.settings {
            self.state.set_settings(settings);
        }
        if let Some(relay_list) = initial.relay_list {
            self.state.set_relay_list(relay_list);
        }
        if let Some(version_info) = initial.version_info {
            self.state.set_version_info(version_info);
        }
        if let Some(current_version) = initial.current_version {
            self.state.set_current_version(current_version);
        }

        // Replaying saved state never triggers a login redirect.
        self.suppress_next_redirect = false;
        self.state.connected_to_daemon = true;
        self.recompute_navigation();
    }

    // ── Expiry ───────────────────────────────────────────────────

    fn evaluate_expiry(&mut self, expiry: Option<DateTime<Utc>>) {
        self.expiry_timer.cancel();

        let eval = self
            .expiry
            .account_updated(expiry, self.state.expiry_status, Utc::now());
        self.state.account_expiry = expiry;
        self.state.expiry_status = eval.status;

        if let Some(delay) = eval.arm_in {
            debug!(?delay, "arming expiry timer");
            self.expiry_timer.schedule(delay, InternalEvent::ExpiryDue);
        }

        // A pending login-success redirect takes precedence over the
        // expired/time-added reset.
        if eval.crossed_expired_boundary && !self.redirect_timer.is_running() {
            self.recompute_navigation();
        }
    }

    // ── Navigation ───────────────────────────────────────────────

    fn recompute_navigation(&mut self) {
        let target = resolver::base_route(
            self.state.connected_to_daemon,
            self.state.device.as_ref(),
            self.login,
            self.state.expiry_status,
        );
        self.navigate_to(target);
    }

    fn navigate_to(&mut self, target: Route) {
        let current = self.history.current();
        if target == current {
            return;
        }
        let transition = resolver::transition_between(current, target);
        if let Some(update) = self.history.apply(target, transition) {
            debug!(from = %current, to = %target, transition = %transition, "navigating");
            self.navigation_tx.send_replace(update);
        }
    }

    fn notify(&self, notice: AppNotice) {
        // No receivers is fine; notices are fire-and-forget.
        let _ = self.notice_tx.send(notice);
    }
}

// ── Startup fetch ────────────────────────────────────────────────

/// Fetch the startup snapshot. Device and tunnel state are required; the
/// remaining facets degrade to "unknown" and are filled in by later
/// events.
async fn fetch_initial_state<R: DaemonRpc>(rpc: &R) -> Result<InitialState, IpcError> {
    let device = rpc.get_device().await?;
    let account_history = rpc.get_account_history().await.unwrap_or_default();

    let account_data = match &device {
        DeviceState::LoggedIn(account) => rpc
            .get_account_data(account.account_number.clone())
            .await
            .map_err(|error| warn!(%error, "account data fetch failed"))
            .ok(),
        DeviceState::LoggedOut | DeviceState::Revoked => None,
    };

    let tunnel = rpc.get_tunnel_state().await?;
    let settings = rpc.get_settings().await.ok();
    let relay_list = rpc.get_relay_locations().await.ok();
    let version_info = rpc.get_version_info().await.ok();
    let current_version = rpc.get_current_version().await.ok();

    Ok(InitialState {
        device,
        account_history,
        account_data,
        tunnel,
        settings,
        relay_list,
        version_info,
        current_version,
    })
}
