// ── Login/account sequencer ──
//
// Tracks whether the user is mid-login, mid-account-creation, or picking a
// device to revoke, so that a "logged in" device event from the daemon can
// be routed to the right completion action. The sequence is an explicit
// value: every transition consumes the old state and returns the new one,
// which keeps illegal transitions out of the type.

/// Where an interactive login/account flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginSequence {
    /// No flow in progress. Unsolicited device events apply directly.
    #[default]
    None,
    /// A login command is in flight.
    LoggingIn {
        /// The login resumed after the user picked a device to revoke in
        /// the too-many-devices flow.
        via_device_pick: bool,
    },
    /// An account-creation command is in flight.
    CreatingAccount,
    /// The device limit was hit; the user is choosing a device to revoke.
    TooManyDevices,
}

/// How a "logged in" device event completes the current sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginCompletion {
    /// Nothing was in flight here: another session logged in. Navigation
    /// resets immediately, no redirect.
    Unsolicited,
    /// Login after picking a device. Navigation resets immediately.
    AfterDevicePick,
    /// Direct login. A delayed redirect shows the confirmation screen
    /// briefly before moving on to the main screen.
    Direct,
    /// Account creation finished; that flow drives its own navigation.
    NewAccount,
}

impl LoginSequence {
    /// Start a login attempt. From [`TooManyDevices`](Self::TooManyDevices)
    /// this is the resume-after-pick path.
    pub fn begin_login(self) -> LoginSequence {
        LoginSequence::LoggingIn {
            via_device_pick: matches!(self, LoginSequence::TooManyDevices),
        }
    }

    pub fn begin_account_creation(self) -> LoginSequence {
        LoginSequence::CreatingAccount
    }

    /// Abandon the flow locally without contacting the daemon.
    pub fn cancel(self) -> LoginSequence {
        LoginSequence::None
    }

    /// The login or account-creation command was rejected (anything other
    /// than the device-limit case). Returning to `None` keeps retry
    /// possible.
    pub fn rejected(self) -> LoginSequence {
        LoginSequence::None
    }

    /// The login command was rejected with the device-limit error and the
    /// device list arrived; the picker takes over.
    pub fn device_limit_reached(self) -> LoginSequence {
        LoginSequence::TooManyDevices
    }

    /// A device event reported a logged-in state.
    pub fn on_logged_in(self) -> (LoginSequence, LoginCompletion) {
        let completion = match self {
            LoginSequence::None | LoginSequence::TooManyDevices => LoginCompletion::Unsolicited,
            LoginSequence::LoggingIn {
                via_device_pick: true,
            } => LoginCompletion::AfterDevicePick,
            LoginSequence::LoggingIn {
                via_device_pick: false,
            } => LoginCompletion::Direct,
            LoginSequence::CreatingAccount => LoginCompletion::NewAccount,
        };
        (LoginSequence::None, completion)
    }

    /// A device event reported a logged-out or revoked state. Completes any
    /// cycle in progress.
    pub fn on_logged_out(self) -> LoginSequence {
        LoginSequence::None
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, LoginSequence::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_login_completes_with_redirect() {
        let seq = LoginSequence::None.begin_login();
        assert_eq!(
            seq,
            LoginSequence::LoggingIn {
                via_device_pick: false
            }
        );
        let (seq, completion) = seq.on_logged_in();
        assert_eq!(seq, LoginSequence::None);
        assert_eq!(completion, LoginCompletion::Direct);
    }

    #[test]
    fn login_after_device_pick_resets_immediately() {
        let seq = LoginSequence::None
            .begin_login()
            .device_limit_reached()
            .begin_login();
        let (seq, completion) = seq.on_logged_in();
        assert_eq!(seq, LoginSequence::None);
        assert_eq!(completion, LoginCompletion::AfterDevicePick);
    }

    #[test]
    fn unsolicited_login_while_idle() {
        let (seq, completion) = LoginSequence::None.on_logged_in();
        assert_eq!(seq, LoginSequence::None);
        assert_eq!(completion, LoginCompletion::Unsolicited);
    }

    #[test]
    fn rejection_returns_to_idle_for_retry() {
        let seq = LoginSequence::None.begin_login().rejected();
        assert!(seq.is_idle());
        // A later attempt starts a fresh direct login.
        assert_eq!(
            seq.begin_login(),
            LoginSequence::LoggingIn {
                via_device_pick: false
            }
        );
    }

    #[test]
    fn cancel_then_late_event_is_unsolicited() {
        let seq = LoginSequence::None.begin_login().cancel();
        let (_, completion) = seq.on_logged_in();
        assert_eq!(completion, LoginCompletion::Unsolicited);
    }

    #[test]
    fn account_creation_completion() {
        let seq = LoginSequence::None.begin_account_creation();
        let (seq, completion) = seq.on_logged_in();
        assert_eq!(seq, LoginSequence::None);
        assert_eq!(completion, LoginCompletion::NewAccount);
    }

    #[test]
    fn logout_event_completes_any_cycle() {
        assert!(LoginSequence::CreatingAccount.on_logged_out().is_idle());
        assert!(LoginSequence::TooManyDevices.on_logged_out().is_idle());
        let logging_in = LoginSequence::None.begin_login();
        assert!(logging_in.on_logged_out().is_idle());
    }
}
