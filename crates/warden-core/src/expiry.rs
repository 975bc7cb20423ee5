// ── Expiry monitor ──
//
// Decides, on every account-data update, what the tri-state expiry status
// becomes and whether a timer must be armed to catch the exact expiry
// moment without waiting for another daemon event. The timer itself lives
// in the controller's scheduler; this module only evaluates.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::store::ExpiryStatus;

/// Margin added past the expiry instant so the timer fires strictly after
/// it.
const EXPIRY_TIMER_MARGIN: Duration = Duration::from_millis(1);

/// Outcome of re-evaluating the expiry against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpiryEvaluation {
    pub status: ExpiryStatus,
    /// The observed expiry value differs from the previous observation
    /// (including None ↔ Some).
    pub expiry_changed: bool,
    /// The status crossed into or out of `Expired`; the controller resets
    /// navigation on this, unless a login redirect is pending.
    pub crossed_expired_boundary: bool,
    /// Arm a one-shot timer after this delay to catch the expiry moment.
    /// None when already expired or the expiry is outside the window.
    pub arm_in: Option<Duration>,
}

pub(crate) struct ExpiryMonitor {
    close_to_expiry_window: chrono::Duration,
    observed: Option<DateTime<Utc>>,
}

impl ExpiryMonitor {
    pub fn new(close_to_expiry_window: chrono::Duration) -> Self {
        Self {
            close_to_expiry_window,
            observed: None,
        }
    }

    /// Evaluate a (possibly unchanged) expiry value against `now`. The
    /// caller cancels any existing timer before acting on `arm_in`.
    pub fn account_updated(
        &mut self,
        expiry: Option<DateTime<Utc>>,
        previous: ExpiryStatus,
        now: DateTime<Utc>,
    ) -> ExpiryEvaluation {
        let expiry_changed = expiry != self.observed;
        self.observed = expiry;

        let status = match expiry {
            None => ExpiryStatus::None,
            Some(at) if at <= now => ExpiryStatus::Expired,
            Some(_) => match previous {
                // Time moved back into the future after an expiry: the
                // account was topped up.
                ExpiryStatus::Expired | ExpiryStatus::TimeAdded => ExpiryStatus::TimeAdded,
                ExpiryStatus::None => ExpiryStatus::None,
            },
        };

        let arm_in = match expiry {
            Some(at) if at > now && at - now <= self.close_to_expiry_window => {
                (at - now).to_std().ok().map(|d| d + EXPIRY_TIMER_MARGIN)
            }
            _ => None,
        };

        ExpiryEvaluation {
            status,
            expiry_changed,
            crossed_expired_boundary: crossed(previous, status),
            arm_in,
        }
    }

    /// The armed timer fired: the expiry instant has passed. No clock
    /// re-check -- the timer was armed for exactly this moment.
    pub fn timer_elapsed(&self, previous: ExpiryStatus) -> ExpiryEvaluation {
        let status = ExpiryStatus::Expired;
        ExpiryEvaluation {
            status,
            expiry_changed: false,
            crossed_expired_boundary: crossed(previous, status),
            arm_in: None,
        }
    }

    /// Forget the observed expiry (logout).
    pub fn reset(&mut self) {
        self.observed = None;
    }
}

fn crossed(previous: ExpiryStatus, next: ExpiryStatus) -> bool {
    (previous == ExpiryStatus::Expired) != (next == ExpiryStatus::Expired)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> ExpiryMonitor {
        ExpiryMonitor::new(chrono::Duration::days(3))
    }

    #[test]
    fn future_expiry_inside_window_arms_timer() {
        let mut monitor = monitor();
        let now = Utc::now();
        let eval =
            monitor.account_updated(Some(now + chrono::Duration::seconds(10)), ExpiryStatus::None, now);

        assert_eq!(eval.status, ExpiryStatus::None);
        assert!(eval.expiry_changed);
        assert!(!eval.crossed_expired_boundary);
        let delay = eval.arm_in.expect("timer armed");
        assert_eq!(delay, Duration::from_secs(10) + Duration::from_millis(1));
    }

    #[test]
    fn expiry_outside_window_arms_nothing() {
        let mut monitor = monitor();
        let now = Utc::now();
        let eval =
            monitor.account_updated(Some(now + chrono::Duration::days(30)), ExpiryStatus::None, now);
        assert_eq!(eval.status, ExpiryStatus::None);
        assert_eq!(eval.arm_in, None);
    }

    #[test]
    fn past_expiry_is_expired_without_timer() {
        let mut monitor = monitor();
        let now = Utc::now();
        let eval =
            monitor.account_updated(Some(now - chrono::Duration::days(1)), ExpiryStatus::None, now);

        assert_eq!(eval.status, ExpiryStatus::Expired);
        assert!(eval.crossed_expired_boundary);
        assert_eq!(eval.arm_in, None);
    }

    #[test]
    fn topping_up_an_expired_account_becomes_time_added() {
        let mut monitor = monitor();
        let now = Utc::now();
        monitor.account_updated(Some(now - chrono::Duration::days(1)), ExpiryStatus::None, now);

        let eval = monitor.account_updated(
            Some(now + chrono::Duration::days(30)),
            ExpiryStatus::Expired,
            now,
        );
        assert_eq!(eval.status, ExpiryStatus::TimeAdded);
        assert!(eval.expiry_changed);
        assert!(eval.crossed_expired_boundary);
        assert_eq!(eval.arm_in, None);
    }

    #[test]
    fn unchanged_expiry_does_not_report_change() {
        let mut monitor = monitor();
        let now = Utc::now();
        let expiry = Some(now + chrono::Duration::hours(1));
        monitor.account_updated(expiry, ExpiryStatus::None, now);
        let eval = monitor.account_updated(expiry, ExpiryStatus::None, now);

        assert!(!eval.expiry_changed);
        assert!(!eval.crossed_expired_boundary);
        // Still re-arms: the caller cancelled the previous timer first.
        assert!(eval.arm_in.is_some());
    }

    #[test]
    fn timer_elapse_crosses_into_expired_exactly_once() {
        let monitor = monitor();
        let eval = monitor.timer_elapsed(ExpiryStatus::None);
        assert_eq!(eval.status, ExpiryStatus::Expired);
        assert!(eval.crossed_expired_boundary);

        // A second evaluation from the already-expired status no longer
        // reports a boundary crossing.
        let again = monitor.timer_elapsed(ExpiryStatus::Expired);
        assert!(!again.crossed_expired_boundary);
    }
}
