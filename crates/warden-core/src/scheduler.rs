// ── Delayed-message scheduler ──
//
// One pending delayed message per instance. Scheduling again replaces the
// pending task; cancellation must win even against a timer that has already
// elapsed, so every armed timer carries a generation token and delivery is
// only honored while that generation is still the pending one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Identifies one armed timer. Returned messages embed the token; the owner
/// hands it back through [`Scheduler::try_fire`] to check it is still live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

struct Pending {
    seq: u64,
    handle: JoinHandle<()>,
}

/// Schedules at most one delayed message onto an unbounded channel.
///
/// The receiving loop must pass each delivered token to [`try_fire`] before
/// acting on it: a stale token (cancelled or replaced timer) returns
/// `false`, which makes cancellation effective up to the point the message
/// is handled even if the sleep had already completed.
///
/// [`try_fire`]: Scheduler::try_fire
pub struct Scheduler<M> {
    tx: mpsc::UnboundedSender<M>,
    next_seq: u64,
    pending: Option<Pending>,
}

impl<M: Send + 'static> Scheduler<M> {
    pub fn new(tx: mpsc::UnboundedSender<M>) -> Self {
        Self {
            tx,
            next_seq: 0,
            pending: None,
        }
    }

    /// Arm a timer that delivers `make_msg(token)` after `delay`, replacing
    /// any previously pending timer.
    pub fn schedule(&mut self, delay: Duration, make_msg: impl FnOnce(TimerToken) -> M) {
        self.cancel();

        self.next_seq += 1;
        let seq = self.next_seq;
        let msg = make_msg(TimerToken(seq));
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the owning actor shut down; nothing to do.
            let _ = tx.send(msg);
        });

        self.pending = Some(Pending { seq, handle });
    }

    /// Disarm the pending timer, if any. Idempotent. A message the timer
    /// already queued will be rejected by [`try_fire`](Self::try_fire).
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }

    /// Whether a timer is armed and its message has not yet been accepted.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Accept a delivered timer message. Returns `true` exactly once per
    /// armed timer; stale tokens (from a cancelled or replaced timer)
    /// return `false` and must be ignored by the caller.
    pub fn try_fire(&mut self, token: TimerToken) -> bool {
        match &self.pending {
            Some(pending) if pending.seq == token.0 => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl<M> Drop for Scheduler<M> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
    }
}
