// ── Controller tuning ──
//
// Built by the embedding shell and handed to `AppController` -- core never
// reads config files.

use std::time::Duration;

/// Timing knobs for the controller.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// How long the post-login confirmation screen stays up before the
    /// client moves on to the main screen.
    pub login_redirect_delay: Duration,
    /// How far ahead of account expiry the expiry timer is armed. Expiries
    /// further out are caught by the next account-data event instead.
    pub close_to_expiry_window: chrono::Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            login_redirect_delay: Duration::from_millis(1000),
            close_to_expiry_window: chrono::Duration::days(3),
        }
    }
}
