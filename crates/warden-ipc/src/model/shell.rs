// ── Shell-side state ──
//
// Delivered by the windowing shell that embeds the client, not by the
// daemon: frontend preferences and window geometry.

use serde::{Deserialize, Serialize};

/// Frontend preferences owned by the shell process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuiSettings {
    pub animate_map: bool,
    pub start_minimized: bool,
    pub unpinned_window: bool,
    pub preferred_locale: String,
}

impl Default for GuiSettings {
    fn default() -> Self {
        Self {
            animate_map: true,
            start_minimized: false,
            unpinned_window: false,
            preferred_locale: "system".to_owned(),
        }
    }
}

/// Window geometry hint used to anchor the app to the tray icon.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowShape {
    pub arrow_x: Option<f32>,
}
