// ── Navigation ──
//
// Pure route resolution plus the history stack it drives. The resolver
// never touches state; the controller feeds it the reconciled view and
// applies the result through `NavigationHistory`.

pub mod history;
pub mod resolver;
pub mod route;

pub use history::{HistorySnapshot, NavigationHistory, NavigationUpdate};
pub use route::{Route, TransitionKind};
