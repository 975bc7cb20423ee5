// ── Navigation history ──
//
// The ordered back-stack behind the displayed screen. Mutated exclusively
// by the controller with the resolver's output; serializable so the shell
// can persist it across restarts.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

use super::route::{Route, TransitionKind};

/// What the rendering layer receives on every applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationUpdate {
    pub route: Route,
    pub transition: TransitionKind,
}

/// Serializable form of the history: route entries plus current index.
/// Restoring reproduces the stack verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub entries: Vec<Route>,
    pub index: usize,
}

/// Route stack with a current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<Route>,
    index: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![Route::Launch],
            index: 0,
        }
    }

    pub fn current(&self) -> Route {
        self.entries[self.index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply a transition to `route`. A no-op when `route` is already
    /// current, so repeated recomputation never disturbs the stack.
    ///
    /// - `Push` discards any forward entries and appends.
    /// - `Pop` returns to the most recent earlier occurrence of `route`,
    ///   falling back to replacing the current entry when there is none.
    /// - `Dismiss` collapses the stack onto `route`.
    pub fn apply(&mut self, route: Route, transition: TransitionKind) -> Option<NavigationUpdate> {
        if route == self.current() {
            return None;
        }

        match transition {
            TransitionKind::Push => {
                self.entries.truncate(self.index + 1);
                self.entries.push(route);
                self.index += 1;
            }
            TransitionKind::Pop => {
                match self.entries[..self.index].iter().rposition(|&r| r == route) {
                    Some(pos) => {
                        self.entries.truncate(pos + 1);
                        self.index = pos;
                    }
                    None => {
                        self.entries.truncate(self.index + 1);
                        self.entries[self.index] = route;
                    }
                }
            }
            TransitionKind::Dismiss => {
                self.entries = vec![route];
                self.index = 0;
            }
        }

        Some(NavigationUpdate { route, transition })
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.clone(),
            index: self.index,
        }
    }

    /// Restore a persisted stack verbatim. The returned update replays the
    /// restored route with a `Pop` transition (no slide-in animation, no
    /// redirect side effects).
    pub fn restore(snapshot: HistorySnapshot) -> Result<(Self, NavigationUpdate), CoreError> {
        if snapshot.entries.is_empty() {
            return Err(CoreError::InvalidSnapshot("empty history".to_owned()));
        }
        if snapshot.index >= snapshot.entries.len() {
            return Err(CoreError::InvalidSnapshot(format!(
                "index {} out of range for {} entries",
                snapshot.index,
                snapshot.entries.len()
            )));
        }

        let history = Self {
            entries: snapshot.entries,
            index: snapshot.index,
        };
        let update = NavigationUpdate {
            route: history.current(),
            transition: TransitionKind::Pop,
        };
        Ok((history, update))
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}
