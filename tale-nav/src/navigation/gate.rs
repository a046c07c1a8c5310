//! Arbitration between sync-driven and manual page requests
//!
//! Both producers feed one consumer in event-arrival order. Every request
//! is clamped into `[0, total_pages - 1]`; nothing is ever rejected. Under
//! the default policy the most recently processed request wins. The
//! `ManualHold` policy additionally ignores sync requests for a while
//! after the reader turns a page.

use serde::{Deserialize, Serialize};
use tale_common::config::ConflictPolicy;
use tale_common::events::PageOrigin;
use tracing::debug;

use crate::state::NavigatorState;

/// Manual page turn direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Click on the left half goes back, anywhere else goes forward
    pub fn from_click(x: f64, viewport_width: f64) -> Self {
        if x < viewport_width / 2.0 {
            Direction::Prev
        } else {
            Direction::Next
        }
    }

    fn step(self) -> i64 {
        match self {
            Direction::Next => 1,
            Direction::Prev => -1,
        }
    }
}

/// Commits page requests onto [`NavigatorState`]
#[derive(Debug, Clone)]
pub struct NavigationGate {
    total_pages: usize,
    policy: ConflictPolicy,

    /// Sync requests before this playback time are ignored (ManualHold only)
    hold_until: Option<f64>,
}

impl NavigationGate {
    /// Gate over `total_pages` pages (at least the cover page)
    pub fn new(total_pages: usize, policy: ConflictPolicy) -> Self {
        Self {
            total_pages: total_pages.max(1),
            policy,
            hold_until: None,
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn last_page(&self) -> usize {
        self.total_pages - 1
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Clamp `target` and commit it, returning the committed page.
    ///
    /// `now` is the playback time the request is processed at; only the
    /// `ManualHold` policy looks at it. A suppressed sync request leaves
    /// the current page in place and returns it.
    pub fn request_page(
        &mut self,
        state: &mut NavigatorState,
        target: i64,
        origin: PageOrigin,
        now: f64,
    ) -> usize {
        let clamped = target.clamp(0, self.last_page() as i64) as usize;

        match origin {
            PageOrigin::Sync => {
                if let Some(until) = self.hold_until {
                    if now < until {
                        debug!(
                            "nav-gate: sync request for page {} suppressed until t={:.2} (now t={:.2})",
                            clamped, until, now
                        );
                        return state.current_page;
                    }
                    self.hold_until = None;
                }
            }
            PageOrigin::Manual => {
                // A turn clamped onto the current page holds nothing
                if let ConflictPolicy::ManualHold { hold_secs } = self.policy {
                    if clamped != state.current_page {
                        self.hold_until = Some(now + hold_secs);
                    }
                }
            }
        }

        if clamped != state.current_page {
            debug!(
                "nav-gate: commit page {} -> {} origin={} requested={}",
                state.current_page, clamped, origin, target
            );
            state.current_page = clamped;
        }

        state.current_page
    }

    /// Manual one-page turn relative to the current page
    pub fn turn_page(&mut self, state: &mut NavigatorState, direction: Direction, now: f64) -> usize {
        let target = state.current_page as i64 + direction.step();
        self.request_page(state, target, PageOrigin::Manual, now)
    }

    /// Whether a turn in `direction` would move the page
    pub fn can_turn(&self, state: &NavigatorState, direction: Direction) -> bool {
        match direction {
            Direction::Next => state.current_page < self.last_page(),
            Direction::Prev => state.current_page > 0,
        }
    }

    /// Drop any pending manual hold
    pub fn clear_hold(&mut self) {
        self.hold_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(total_pages: usize) -> NavigationGate {
        NavigationGate::new(total_pages, ConflictPolicy::LastWriterWins)
    }

    #[test]
    fn test_clamping() {
        let mut gate = gate(4);
        let mut state = NavigatorState::new();

        assert_eq!(gate.request_page(&mut state, -5, PageOrigin::Manual, 0.0), 0);
        assert_eq!(state.current_page(), 0);

        assert_eq!(gate.request_page(&mut state, 99, PageOrigin::Sync, 0.0), 3);
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn test_idempotent_request() {
        let mut gate = gate(4);
        let mut state = NavigatorState::new();

        gate.request_page(&mut state, 2, PageOrigin::Sync, 0.0);
        let before = state;
        assert_eq!(gate.request_page(&mut state, 2, PageOrigin::Sync, 0.5), 2);
        assert_eq!(state, before);
    }

    #[test]
    fn test_last_writer_wins_across_origins() {
        let mut gate = gate(5);
        let mut state = NavigatorState::new();

        gate.request_page(&mut state, 3, PageOrigin::Sync, 1.0);
        gate.turn_page(&mut state, Direction::Prev, 1.1);
        assert_eq!(state.current_page(), 2);

        // Next sync request overrides the manual turn straight away
        gate.request_page(&mut state, 3, PageOrigin::Sync, 1.2);
        assert_eq!(state.current_page(), 3);
    }

    #[test]
    fn test_turn_page_stops_at_bounds() {
        let mut gate = gate(3);
        let mut state = NavigatorState::new();

        assert!(!gate.can_turn(&state, Direction::Prev));
        assert_eq!(gate.turn_page(&mut state, Direction::Prev, 0.0), 0);

        assert_eq!(gate.turn_page(&mut state, Direction::Next, 0.0), 1);
        assert_eq!(gate.turn_page(&mut state, Direction::Next, 0.0), 2);
        assert!(!gate.can_turn(&state, Direction::Next));
        assert_eq!(gate.turn_page(&mut state, Direction::Next, 0.0), 2);
        assert!(gate.can_turn(&state, Direction::Prev));
    }

    #[test]
    fn test_cover_only_document() {
        let mut gate = gate(0);
        let mut state = NavigatorState::new();

        assert_eq!(gate.total_pages(), 1);
        assert_eq!(gate.turn_page(&mut state, Direction::Next, 0.0), 0);
        assert_eq!(gate.request_page(&mut state, 7, PageOrigin::Sync, 0.0), 0);
    }

    #[test]
    fn test_manual_hold_suppresses_sync_until_elapsed() {
        let mut gate = NavigationGate::new(5, ConflictPolicy::ManualHold { hold_secs: 2.0 });
        let mut state = NavigatorState::new();

        gate.request_page(&mut state, 2, PageOrigin::Sync, 4.0);
        gate.turn_page(&mut state, Direction::Prev, 4.5);
        assert_eq!(state.current_page(), 1);

        // Within the hold window the sync request is ignored
        assert_eq!(gate.request_page(&mut state, 3, PageOrigin::Sync, 5.0), 1);
        assert_eq!(state.current_page(), 1);

        // Once playback passes the window, sync wins again
        assert_eq!(gate.request_page(&mut state, 3, PageOrigin::Sync, 6.5), 3);
    }

    #[test]
    fn test_clamped_manual_turn_does_not_hold() {
        let mut gate = NavigationGate::new(3, ConflictPolicy::ManualHold { hold_secs: 2.0 });
        let mut state = NavigatorState::new();

        assert_eq!(gate.turn_page(&mut state, Direction::Prev, 0.0), 0);
        assert_eq!(gate.request_page(&mut state, 1, PageOrigin::Sync, 0.5), 1);

        gate.request_page(&mut state, 2, PageOrigin::Sync, 1.0);
        assert_eq!(gate.turn_page(&mut state, Direction::Next, 1.2), 2);
        assert_eq!(gate.request_page(&mut state, 1, PageOrigin::Sync, 1.5), 1);
    }

    #[test]
    fn test_manual_hold_cleared() {
        let mut gate = NavigationGate::new(5, ConflictPolicy::ManualHold { hold_secs: 10.0 });
        let mut state = NavigatorState::new();

        gate.turn_page(&mut state, Direction::Next, 0.0);
        gate.clear_hold();
        assert_eq!(gate.request_page(&mut state, 4, PageOrigin::Sync, 0.1), 4);
    }

    #[test]
    fn test_direction_from_click() {
        assert_eq!(Direction::from_click(10.0, 1000.0), Direction::Prev);
        assert_eq!(Direction::from_click(499.9, 1000.0), Direction::Prev);
        assert_eq!(Direction::from_click(500.0, 1000.0), Direction::Next);
        assert_eq!(Direction::from_click(990.0, 1000.0), Direction::Next);
    }
}
