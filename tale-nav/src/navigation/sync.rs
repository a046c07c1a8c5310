//! Playback-time driven highlighting and page turns
//!
//! On each time event the controller looks up the owning segment. A new
//! segment becomes the highlight, and if it sits on another page a sync
//! request goes to the [`NavigationGate`]. Page turns only follow segment
//! changes: a reader who turns away from the spoken page stays there until
//! narration reaches the next segment.

use tale_common::events::PageOrigin;
use tracing::debug;

use super::gate::NavigationGate;
use super::paginator::Paginator;
use super::segment_index::SegmentIndex;
use crate::state::NavigatorState;

/// What one time event changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncOutcome {
    /// Newly highlighted segment
    pub activated: Option<usize>,
    /// Highlight dropped in a gap (non-sticky policy only)
    pub cleared: bool,
    /// Page the gate moved to because of this event
    pub committed_page: Option<usize>,
}

impl SyncOutcome {
    pub fn changed(&self) -> bool {
        self.activated.is_some() || self.cleared || self.committed_page.is_some()
    }
}

/// Drives [`NavigatorState`] from playback time
#[derive(Debug, Clone)]
pub struct PlaybackSyncController {
    index: SegmentIndex,
    paginator: Paginator,

    /// Keep the last matched segment highlighted when `locate` finds nothing
    sticky_highlight: bool,
}

impl PlaybackSyncController {
    pub fn new(index: SegmentIndex, paginator: Paginator, sticky_highlight: bool) -> Self {
        Self {
            index,
            paginator,
            sticky_highlight,
        }
    }

    pub fn index(&self) -> &SegmentIndex {
        &self.index
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn sticky_highlight(&self) -> bool {
        self.sticky_highlight
    }

    /// Pages for the indexed sequence, cover included
    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.index.len())
    }

    /// Process one playback time event
    pub fn on_time_update(
        &self,
        state: &mut NavigatorState,
        gate: &mut NavigationGate,
        t: f64,
    ) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        let Some(found) = self.index.locate(t) else {
            if !self.sticky_highlight && state.active_segment.is_some() {
                debug!("nav-sync: t={:.2} in gap, clearing highlight", t);
                state.active_segment = None;
                outcome.cleared = true;
            }
            return outcome;
        };

        if state.active_segment == Some(found) {
            return outcome;
        }

        debug!(
            "nav-sync: t={:.2} activates segment {} (was {:?})",
            t, found, state.active_segment
        );
        state.active_segment = Some(found);
        outcome.activated = Some(found);

        let desired = self.paginator.page_of(found);
        if desired != state.current_page && desired < gate.total_pages() {
            let before = state.current_page;
            let committed = gate.request_page(state, desired as i64, PageOrigin::Sync, t);
            if committed != before {
                outcome.committed_page = Some(committed);
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_common::config::ConflictPolicy;
    use tale_common::Segment;

    fn controller(segments: Vec<Segment>, sticky: bool) -> (PlaybackSyncController, NavigationGate) {
        let sync = PlaybackSyncController::new(
            SegmentIndex::new(segments),
            Paginator::new(4).unwrap(),
            sticky,
        );
        let gate = NavigationGate::new(sync.total_pages(), ConflictPolicy::LastWriterWins);
        (sync, gate)
    }

    fn story_words() -> Vec<Segment> {
        vec![
            Segment::new(0.0, 1.0, "Once"),
            Segment::new(1.0, 2.0, "upon"),
            Segment::new(2.0, 3.0, "a"),
            Segment::new(3.0, 4.0, "time"),
            Segment::new(4.0, 5.0, "the"),
        ]
    }

    #[test]
    fn test_first_match_turns_off_cover() {
        let (sync, mut gate) = controller(story_words(), true);
        let mut state = NavigatorState::new();

        let outcome = sync.on_time_update(&mut state, &mut gate, 0.5);
        assert_eq!(outcome.activated, Some(0));
        assert_eq!(outcome.committed_page, Some(1));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_same_segment_is_a_no_op() {
        let (sync, mut gate) = controller(story_words(), true);
        let mut state = NavigatorState::new();

        sync.on_time_update(&mut state, &mut gate, 0.2);
        let outcome = sync.on_time_update(&mut state, &mut gate, 0.8);
        assert!(!outcome.changed());
    }

    #[test]
    fn test_sticky_highlight_survives_gap() {
        let (sync, mut gate) = controller(
            vec![Segment::new(0.0, 2.0, "a"), Segment::new(5.0, 7.0, "b")],
            true,
        );
        let mut state = NavigatorState::new();

        sync.on_time_update(&mut state, &mut gate, 1.0);
        assert_eq!(state.active_segment(), Some(0));

        let outcome = sync.on_time_update(&mut state, &mut gate, 3.0);
        assert!(!outcome.changed());
        assert_eq!(state.active_segment(), Some(0));
    }

    #[test]
    fn test_non_sticky_clears_in_gap_without_turning() {
        let (sync, mut gate) = controller(
            vec![Segment::new(0.0, 2.0, "a"), Segment::new(5.0, 7.0, "b")],
            false,
        );
        let mut state = NavigatorState::new();

        sync.on_time_update(&mut state, &mut gate, 1.0);
        let outcome = sync.on_time_update(&mut state, &mut gate, 3.0);
        assert!(outcome.cleared);
        assert_eq!(state.active_segment(), None);
        assert_eq!(state.current_page(), 1);

        // Clearing twice reports nothing new
        assert!(!sync.on_time_update(&mut state, &mut gate, 3.5).changed());
    }

    #[test]
    fn test_manual_turn_kept_until_segment_changes() {
        let (sync, mut gate) = controller(story_words(), true);
        let mut state = NavigatorState::new();

        sync.on_time_update(&mut state, &mut gate, 4.2);
        assert_eq!(state.current_page(), 2);

        gate.turn_page(&mut state, crate::navigation::Direction::Prev, 4.3);
        assert_eq!(state.current_page(), 1);

        // Still segment 4: page is left where the reader put it
        sync.on_time_update(&mut state, &mut gate, 4.6);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_empty_sequence_never_moves() {
        let (sync, mut gate) = controller(vec![], true);
        let mut state = NavigatorState::new();

        assert_eq!(sync.total_pages(), 1);
        assert!(!sync.on_time_update(&mut state, &mut gate, 0.0).changed());
        assert_eq!(state, NavigatorState::new());
    }
}
