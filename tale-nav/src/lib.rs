//! # Tale Navigator Library (tale-nav)
//!
//! Playback-synchronized navigation for narrated, paginated stories.
//!
//! **Purpose:** Map the advancing narration time to the segment being
//! spoken, group segments into fixed-size pages behind a cover page, turn
//! pages to keep the spoken segment visible, and reconcile those turns with
//! the reader's own page turns.
//!
//! **Architecture:** Single-threaded and event-driven. Every handler runs to
//! completion before the next event is processed; no locks are involved.
//! Audio decoding and rendering stay outside, behind [`AudioTransport`] and
//! the read-only [`NavigatorSnapshot`].

pub mod navigation;
pub mod navigator;
pub mod playback;
pub mod state;

pub use navigation::{
    Direction, NavigationGate, Page, Paginator, PlaybackSyncController, SegmentIndex, SyncOutcome,
};
pub use navigator::{PlaybackEvent, StoryNavigator};
pub use playback::{AudioTransport, NullTransport, PlaybackController};
pub use state::{NavigatorSnapshot, NavigatorState};
pub use tale_common::{Error, Result};
