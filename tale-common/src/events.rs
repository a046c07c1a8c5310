//! Event types for the story navigator
//!
//! The navigator publishes state transitions on an [`EventBus`] so the
//! presentation layer can react without polling. Emission never blocks:
//! a broadcast send either enqueues or reports that nobody is listening.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Which producer asked for a page change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrigin {
    /// Playback time moved into another page's segment range
    Sync,
    /// User turned the page
    Manual,
}

impl std::fmt::Display for PageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageOrigin::Sync => write!(f, "sync"),
            PageOrigin::Manual => write!(f, "manual"),
        }
    }
}

/// Playback state enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackState::Playing => write!(f, "playing"),
            PlaybackState::Paused => write!(f, "paused"),
        }
    }
}

/// Navigator event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NavEvent {
    /// Story or language (re)loaded; navigation restarts on the cover page
    StoryLoaded {
        generation: u64,
        language: String,
        segment_count: usize,
        total_pages: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Highlighted segment changed
    SegmentActivated {
        generation: u64,
        index: usize,
        start: f64,
        end: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Committed page changed
    PageChanged {
        generation: u64,
        old_page: usize,
        new_page: usize,
        origin: PageOrigin,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Play/pause toggled
    PlaybackStateChanged {
        state: PlaybackState,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Mute toggled
    MuteChanged {
        muted: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// Narration reached the end of the track
    PlaybackEnded {
        generation: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

/// One-to-many broadcast of navigator events
///
/// Cloning shares the underlying channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NavEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero (see `tokio::sync::broadcast::channel`).
    /// `NavigatorConfig::validate` rejects a zero capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use tale_common::events::EventBus;
    ///
    /// let bus = EventBus::new(64);
    /// assert_eq!(bus.capacity(), 64);
    /// ```
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists,
    /// `Err` if nobody is listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: NavEvent,
    ) -> Result<usize, broadcast::error::SendError<NavEvent>> {
        self.tx.send(event)
    }

    /// Emit, ignoring the no-subscriber case
    pub fn emit_lossy(&self, event: NavEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
