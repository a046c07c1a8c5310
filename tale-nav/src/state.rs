//! Navigator state
//!
//! `NavigatorState` is created when a story is loaded and discarded when
//! the story or language changes. Only the sync controller and the
//! navigation gate write to it.

use serde::Serialize;
use tale_common::Segment;

/// Highlighted segment and committed page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct NavigatorState {
    /// Index into the flattened segment sequence; `None` until a match
    pub(crate) active_segment: Option<usize>,

    /// Committed page, `0` being the cover page
    pub(crate) current_page: usize,
}

impl NavigatorState {
    /// Fresh state: cover page, nothing highlighted
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_segment(&self) -> Option<usize> {
        self.active_segment
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn is_cover(&self) -> bool {
        self.current_page == 0
    }
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigatorSnapshot {
    pub generation: u64,
    pub language: String,
    pub active_index: Option<usize>,
    pub active_segment: Option<Segment>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Narration metadata has arrived for the current story
    pub audio_loaded: bool,
    pub is_playing: bool,
    pub is_muted: bool,
    pub current_time: f64,
    pub duration: f64,
    pub progress_percent: f64,
}
