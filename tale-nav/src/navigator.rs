//! Story navigator composition
//!
//! `StoryNavigator` wires the playback controller, sync controller and
//! navigation gate together and owns the [`NavigatorState`] they mutate.
//!
//! # Event flow
//!
//! - Transport time events: [`PlaybackController`] → [`PlaybackSyncController`]
//!   → [`SegmentIndex`] lookup → [`NavigationGate`] (origin `sync`)
//! - Reader clicks: straight to [`NavigationGate`] (origin `manual`)
//!
//! Every story or language switch is a reset that bumps the generation
//! stamp. Transport events carrying an older stamp are ignored.

use tale_common::config::NavigatorConfig;
use tale_common::events::{EventBus, NavEvent, PageOrigin, PlaybackState};
use tale_common::story::validate_segments;
use tale_common::{time, Result, Segment, Story};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::navigation::{
    Direction, NavigationGate, Paginator, PlaybackSyncController, SegmentIndex, SyncOutcome,
};
use crate::playback::{AudioTransport, PlaybackController};
use crate::state::{NavigatorSnapshot, NavigatorState};

/// Event reported by the audio transport, stamped with the generation it
/// was produced for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    TimeUpdate { generation: u64, time: f64 },
    LoadedMetadata { generation: u64, duration: f64 },
    Ended { generation: u64 },
}

impl PlaybackEvent {
    pub fn generation(&self) -> u64 {
        match *self {
            PlaybackEvent::TimeUpdate { generation, .. }
            | PlaybackEvent::LoadedMetadata { generation, .. }
            | PlaybackEvent::Ended { generation } => generation,
        }
    }
}

/// Playback-synchronized navigator for one story at a time
pub struct StoryNavigator<T: AudioTransport> {
    config: NavigatorConfig,
    paginator: Paginator,
    story: Option<Story>,
    language: String,
    sync: PlaybackSyncController,
    gate: NavigationGate,
    playback: PlaybackController<T>,
    state: NavigatorState,
    generation: u64,
    audio_loaded: bool,
    events: EventBus,
}

impl<T: AudioTransport> StoryNavigator<T> {
    /// Create a navigator with no story loaded (cover page only)
    pub fn new(config: NavigatorConfig, transport: T) -> Result<Self> {
        config.validate()?;
        let paginator = Paginator::new(config.chunk_size)?;
        let sync = PlaybackSyncController::new(
            SegmentIndex::default(),
            paginator,
            config.sticky_highlight,
        );
        let gate = NavigationGate::new(sync.total_pages(), config.conflict_policy);

        Ok(Self {
            language: config.default_language.clone(),
            paginator,
            story: None,
            sync,
            gate,
            playback: PlaybackController::new(transport),
            state: NavigatorState::new(),
            generation: 0,
            audio_loaded: false,
            events: EventBus::new(config.event_capacity),
            config,
        })
    }

    /// Publish navigator events on a shared `bus` instead of the
    /// navigator's own `event_capacity` sized one
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = bus;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavEvent> {
        self.events.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Load `story` in `language`, resetting navigation to the cover page.
    ///
    /// Returns the new generation stamp. On error (malformed segments or
    /// a transport that refuses the narration source) the previous story
    /// and state stay in place.
    pub fn load_story(&mut self, story: &Story, language: &str) -> Result<u64> {
        let generation = self.reset(story, language)?;
        self.story = Some(story.clone());
        Ok(generation)
    }

    /// Switch language for the loaded story; same reset as a story load.
    ///
    /// Without a story the language is only recorded.
    pub fn set_language(&mut self, language: &str) -> Result<u64> {
        let Some(story) = self.story.take() else {
            self.language = language.to_string();
            return Ok(self.generation);
        };

        let result = self.reset(&story, language);
        self.story = Some(story);
        result
    }

    fn reset(&mut self, story: &Story, language: &str) -> Result<u64> {
        let default_language = self.config.default_language.as_str();
        let segments = story.segments_for(language, default_language);
        validate_segments(&segments)?;

        match story.voice_for(language, default_language) {
            Some(source) => self.playback.load(source)?,
            None => {
                warn!("Story {} has no narration for '{}'", story.id, language);
                self.playback.unload()?;
            }
        }

        self.generation = self.generation.wrapping_add(1);
        let segment_count = segments.len();
        self.sync = PlaybackSyncController::new(
            SegmentIndex::new(segments),
            self.paginator,
            self.config.sticky_highlight,
        );
        self.gate = NavigationGate::new(self.sync.total_pages(), self.config.conflict_policy);
        self.state = NavigatorState::new();
        self.audio_loaded = false;
        self.language = language.to_string();

        info!(
            "Loaded story {} language={} segments={} pages={} generation={}",
            story.id,
            language,
            segment_count,
            self.gate.total_pages(),
            self.generation
        );
        self.emit(NavEvent::StoryLoaded {
            generation: self.generation,
            language: self.language.clone(),
            segment_count,
            total_pages: self.gate.total_pages(),
            timestamp: time::now(),
        });

        Ok(self.generation)
    }

    // ------------------------------------------------------------------
    // Transport events
    // ------------------------------------------------------------------

    /// Apply a stamped transport event; stale stamps are ignored.
    ///
    /// Returns `false` when the event was dropped.
    pub fn handle(&mut self, event: PlaybackEvent) -> bool {
        if event.generation() != self.generation {
            debug!(
                "Ignoring stale {:?} (current generation {})",
                event, self.generation
            );
            return false;
        }

        match event {
            PlaybackEvent::TimeUpdate { time, .. } => {
                self.apply_time(time);
            }
            PlaybackEvent::LoadedMetadata { duration, .. } => {
                self.playback.on_loaded_metadata(duration);
                self.audio_loaded = true;
                debug!("Narration metadata loaded, duration={:.2}s", self.playback.duration());
            }
            PlaybackEvent::Ended { .. } => {
                self.playback.on_ended();
                self.gate.clear_hold();
                self.emit(NavEvent::PlaybackEnded {
                    generation: self.generation,
                    timestamp: time::now(),
                });
                self.apply_time(0.0);
            }
        }
        true
    }

    /// Time update for the current generation
    pub fn on_time_update(&mut self, t: f64) -> SyncOutcome {
        self.apply_time(t)
    }

    /// Metadata for the current generation
    pub fn on_loaded_metadata(&mut self, duration: f64) {
        self.handle(PlaybackEvent::LoadedMetadata {
            generation: self.generation,
            duration,
        });
    }

    /// End of track for the current generation
    pub fn on_ended(&mut self) {
        self.handle(PlaybackEvent::Ended {
            generation: self.generation,
        });
    }

    fn apply_time(&mut self, t: f64) -> SyncOutcome {
        self.playback.on_time_update(t);
        let old_page = self.state.current_page;
        let outcome = self.sync.on_time_update(&mut self.state, &mut self.gate, t);

        if let Some(index) = outcome.activated {
            if let Some(segment) = self.sync.index().get(index) {
                self.emit(NavEvent::SegmentActivated {
                    generation: self.generation,
                    index,
                    start: segment.start,
                    end: segment.end,
                    timestamp: time::now(),
                });
            }
        }
        if let Some(new_page) = outcome.committed_page {
            self.emit_page_change(old_page, new_page, PageOrigin::Sync);
        }

        outcome
    }

    // ------------------------------------------------------------------
    // Reader input
    // ------------------------------------------------------------------

    /// Manual one-page turn, returning the committed page
    pub fn turn_page(&mut self, direction: Direction) -> usize {
        let old_page = self.state.current_page;
        let now = self.playback.current_time();
        let committed = self.gate.turn_page(&mut self.state, direction, now);
        if committed != old_page {
            self.emit_page_change(old_page, committed, PageOrigin::Manual);
        }
        committed
    }

    /// Click at `x` within a viewport `viewport_width` wide
    pub fn click(&mut self, x: f64, viewport_width: f64) -> usize {
        self.turn_page(Direction::from_click(x, viewport_width))
    }

    /// Clamped page request with an explicit origin
    pub fn request_page(&mut self, target: i64, origin: PageOrigin) -> usize {
        let old_page = self.state.current_page;
        let now = self.playback.current_time();
        let committed = self.gate.request_page(&mut self.state, target, origin, now);
        if committed != old_page {
            self.emit_page_change(old_page, committed, origin);
        }
        committed
    }

    pub fn can_turn(&self, direction: Direction) -> bool {
        self.gate.can_turn(&self.state, direction)
    }

    pub fn toggle_play_pause(&mut self) -> Result<PlaybackState> {
        let state = self.playback.toggle_play_pause()?;
        self.emit(NavEvent::PlaybackStateChanged {
            state,
            timestamp: time::now(),
        });
        Ok(state)
    }

    pub fn toggle_mute(&mut self) -> Result<bool> {
        let muted = self.playback.toggle_mute()?;
        self.emit(NavEvent::MuteChanged {
            muted,
            timestamp: time::now(),
        });
        Ok(muted)
    }

    pub fn format_time(seconds: f64) -> String {
        PlaybackController::<T>::format_time(seconds)
    }

    // ------------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------------

    pub fn state(&self) -> NavigatorState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn total_pages(&self) -> usize {
        self.gate.total_pages()
    }

    pub fn segments(&self) -> &[Segment] {
        self.sync.index().segments()
    }

    pub fn active_segment(&self) -> Option<&Segment> {
        self.state
            .active_segment
            .and_then(|index| self.sync.index().get(index))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.state.active_segment == Some(index)
    }

    /// Segments shown on `page` (empty for the cover or a missing page)
    pub fn page_segments(&self, page: usize) -> &[Segment] {
        let segments = self.segments();
        self.paginator
            .page_range(page, segments.len())
            .and_then(|range| segments.get(range))
            .unwrap_or(&[])
    }

    pub fn current_page_segments(&self) -> &[Segment] {
        self.page_segments(self.state.current_page)
    }

    pub fn story(&self) -> Option<&Story> {
        self.story.as_ref()
    }

    /// Localized title of the loaded story
    pub fn title(&self) -> Option<&str> {
        let story = self.story.as_ref()?;
        Some(story.title_for(&self.language, &self.config.default_language))
    }

    /// Cover image of the loaded story, or `placeholder`
    pub fn cover<'a>(&'a self, placeholder: &'a str) -> &'a str {
        match &self.story {
            Some(story) => story.cover_or(placeholder),
            None => placeholder,
        }
    }

    pub fn is_audio_loaded(&self) -> bool {
        self.audio_loaded
    }

    pub fn playback(&self) -> &PlaybackController<T> {
        &self.playback
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            generation: self.generation,
            language: self.language.clone(),
            active_index: self.state.active_segment,
            active_segment: self.active_segment().cloned(),
            current_page: self.state.current_page,
            total_pages: self.gate.total_pages(),
            audio_loaded: self.audio_loaded,
            is_playing: self.playback.is_playing(),
            is_muted: self.playback.is_muted(),
            current_time: self.playback.current_time(),
            duration: self.playback.duration(),
            progress_percent: self.playback.progress_percent(),
        }
    }

    fn emit_page_change(&self, old_page: usize, new_page: usize, origin: PageOrigin) {
        self.emit(NavEvent::PageChanged {
            generation: self.generation,
            old_page,
            new_page,
            origin,
            timestamp: time::now(),
        });
    }

    fn emit(&self, event: NavEvent) {
        self.events.emit_lossy(event);
    }
}
