//! Play/pause/mute state and the playback clock
//!
//! Owns the `{is_playing, is_muted}` flags and the last reported time and
//! duration. Flags only change once the transport has accepted the
//! corresponding command.

use tale_common::events::PlaybackState;
use tale_common::human_time::format_clock;
use tale_common::{Error, Result};
use tracing::{debug, warn};

use super::transport::AudioTransport;

/// Thin controller in front of an [`AudioTransport`]
#[derive(Debug)]
pub struct PlaybackController<T: AudioTransport> {
    transport: T,
    source: Option<String>,
    is_playing: bool,
    is_muted: bool,
    current_time: f64,
    /// Seconds, `0.0` until metadata arrives
    duration: f64,
}

impl<T: AudioTransport> PlaybackController<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            source: None,
            is_playing: false,
            is_muted: false,
            current_time: 0.0,
            duration: 0.0,
        }
    }

    /// Load a narration source; playback stops and the clock resets
    pub fn load(&mut self, source: &str) -> Result<()> {
        self.transport.load(source).map_err(|e| {
            warn!("Failed to load narration source {}: {}", source, e);
            e
        })?;

        debug!("Loaded narration source {}", source);
        self.source = Some(source.to_string());
        self.reset_clock();
        Ok(())
    }

    /// Forget the current source (story without narration)
    pub fn unload(&mut self) -> Result<()> {
        if self.is_playing {
            self.transport.pause()?;
        }
        self.source = None;
        self.reset_clock();
        Ok(())
    }

    fn reset_clock(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
        self.duration = 0.0;
    }

    /// Toggle between playing and paused, returning the new state
    ///
    /// Starting playback requires a loaded source; otherwise the transport
    /// may still hold an earlier track.
    pub fn toggle_play_pause(&mut self) -> Result<PlaybackState> {
        if self.is_playing {
            self.transport.pause()?;
        } else {
            if self.source.is_none() {
                return Err(Error::Transport("no narration source loaded".to_string()));
            }
            self.transport.play()?;
        }
        self.is_playing = !self.is_playing;
        Ok(self.playback_state())
    }

    /// Toggle mute, returning the new muted flag
    pub fn toggle_mute(&mut self) -> Result<bool> {
        let muted = !self.is_muted;
        self.transport.set_muted(muted)?;
        self.is_muted = muted;
        Ok(muted)
    }

    /// Record a time update; non-finite values keep the previous time
    pub fn on_time_update(&mut self, t: f64) {
        if t.is_finite() {
            self.current_time = t;
        }
    }

    pub fn on_loaded_metadata(&mut self, duration: f64) {
        self.duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            0.0
        };
    }

    /// End of track: stopped, clock back at zero
    pub fn on_ended(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
    }

    /// Position as a percentage of the duration, `0.0` while unknown
    pub fn progress_percent(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// `M:SS` display string, see [`format_clock`]
    pub fn format_time(seconds: f64) -> String {
        format_clock(seconds)
    }

    pub fn playback_state(&self) -> PlaybackState {
        if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}
