//! Recording audio transport

use tale_common::{Error, Result};
use tale_nav::AudioTransport;

/// Command received by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    Load(String),
    Play,
    Pause,
    SetMuted(bool),
}

/// Transport that records every accepted command
///
/// `refuse_sources` makes `load` fail for matching sources, `refuse_play`
/// makes `play` fail.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    pub commands: Vec<TransportCommand>,
    pub refuse_sources: Vec<String>,
    pub refuse_play: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loads(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                TransportCommand::Load(source) => Some(source.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl AudioTransport for RecordingTransport {
    fn load(&mut self, source: &str) -> Result<()> {
        if self.refuse_sources.iter().any(|s| s == source) {
            return Err(Error::Transport(format!("cannot open {}", source)));
        }
        self.commands.push(TransportCommand::Load(source.to_string()));
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if self.refuse_play {
            return Err(Error::Transport("autoplay blocked".to_string()));
        }
        self.commands.push(TransportCommand::Play);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.push(TransportCommand::Pause);
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.commands.push(TransportCommand::SetMuted(muted));
        Ok(())
    }
}
