//! Audio transport abstraction
//!
//! The transport decodes and plays the narration track. It reports time,
//! metadata and end-of-track back through `StoryNavigator::handle`; this
//! trait only carries commands the other way.

use tale_common::Result;

/// Commands accepted by the external audio transport
pub trait AudioTransport {
    /// Point the transport at a new narration source
    fn load(&mut self, source: &str) -> Result<()>;

    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn set_muted(&mut self, muted: bool) -> Result<()>;
}

/// No-audio transport for headless use; accepts every command
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTransport;

impl NullTransport {
    pub const fn new() -> Self {
        Self
    }
}

impl AudioTransport for NullTransport {
    fn load(&mut self, _source: &str) -> Result<()> {
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }

    fn set_muted(&mut self, _muted: bool) -> Result<()> {
        Ok(())
    }
}
