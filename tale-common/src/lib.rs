//! # Tale Common Library
//!
//! Shared code for the narrated story reader including:
//! - Story and segment data model with language selection
//! - Content validation at the loading boundary
//! - Navigator event types and the broadcast `EventBus`
//! - Configuration loading and tracing initialisation
//! - Clock formatting for playback time display

pub mod config;
pub mod error;
pub mod events;
pub mod human_time;
pub mod logging;
pub mod story;
pub mod time;

pub use error::{Error, Result};
pub use story::{Segment, Story};
