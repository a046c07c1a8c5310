//! Playback control over the external audio transport

pub mod controller;
pub mod transport;

pub use controller::PlaybackController;
pub use transport::{AudioTransport, NullTransport};
