//! Test Helper Utilities
//!
//! Shared utilities for testing tale-nav

pub mod log_capture;
pub mod transport;

pub use log_capture::capture_logs;
pub use transport::{RecordingTransport, TransportCommand};

use tale_common::Story;

/// Two-chapter story, English throughout, Filipino for the first chapter only
pub const TWO_CHAPTER_STORY: &str = r#"{
    "id": "river-fox",
    "title": { "en": "The River Fox", "fil": "Ang Sorong Ilog" },
    "cover": "/assets/covers/river-fox.png",
    "voice": { "en": "/audio/river-fox-en.mp3", "fil": "/audio/river-fox-fil.mp3" },
    "chapters": [
        {
            "en": [
                { "start": 0.0, "end": 1.0, "text": "Once" },
                { "start": 1.0, "end": 2.0, "text": "upon" },
                { "start": 2.0, "end": 3.0, "text": "a" },
                { "start": 3.0, "end": 4.0, "text": "time" }
            ],
            "fil": [
                { "start": 0.0, "end": 1.5, "text": "Noong" },
                { "start": 1.5, "end": 3.0, "text": "unang" },
                { "start": 3.0, "end": 4.0, "text": "panahon" }
            ]
        },
        {
            "en": [
                { "start": 4.0, "end": 5.0, "text": "the" },
                { "start": 5.0, "end": 6.0, "text": "fox" }
            ]
        }
    ]
}"#;

pub fn two_chapter_story() -> Story {
    Story::from_json(TWO_CHAPTER_STORY).expect("fixture story parses")
}
