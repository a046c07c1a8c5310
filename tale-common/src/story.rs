//! Story content model
//!
//! A story is an ordered list of chapters, each holding one segment
//! sequence per language, plus a localized title, an optional cover image
//! and one localized narration track. The navigator only ever sees the
//! flattened, language-selected segment sequence produced by
//! [`Story::segments_for`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Contiguous span of narrated text in the audio track
///
/// Times are seconds from the start of the narration track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Segment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Language code → value map with default-language fallback
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized<T>(BTreeMap<String, T>);

impl<T> Localized<T> {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, language: impl Into<String>, value: T) {
        self.0.insert(language.into(), value);
    }

    /// Value for `language`, else the value for `default_language`
    pub fn get_or_default(&self, language: &str, default_language: &str) -> Option<&T> {
        self.0.get(language).or_else(|| self.0.get(default_language))
    }
}

/// One chapter: language code → ordered segments
pub type Chapter = Localized<Vec<Segment>>;

/// Narrated story as delivered by the content collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,

    #[serde(default)]
    pub title: Localized<String>,

    /// Cover image reference
    #[serde(default)]
    pub cover: Option<String>,

    /// Narration track source per language
    #[serde(default)]
    pub voice: Localized<String>,

    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl Story {
    /// Parse a story document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Flattened segment sequence for `language`
    ///
    /// Fallback is decided per chapter: a chapter lacking `language`
    /// contributes its `default_language` segments, and a chapter lacking
    /// both contributes nothing.
    pub fn segments_for(&self, language: &str, default_language: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        for (chapter_idx, chapter) in self.chapters.iter().enumerate() {
            match chapter.get_or_default(language, default_language) {
                Some(chapter_segments) => segments.extend(chapter_segments.iter().cloned()),
                None => debug!(
                    "story {}: chapter {} has no '{}' or '{}' segments",
                    self.id, chapter_idx, language, default_language
                ),
            }
        }
        segments
    }

    /// Localized title; the story id stands in when no title exists
    pub fn title_for<'a>(&'a self, language: &str, default_language: &str) -> &'a str {
        self.title
            .get_or_default(language, default_language)
            .map(String::as_str)
            .unwrap_or(self.id.as_str())
    }

    /// Localized narration track source
    pub fn voice_for(&self, language: &str, default_language: &str) -> Option<&str> {
        self.voice
            .get_or_default(language, default_language)
            .map(String::as_str)
    }

    /// Cover image reference, or `placeholder` when the story has none
    pub fn cover_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.cover.as_deref().unwrap_or(placeholder)
    }
}

/// Validate a flattened segment sequence before it reaches the navigator.
///
/// Rules: all times finite, `start < end` for every segment, and `start`
/// non-decreasing along the sequence. Gaps between segments are allowed.
/// An empty sequence is valid.
///
/// # Examples
///
/// ```
/// use tale_common::story::{validate_segments, Segment};
///
/// let ok = vec![Segment::new(0.0, 2.0, "a"), Segment::new(5.0, 7.0, "b")];
/// assert!(validate_segments(&ok).is_ok());
///
/// let reordered = vec![Segment::new(5.0, 7.0, "b"), Segment::new(0.0, 2.0, "a")];
/// assert!(validate_segments(&reordered).is_err());
/// ```
pub fn validate_segments(segments: &[Segment]) -> Result<()> {
    let mut previous_start = f64::NEG_INFINITY;

    for (index, segment) in segments.iter().enumerate() {
        if !segment.start.is_finite() || !segment.end.is_finite() {
            return Err(Error::InvalidContent(format!(
                "segment {} has non-finite bounds ({}, {})",
                index, segment.start, segment.end
            )));
        }
        if segment.start >= segment.end {
            return Err(Error::InvalidContent(format!(
                "segment {} does not end after it starts ({} >= {})",
                index, segment.start, segment.end
            )));
        }
        if segment.start < previous_start {
            return Err(Error::InvalidContent(format!(
                "segment {} starts at {} before previous start {}",
                index, segment.start, previous_start
            )));
        }
        previous_start = segment.start;
    }

    Ok(())
}
