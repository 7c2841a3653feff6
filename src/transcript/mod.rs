//! Transcript acquisition.
//!
//! A [`TranscriptSource`] lists and fetches caption tracks for a video. The
//! [`TranscriptResolver`] walks an ordered fallback chain over those tracks to
//! get text in the requested language:
//!
//! 1. a track authored in the requested language ([`Provenance::Native`]);
//! 2. a default-language track translated by the host ([`Provenance::HostTranslated`]);
//! 3. any track at all ([`Provenance::FallbackAny`]).

mod resolver;
mod youtube;

pub use resolver::TranscriptResolver;
pub use youtube::YoutubeTranscriptSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A request for a video's transcript in a given language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptRequest {
    pub video_id: String,
    pub language: String,
}

impl TranscriptRequest {
    pub fn new(video_id: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            language: language.into(),
        }
    }
}

/// How the transcript's language came to match (or not match) the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Provenance {
    /// Authored in the requested language.
    Native,
    /// Translated into the requested language by the video host.
    HostTranslated,
    /// Whatever track was available, with no language guarantee.
    FallbackAny,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Native => write!(f, "native"),
            Provenance::HostTranslated => write!(f, "host-translated"),
            Provenance::FallbackAny => write!(f, "fallback-any"),
        }
    }
}

/// Whether a caption track was written by a person or generated by speech recognition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Manual,
    Generated,
}

/// A caption track available for a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language code of the track (e.g. "en", "pt-BR").
    pub language_code: String,
    /// Human-readable name (e.g. "English (auto-generated)").
    pub name: String,
    pub kind: TrackKind,
    /// Whether the host can translate this track into other languages.
    pub translatable: bool,
    /// Source-specific location of the track data.
    pub url: String,
}

impl CaptionTrack {
    pub fn is_generated(&self) -> bool {
        self.kind == TrackKind::Generated
    }
}

/// One caption fragment, in playback order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
}

impl Fragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// A resolved transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub video_id: String,
    /// Fragment texts joined with single spaces.
    pub text: String,
    /// Language of the text, as reported by the track.
    pub language: String,
    pub provenance: Provenance,
}

/// Join fragment texts with a single space, preserving order.
///
/// No trimming or punctuation normalization is applied.
pub fn join_fragments(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|f| f.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List the caption tracks available for a video.
    ///
    /// Fails with `TranscriptUnavailable` when the video does not exist, is
    /// private, or has no captions.
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>>;

    /// Fetch a track's fragments in its own language.
    async fn fetch(&self, video_id: &str, track: &CaptionTrack) -> Result<Vec<Fragment>>;

    /// Fetch a track's fragments translated by the host into `target_language`.
    async fn fetch_translated(
        &self,
        video_id: &str,
        track: &CaptionTrack,
        target_language: &str,
    ) -> Result<Vec<Fragment>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_fragments_preserves_spacing() {
        let fragments = vec![
            Fragment::new("Hello", 0.0, 1.0),
            Fragment::new("world", 1.0, 1.0),
            Fragment::new(".", 2.0, 0.5),
        ];
        assert_eq!(join_fragments(&fragments), "Hello world .");
    }

    #[test]
    fn test_join_fragments_no_trimming() {
        let fragments = vec![Fragment::new(" a ", 0.0, 1.0), Fragment::new("b", 1.0, 1.0)];
        assert_eq!(join_fragments(&fragments), " a  b");
        assert_eq!(join_fragments(&[]), "");
    }

    #[test]
    fn test_provenance_display() {
        assert_eq!(Provenance::HostTranslated.to_string(), "host-translated");
        assert_eq!(Provenance::FallbackAny.to_string(), "fallback-any");
    }
}
