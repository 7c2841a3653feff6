//! Resolution of user-supplied video links into YouTube video IDs.

use crate::error::{RecapError, Result};
use url::Url;

/// Host of the short link form (`https://youtu.be/<id>`).
const SHORT_HOST: &str = "youtu.be";

/// Hosts of the long link form (`https://www.youtube.com/watch?v=<id>`).
const LONG_HOSTS: &[&str] = &["youtube.com", "www.youtube.com"];

/// A user-supplied link and the video ID extracted from it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReference {
    raw: String,
    id: Option<String>,
}

impl VideoReference {
    /// Parse a link. Never fails; an unrecognized link has no ID.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            id: extract_video_id(raw),
        }
    }

    /// The link as entered.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The extracted video ID.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Consume the reference, returning the ID or an `InvalidReference` error.
    pub fn into_id(self) -> Result<String> {
        match self.id {
            Some(id) => Ok(id),
            None => Err(RecapError::InvalidReference(format!(
                "Not a YouTube video link: {:?}",
                self.raw
            ))),
        }
    }

    /// Canonical watch URL for the video.
    pub fn watch_url(&self) -> Option<String> {
        self.id
            .as_ref()
            .map(|id| format!("https://www.youtube.com/watch?v={}", id))
    }

    /// Thumbnail image URL for the video.
    pub fn thumbnail_url(&self) -> Option<String> {
        self.id
            .as_ref()
            .map(|id| format!("https://img.youtube.com/vi/{}/0.jpg", id))
    }
}

/// Resolve a link straight to a video ID.
pub fn resolve(raw: &str) -> Result<String> {
    VideoReference::parse(raw).into_id()
}

fn extract_video_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    if host == SHORT_HOST {
        let segment = url.path_segments()?.next()?;
        return non_empty(segment);
    }

    if LONG_HOSTS.contains(&host.as_str()) {
        return url
            .query_pairs()
            .find(|(key, _)| key == "v")
            .and_then(|(_, value)| non_empty(&value));
    }

    None
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_form() {
        assert_eq!(resolve("https://youtu.be/dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
        assert_eq!(resolve("https://youtu.be/abc?t=42").unwrap(), "abc");
        assert_eq!(resolve("https://youtu.be/abc/extra").unwrap(), "abc");
    }

    #[test]
    fn test_long_form() {
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            resolve("https://youtube.com/watch?list=PL1&v=xyz_123&t=10s").unwrap(),
            "xyz_123"
        );
        assert_eq!(
            resolve("  https://www.youtube.com/watch?v=abc&feature=share  ").unwrap(),
            "abc"
        );
    }

    #[test]
    fn test_invalid_inputs() {
        for input in [
            "not a url",
            "",
            "https://www.youtube.com/watch",
            "https://www.youtube.com/watch?v=",
            "https://youtu.be/",
            "https://vimeo.com/12345",
            "https://m.youtube.com/watch?v=abc",
        ] {
            let err = resolve(input).unwrap_err();
            assert!(
                matches!(err, RecapError::InvalidReference(_)),
                "expected InvalidReference for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_reference_urls() {
        let reference = VideoReference::parse("https://youtu.be/abc");
        assert_eq!(reference.id(), Some("abc"));
        assert_eq!(reference.raw(), "https://youtu.be/abc");
        assert_eq!(
            reference.watch_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
        assert_eq!(
            reference.thumbnail_url().as_deref(),
            Some("https://img.youtube.com/vi/abc/0.jpg")
        );

        let invalid = VideoReference::parse("nope");
        assert_eq!(invalid.id(), None);
        assert_eq!(invalid.thumbnail_url(), None);
    }
}
