//! YouTube caption source.
//!
//! Caption tracks are listed from the `captions` object embedded in the watch
//! page and fetched from the timedtext endpoint in `json3` format. Host-side
//! translation is requested with the `tlang` parameter.

use super::{CaptionTrack, Fragment, TrackKind, TranscriptSource};
use crate::config::TranscriptSettings;
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Transcript source backed by YouTube's public caption endpoints.
pub struct YoutubeTranscriptSource {
    client: reqwest::Client,
    unplayable_regex: Regex,
}

impl YoutubeTranscriptSource {
    /// Create a source with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&TranscriptSettings::default())
    }

    /// Create a source with a custom timeout and user agent.
    pub fn with_config(settings: &TranscriptSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(settings.user_agent.clone())
            .build()?;

        let unplayable_regex =
            Regex::new(r#""playabilityStatus":\{"status":"(ERROR|LOGIN_REQUIRED|UNPLAYABLE)""#)
                .map_err(|e| RecapError::Config(format!("Invalid regex: {}", e)))?;

        Ok(Self {
            client,
            unplayable_regex,
        })
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let response = self
            .client
            .get(WATCH_URL)
            .query(&[("v", video_id)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .header("Cookie", "CONSENT=YES+cb")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RecapError::TranscriptUnavailable(format!(
                "Video {} returned HTTP {}",
                video_id,
                response.status()
            )));
        }

        Ok(response.text().await?)
    }

    async fn fetch_track_url(&self, url: &str) -> Result<Vec<Fragment>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(RecapError::TranscriptUnavailable(format!(
                "Caption track returned HTTP {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        parse_json3(&body)
    }

    fn parse_page(&self, html: &str, video_id: &str) -> Result<Vec<CaptionTrack>> {
        if self.unplayable_regex.is_match(html) {
            return Err(RecapError::TranscriptUnavailable(format!(
                "Video {} does not exist or is not playable",
                video_id
            )));
        }
        parse_caption_tracks(html, video_id)
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    #[instrument(skip(self))]
    async fn list_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        let html = self.fetch_watch_page(video_id).await?;
        let tracks = self.parse_page(&html, video_id)?;
        debug!(
            "Found tracks: {:?}",
            tracks.iter().map(|t| t.language_code.as_str()).collect::<Vec<_>>()
        );
        Ok(tracks)
    }

    #[instrument(skip(self, track), fields(language = %track.language_code))]
    async fn fetch(&self, _video_id: &str, track: &CaptionTrack) -> Result<Vec<Fragment>> {
        let url = track_url(&track.url, None)?;
        self.fetch_track_url(&url).await
    }

    #[instrument(skip(self, track), fields(language = %track.language_code))]
    async fn fetch_translated(
        &self,
        _video_id: &str,
        track: &CaptionTrack,
        target_language: &str,
    ) -> Result<Vec<Fragment>> {
        if !track.translatable {
            return Err(RecapError::TranscriptUnavailable(format!(
                "Track {} cannot be translated",
                track.language_code
            )));
        }
        let url = track_url(&track.url, Some(target_language))?;
        self.fetch_track_url(&url).await
    }
}

/// Build the timedtext URL for a track, forcing `json3` and optionally `tlang`.
fn track_url(base: &str, target_language: Option<&str>) -> Result<String> {
    let mut url = Url::parse(base)
        .map_err(|e| RecapError::TranscriptUnavailable(format!("Bad caption URL: {}", e)))?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "fmt" && k != "tlang")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept);
        query.append_pair("fmt", "json3");
        if let Some(lang) = target_language {
            query.append_pair("tlang", lang);
        }
    }

    Ok(url.to_string())
}

/// Extract caption tracks from a watch page.
fn parse_caption_tracks(html: &str, video_id: &str) -> Result<Vec<CaptionTrack>> {
    let no_captions = || {
        RecapError::TranscriptUnavailable(format!("Video {} has no transcripts", video_id))
    };

    let marker = "\"captions\":";
    let start = html.find(marker).ok_or_else(no_captions)? + marker.len();

    let captions: Value = serde_json::Deserializer::from_str(&html[start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(no_captions)??;

    let tracks = captions
        .pointer("/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
        .ok_or_else(no_captions)?;

    let tracks: Vec<CaptionTrack> = tracks
        .iter()
        .filter_map(|track| {
            let url = track["baseUrl"].as_str()?.to_string();
            let language_code = track["languageCode"].as_str()?.to_string();
            let name = track["name"]["simpleText"]
                .as_str()
                .or_else(|| track["name"]["runs"][0]["text"].as_str())
                .unwrap_or(&language_code)
                .to_string();
            let kind = if track["kind"].as_str() == Some("asr") {
                TrackKind::Generated
            } else {
                TrackKind::Manual
            };

            Some(CaptionTrack {
                language_code,
                name,
                kind,
                translatable: track["isTranslatable"].as_bool().unwrap_or(false),
                url,
            })
        })
        .collect();

    Ok(tracks)
}

#[derive(Debug, Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parse a `json3` timedtext body into fragments.
fn parse_json3(body: &str) -> Result<Vec<Fragment>> {
    let parsed: Json3 = serde_json::from_str(body)?;

    Ok(parsed
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            if text.trim().is_empty() {
                return None;
            }
            Some(Fragment::new(
                text,
                event.t_start_ms as f64 / 1000.0,
                event.d_duration_ms as f64 / 1000.0,
            ))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<script>var ytInitialPlayerResponse = {"playabilityStatus":{"status":"OK"},"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=en&kind=asr","name":{"simpleText":"English (auto-generated)"},"languageCode":"en","kind":"asr","isTranslatable":true},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=de","name":{"runs":[{"text":"German"}]},"languageCode":"de"}]}},"videoDetails":{"videoId":"abc"}};</script>"#;

    #[test]
    fn test_parse_caption_tracks() {
        let tracks = parse_caption_tracks(PAGE, "abc").unwrap();
        assert_eq!(tracks.len(), 2);

        assert_eq!(tracks[0].language_code, "en");
        assert_eq!(tracks[0].name, "English (auto-generated)");
        assert_eq!(tracks[0].kind, TrackKind::Generated);
        assert!(tracks[0].translatable);
        assert_eq!(
            tracks[0].url,
            "https://www.youtube.com/api/timedtext?v=abc&lang=en&kind=asr"
        );

        assert_eq!(tracks[1].name, "German");
        assert_eq!(tracks[1].kind, TrackKind::Manual);
        assert!(!tracks[1].translatable);
    }

    #[test]
    fn test_page_without_captions() {
        let html = r#"{"playabilityStatus":{"status":"OK"},"videoDetails":{}}"#;
        let err = parse_caption_tracks(html, "abc").unwrap_err();
        assert!(matches!(err, RecapError::TranscriptUnavailable(_)));
    }

    #[test]
    fn test_unplayable_page() {
        let source = YoutubeTranscriptSource::new().unwrap();
        let html = r#"{"playabilityStatus":{"status":"ERROR","reason":"Video unavailable"}}"#;
        let err = source.parse_page(html, "abc").unwrap_err();
        assert!(matches!(err, RecapError::TranscriptUnavailable(_)));
    }

    #[test]
    fn test_parse_json3() {
        let body = r#"{"wireMagic":"pb3","events":[
            {"tStartMs":0,"dDurationMs":1500,"segs":[{"utf8":"Hello"}]},
            {"tStartMs":1500,"dDurationMs":500,"segs":[{"utf8":"\n"}]},
            {"tStartMs":2000},
            {"tStartMs":2000,"dDurationMs":1000,"segs":[{"utf8":"wor"},{"utf8":"ld"}]}
        ]}"#;

        let fragments = parse_json3(body).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], Fragment::new("Hello", 0.0, 1.5));
        assert_eq!(fragments[1].text, "world");
        assert!((fragments[1].start - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_track_url() {
        let base = "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=srv3";
        assert_eq!(
            track_url(base, None).unwrap(),
            "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=json3"
        );
        assert_eq!(
            track_url(base, Some("fr")).unwrap(),
            "https://www.youtube.com/api/timedtext?v=abc&lang=en&fmt=json3&tlang=fr"
        );
    }
}
