//! Ordered fallback over caption tracks.

use super::{
    join_fragments, CaptionTrack, Provenance, TranscriptRequest, TranscriptResult, TranscriptSource,
};
use crate::error::{RecapError, Result};
use crate::language;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Resolves a transcript request against a [`TranscriptSource`].
pub struct TranscriptResolver {
    source: Arc<dyn TranscriptSource>,
    default_language: String,
}

impl TranscriptResolver {
    pub fn new(source: Arc<dyn TranscriptSource>, default_language: &str) -> Self {
        Self {
            source,
            default_language: default_language.to_string(),
        }
    }

    /// Resolve a transcript, trying native, host-translated, then any track.
    #[instrument(skip(self), fields(video_id = %request.video_id, language = %request.language))]
    pub async fn resolve(&self, request: &TranscriptRequest) -> Result<TranscriptResult> {
        let tracks = self.source.list_tracks(&request.video_id).await?;
        debug!("{} caption tracks available", tracks.len());

        if tracks.is_empty() {
            return Err(RecapError::TranscriptUnavailable(format!(
                "No transcripts available for video {}",
                request.video_id
            )));
        }

        let mut failed: Vec<&CaptionTrack> = Vec::new();

        // 1. Authored in the requested language
        for track in matching_tracks(&tracks, &request.language, false) {
            match self.source.fetch(&request.video_id, track).await {
                Ok(fragments) => {
                    info!("Using {} transcript ({})", track.language_code, track.name);
                    return Ok(self.result(
                        request,
                        join_fragments(&fragments),
                        &track.language_code,
                        Provenance::Native,
                    ));
                }
                Err(e) => {
                    warn!("Failed to fetch {} transcript: {}", track.language_code, e);
                    failed.push(track);
                }
            }
        }

        // 2. Default-language track translated by the host
        if !language::same_language(&request.language, &self.default_language) {
            for track in matching_tracks(&tracks, &self.default_language, true) {
                match self
                    .source
                    .fetch_translated(&request.video_id, track, &request.language)
                    .await
                {
                    Ok(fragments) => {
                        info!(
                            "Using {} transcript translated to {}",
                            track.language_code, request.language
                        );
                        return Ok(self.result(
                            request,
                            join_fragments(&fragments),
                            &request.language,
                            Provenance::HostTranslated,
                        ));
                    }
                    Err(e) => warn!(
                        "Failed to fetch {} transcript translated to {}: {}",
                        track.language_code, request.language, e
                    ),
                }
            }
        }

        // 3. Anything available, skipping tracks that already failed
        for track in &tracks {
            if failed.iter().any(|f| std::ptr::eq(*f, track)) {
                continue;
            }
            match self.source.fetch(&request.video_id, track).await {
                Ok(fragments) => {
                    info!(
                        "Falling back to {} transcript ({})",
                        track.language_code, track.name
                    );
                    return Ok(self.result(
                        request,
                        join_fragments(&fragments),
                        &track.language_code,
                        Provenance::FallbackAny,
                    ));
                }
                Err(e) => warn!("Failed to fetch {} transcript: {}", track.language_code, e),
            }
        }

        Err(RecapError::TranscriptUnavailable(format!(
            "No transcript could be fetched for video {}",
            request.video_id
        )))
    }

    fn result(
        &self,
        request: &TranscriptRequest,
        text: String,
        language: &str,
        provenance: Provenance,
    ) -> TranscriptResult {
        TranscriptResult {
            video_id: request.video_id.clone(),
            text,
            language: language.to_string(),
            provenance,
        }
    }
}

/// Tracks in `language`, manual captions before generated ones, otherwise in list order.
fn matching_tracks<'a>(
    tracks: &'a [CaptionTrack],
    language: &str,
    translatable_only: bool,
) -> Vec<&'a CaptionTrack> {
    let mut matching: Vec<&CaptionTrack> = tracks
        .iter()
        .filter(|t| {
            language::same_language(&t.language_code, language)
                && (!translatable_only || t.translatable)
        })
        .collect();
    matching.sort_by_key(|t| t.is_generated());
    matching
}
