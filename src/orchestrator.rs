//! Coordinates the two user actions: analyzing a video and asking about it.
//!
//! The orchestrator holds the stateless components; everything that changes
//! during a session lives in the [`Session`] passed to each call.

use crate::config::{Prompts, Settings};
use crate::error::{RecapError, Result};
use crate::generation::{ContentGenerator, Generated, Generator, OpenAIGenerator};
use crate::language;
use crate::session::{ChatTurn, Session, Summary};
use crate::transcript::{
    TranscriptRequest, TranscriptResolver, TranscriptResult, TranscriptSource,
    YoutubeTranscriptSource,
};
use crate::translation::{OpenAITranslator, TranslationCache, Translator};
use crate::video_ref::VideoReference;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Result of analyzing a video.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub video_id: String,
    pub transcript: TranscriptResult,
    /// The summary as shown to the user (translated when needed), or the fallback.
    pub summary: Generated,
}

/// The main orchestrator for the Recap pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    resolver: TranscriptResolver,
    content: ContentGenerator,
}

impl Orchestrator {
    /// Create an orchestrator backed by YouTube and OpenAI.
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let source: Arc<dyn TranscriptSource> =
            Arc::new(YoutubeTranscriptSource::with_config(&settings.transcript)?);
        let generator: Arc<dyn Generator> =
            Arc::new(OpenAIGenerator::with_config(&settings.generation)?);

        info!("Using {} for generation", settings.generation.model);

        Ok(Self::with_components(settings, prompts, source, generator))
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        prompts: Prompts,
        source: Arc<dyn TranscriptSource>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        let resolver = TranscriptResolver::new(source, &settings.general.default_language);
        let content = ContentGenerator::new(generator, prompts.clone());

        Self {
            settings,
            prompts,
            resolver,
            content,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Start a session that translates through OpenAI.
    pub fn new_session(&self) -> Result<Session> {
        let translator: Arc<dyn Translator> = Arc::new(OpenAITranslator::with_config(
            &self.settings.translation,
            &self.prompts,
        )?);
        Ok(self.session_with_translator(translator))
    }

    /// Start a session with a custom translator.
    pub fn session_with_translator(&self, translator: Arc<dyn Translator>) -> Session {
        let session = Session::new(TranslationCache::from_settings(translator, &self.settings));
        debug!("Started session {}", session.id());
        session
    }

    /// Resolve a link and fetch its transcript in `language`.
    #[instrument(skip(self))]
    pub async fn fetch_transcript(&self, link: &str, language: &str) -> Result<TranscriptResult> {
        let video_id = VideoReference::parse(link).into_id()?;
        self.resolver
            .resolve(&TranscriptRequest::new(video_id, language))
            .await
    }

    /// Analyze a video: fetch its transcript, summarize it, and store the summary.
    ///
    /// Chat history and any previous summary are cleared first. Invalid links
    /// and missing transcripts are returned as errors before any generation
    /// happens. A failed generation leaves the session without a summary.
    #[instrument(skip(self, session), fields(session = %session.id()))]
    pub async fn analyze(&self, session: &mut Session, link: &str) -> Result<Analysis> {
        session.set_video_link(link);
        session.begin_analysis();

        let video_id = VideoReference::parse(link).into_id()?;
        session.set_video_id(&video_id);

        let content_language = session.content_language().to_string();
        let transcript = self
            .resolver
            .resolve(&TranscriptRequest::new(video_id.clone(), content_language.clone()))
            .await?;

        info!(
            "Transcript: {} characters, {} ({})",
            transcript.text.len(),
            transcript.language,
            transcript.provenance
        );

        let summary = match self.content.summarize(&transcript.text).await {
            Generated::Completed(text) => {
                let text = self.localize(session, &text, &content_language).await;
                session.set_summary(Summary {
                    text: text.clone(),
                    source_language: transcript.language.clone(),
                    language: content_language,
                });
                Generated::Completed(text)
            }
            fallback => fallback,
        };

        Ok(Analysis {
            video_id,
            transcript,
            summary,
        })
    }

    /// Answer a question about the current summary and record the turn.
    #[instrument(skip(self, session), fields(session = %session.id()))]
    pub async fn ask(&self, session: &mut Session, question: &str) -> Result<ChatTurn> {
        let question = question.trim();
        if question.is_empty() {
            return Err(RecapError::InvalidInput("Question is empty".to_string()));
        }

        let summary = session
            .summary()
            .map(|s| s.text.clone())
            .ok_or_else(|| {
                RecapError::InvalidInput("Analyze a video before asking questions".to_string())
            })?;

        let language = session.content_language().to_string();
        let answer = self
            .content
            .answer(question, &summary, &language, session.translations())
            .await;

        let turn = ChatTurn::new(question, answer.text(), &language);
        session.push_turn(turn.clone());
        Ok(turn)
    }

    /// Translate a piece of interface text into the session's UI language.
    pub async fn translate_label(&self, session: &mut Session, text: &str) -> String {
        let language = session.ui_language().to_string();
        session.translations().translate(text, &language).await
    }

    /// Translate generated text into `target` unless it already appears to be in it.
    async fn localize(&self, session: &mut Session, text: &str, target: &str) -> String {
        let cache = session.translations();
        if !cache.is_enabled() || language::same_language(target, cache.default_language()) {
            return text.to_string();
        }

        match cache.detect_language(text).await {
            Some(detected) if language::same_language(&detected, target) => text.to_string(),
            _ => cache.translate_detected(text, target).await,
        }
    }
}
