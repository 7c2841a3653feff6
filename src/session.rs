//! State for one interactive session.
//!
//! A [`Session`] owns the current summary, the chat history, the language
//! selections and the translation cache. It is passed by `&mut` to the
//! orchestrator and dropped when the interactive loop ends.

use crate::translation::{CacheStats, TranslationCache};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generated synopsis of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    /// Language of the transcript the summary was generated from.
    pub source_language: String,
    /// Language the summary text is displayed in.
    pub language: String,
}

/// One question and its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
    /// Language the answer was requested in.
    pub language: String,
    pub asked_at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(question: &str, answer: &str, language: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            language: language.to_string(),
            asked_at: Utc::now(),
        }
    }
}

/// Mutable state scoped to one user's session.
pub struct Session {
    id: Uuid,
    video_link: String,
    video_id: Option<String>,
    summary: Option<Summary>,
    turns: Vec<ChatTurn>,
    ui_language: String,
    content_language: String,
    translations: TranslationCache,
}

impl Session {
    /// Start a session with default languages taken from the cache.
    pub fn new(translations: TranslationCache) -> Self {
        let default_language = translations.default_language().to_string();
        Self {
            id: Uuid::new_v4(),
            video_link: String::new(),
            video_id: None,
            summary: None,
            turns: Vec::new(),
            ui_language: default_language.clone(),
            content_language: default_language,
            translations,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn video_link(&self) -> &str {
        &self.video_link
    }

    pub fn set_video_link(&mut self, link: &str) {
        self.video_link = link.trim().to_string();
    }

    pub fn video_id(&self) -> Option<&str> {
        self.video_id.as_deref()
    }

    /// Forget the previous analysis before starting a new one.
    pub fn begin_analysis(&mut self) {
        self.video_id = None;
        self.summary = None;
        self.turns.clear();
    }

    pub fn set_video_id(&mut self, video_id: &str) {
        self.video_id = Some(video_id.to_string());
    }

    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    pub fn set_summary(&mut self, summary: Summary) {
        self.summary = Some(summary);
    }

    /// Append a turn. Earlier turns are never modified.
    pub fn push_turn(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// Chat history in submission order.
    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn clear_chat(&mut self) {
        self.turns.clear();
    }

    pub fn ui_language(&self) -> &str {
        &self.ui_language
    }

    pub fn set_ui_language(&mut self, language: &str) {
        self.ui_language = crate::language::normalize(language);
    }

    pub fn content_language(&self) -> &str {
        &self.content_language
    }

    pub fn set_content_language(&mut self, language: &str) {
        self.content_language = crate::language::normalize(language);
    }

    pub fn translations(&mut self) -> &mut TranslationCache {
        &mut self.translations
    }

    /// Drop every cached translation.
    pub fn clear_translations(&mut self) {
        self.translations.clear();
    }

    pub fn translation_stats(&self) -> CacheStats {
        self.translations.stats()
    }

    pub fn cached_translations(&self) -> usize {
        self.translations.len()
    }
}
