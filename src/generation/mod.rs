//! Summary and answer generation.
//!
//! [`ContentGenerator`] renders prompt templates and delegates to a
//! [`Generator`]. Failures never escape: they become [`Generated::Fallback`]
//! carrying a fixed apology message.

mod openai;

pub use openai::OpenAIGenerator;

use crate::config::Prompts;
use crate::error::{RecapError, Result};
use crate::language;
use crate::translation::TranslationCache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Shown when a summary could not be generated.
pub const SUMMARY_FALLBACK: &str = "Unable to generate summary.";

/// Shown when an answer could not be generated.
pub const ANSWER_FALLBACK: &str = "Sorry, I couldn't generate a comprehensive response.";

/// Trait for text generation services.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a reply to a single prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Outcome of a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generated {
    /// The service produced text.
    Completed(String),
    /// The service failed; `message` is displayable, `reason` describes the failure.
    Fallback {
        message: &'static str,
        reason: String,
    },
}

impl Generated {
    /// The displayable text in either case.
    pub fn text(&self) -> &str {
        match self {
            Generated::Completed(text) => text.as_str(),
            Generated::Fallback { message, .. } => *message,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Generated::Completed(_))
    }

    fn from_result(result: Result<String>, message: &'static str) -> Self {
        match result {
            Ok(text) => Generated::Completed(text),
            Err(e) => {
                let err = RecapError::GenerationFailed(e.to_string());
                warn!("{}", err);
                Generated::Fallback {
                    message,
                    reason: err.to_string(),
                }
            }
        }
    }
}

/// Formats prompts and calls the generator for summaries and answers.
pub struct ContentGenerator {
    generator: Arc<dyn Generator>,
    prompts: Prompts,
}

impl ContentGenerator {
    pub fn new(generator: Arc<dyn Generator>, prompts: Prompts) -> Self {
        Self { generator, prompts }
    }

    /// Summarize a transcript.
    #[instrument(skip(self, transcript), fields(chars = transcript.len()))]
    pub async fn summarize(&self, transcript: &str) -> Generated {
        let mut vars = HashMap::new();
        vars.insert("transcript".to_string(), transcript.to_string());
        let prompt = self.prompts.render_with_custom(&self.prompts.summary.user, &vars);

        info!("Generating summary");
        Generated::from_result(self.generator.generate(&prompt).await, SUMMARY_FALLBACK)
    }

    /// Answer a question about a summary, in `target_language`.
    ///
    /// When the target is not the cache's default language and the reply still
    /// looks like the default language, the reply is translated through `cache`.
    #[instrument(skip(self, summary, cache), fields(question = %question))]
    pub async fn answer(
        &self,
        question: &str,
        summary: &str,
        target_language: &str,
        cache: &mut TranslationCache,
    ) -> Generated {
        let mut vars = HashMap::new();
        vars.insert("summary".to_string(), summary.to_string());
        vars.insert("question".to_string(), question.to_string());
        vars.insert("language".to_string(), language::display_name(target_language));
        let prompt = self.prompts.render_with_custom(&self.prompts.question.user, &vars);

        let answer = match self.generator.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => return Generated::from_result(Err(e), ANSWER_FALLBACK),
        };

        let default_language = cache.default_language().to_string();
        if !cache.is_enabled() || language::same_language(target_language, &default_language) {
            return Generated::Completed(answer);
        }

        match cache.detect_language(&answer).await {
            Some(detected) if language::same_language(&detected, &default_language) => {
                debug!("Answer came back in {}, translating to {}", detected, target_language);
                Generated::Completed(cache.translate_detected(&answer, target_language).await)
            }
            _ => Generated::Completed(answer),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::retry::RetryPolicy;
    use crate::translation::tests::FakeTranslator;
    use crate::translation::Translator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Generator double that echoes a reply derived from the prompt.
    pub(crate) struct FakeGenerator {
        pub prompts: Mutex<Vec<String>>,
        pub calls: AtomicUsize,
        fail: bool,
    }

    impl FakeGenerator {
        pub fn new() -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl Generator for FakeGenerator {
        async fn generate(&self, prompt: &str) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                return Err(RecapError::OpenAI("quota exceeded".into()));
            }
            Ok(format!("reply {}", n))
        }
    }

    fn cache(translator: &Arc<FakeTranslator>) -> TranslationCache {
        TranslationCache::new(translator.clone() as Arc<dyn Translator>, "en")
            .with_retry(RetryPolicy::new(3, Duration::ZERO))
    }

    fn content(generator: &Arc<FakeGenerator>) -> ContentGenerator {
        ContentGenerator::new(generator.clone() as Arc<dyn Generator>, Prompts::default())
    }

    #[tokio::test]
    async fn test_summarize_formats_prompt() {
        let generator = Arc::new(FakeGenerator::new());
        let result = content(&generator).summarize("Hello world .").await;

        assert_eq!(result, Generated::Completed("reply 1".to_string()));
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("Transcript text: Hello world ."));
    }

    #[tokio::test]
    async fn test_summarize_failure_falls_back() {
        let generator = Arc::new(FakeGenerator::failing());
        let result = content(&generator).summarize("text").await;

        assert!(!result.is_completed());
        assert_eq!(result.text(), SUMMARY_FALLBACK);
        match result {
            Generated::Fallback { reason, .. } => assert!(reason.contains("quota exceeded")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_answer_in_default_language_skips_detection() {
        let generator = Arc::new(FakeGenerator::new());
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        let result = content(&generator)
            .answer("What is it about?", "A summary", "en", &mut cache)
            .await;

        assert_eq!(result.text(), "reply 1");
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 0);
        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Video Summary: A summary"));
        assert!(prompts[0].contains("- User Question: What is it about?"));
        assert!(prompts[0].contains("in English."));
    }

    #[tokio::test]
    async fn test_answer_still_in_default_language_is_translated() {
        let generator = Arc::new(FakeGenerator::new());
        let translator = Arc::new(FakeTranslator::new().detecting("en"));
        let mut cache = cache(&translator);

        let result = content(&generator)
            .answer("Why?", "A summary", "fr", &mut cache)
            .await;

        assert_eq!(result.text(), "[fr] REPLY 1");
        assert_eq!(translator.calls(), 1);
        assert!(generator.prompts.lock().unwrap()[0].contains("in French."));
    }

    #[tokio::test]
    async fn test_answer_detected_once_with_pre_detection_on() {
        let generator = Arc::new(FakeGenerator::new());
        let translator = Arc::new(FakeTranslator::new().detecting("en"));
        let mut cache = cache(&translator).with_detection(true, 200);

        let result = content(&generator)
            .answer("Why?", "A summary", "fr", &mut cache)
            .await;

        assert_eq!(result.text(), "[fr] REPLY 1");
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_answer_with_translation_disabled_makes_no_calls() {
        let generator = Arc::new(FakeGenerator::new());
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator).with_enabled(false);

        let result = content(&generator)
            .answer("Why?", "A summary", "fr", &mut cache)
            .await;

        assert_eq!(result.text(), "reply 1");
        assert_eq!(translator.calls(), 0);
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_answer_already_in_target_is_kept() {
        let generator = Arc::new(FakeGenerator::new());
        let translator = Arc::new(FakeTranslator::new().detecting("fr"));
        let mut cache = cache(&translator);

        let result = content(&generator)
            .answer("Pourquoi ?", "Un résumé", "fr", &mut cache)
            .await;

        assert_eq!(result.text(), "reply 1");
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_answer_failure_falls_back() {
        let generator = Arc::new(FakeGenerator::failing());
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        let result = content(&generator)
            .answer("Why?", "A summary", "fr", &mut cache)
            .await;

        assert_eq!(result.text(), ANSWER_FALLBACK);
        assert_eq!(translator.calls(), 0);
    }
}
