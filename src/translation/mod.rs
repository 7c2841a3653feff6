//! Text translation with a session-scoped memoizing cache.
//!
//! [`TranslationCache::translate`] never fails: when the translator keeps
//! failing after the retry policy is exhausted, the original text is returned.

mod openai;

pub use openai::OpenAITranslator;

use crate::config::Settings;
use crate::error::{RecapError, Result};
use crate::language;
use crate::retry::{retry_with_backoff, RetryPolicy};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default number of characters sent to the language detector.
const DEFAULT_DETECT_SAMPLE_CHARS: usize = 200;

/// Trait for translation services.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language`.
    async fn translate(&self, text: &str, target_language: &str) -> Result<String>;

    /// Detect the language of `text`, returning a language code.
    ///
    /// Detection is advisory; callers must tolerate wrong answers.
    async fn detect_language(&self, text: &str) -> Result<String>;
}

/// Cache key: digest of the full text plus the normalized target language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    digest: String,
    language: String,
}

impl CacheKey {
    fn new(text: &str, target_language: &str) -> Self {
        Self {
            digest: hex::encode(Sha256::digest(text.as_bytes())),
            language: language::normalize(target_language),
        }
    }
}

/// Counters for cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    /// Misses where every translation attempt failed.
    pub failures: usize,
}

/// Memoizes translations for the lifetime of a session.
pub struct TranslationCache {
    translator: Arc<dyn Translator>,
    default_language: String,
    enabled: bool,
    retry: RetryPolicy,
    detect_before_translate: bool,
    detect_sample_chars: usize,
    entries: HashMap<CacheKey, String>,
    stats: CacheStats,
}

impl TranslationCache {
    /// Create a cache with the default retry policy and no pre-detection.
    pub fn new(translator: Arc<dyn Translator>, default_language: &str) -> Self {
        Self {
            translator,
            default_language: default_language.to_string(),
            enabled: true,
            retry: RetryPolicy::default(),
            detect_before_translate: false,
            detect_sample_chars: DEFAULT_DETECT_SAMPLE_CHARS,
            entries: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// Create a cache configured from settings.
    pub fn from_settings(translator: Arc<dyn Translator>, settings: &Settings) -> Self {
        let translation = &settings.translation;
        Self::new(translator, &settings.general.default_language)
            .with_enabled(translation.enabled)
            .with_retry(RetryPolicy::new(
                translation.max_attempts,
                Duration::from_millis(translation.base_delay_ms),
            ))
            .with_detection(translation.detect_before_translate, translation.detect_sample_chars)
    }

    /// Turn translation on or off. When off, every call passes text through.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Check the text's language before translating and skip text already in the target.
    pub fn with_detection(mut self, enabled: bool, sample_chars: usize) -> Self {
        self.detect_before_translate = enabled;
        self.detect_sample_chars = sample_chars.max(1);
        self
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Translate `text` into `target_language`, falling back to `text` on failure.
    pub async fn translate(&mut self, text: &str, target_language: &str) -> String {
        let detect = self.detect_before_translate;
        self.translate_with(text, target_language, detect).await
    }

    /// Like [`translate`](Self::translate), for text whose language the caller
    /// has already detected. Never runs pre-translation detection.
    pub async fn translate_detected(&mut self, text: &str, target_language: &str) -> String {
        self.translate_with(text, target_language, false).await
    }

    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate_with(&mut self, text: &str, target_language: &str, detect: bool) -> String {
        if !self.enabled
            || text.trim().is_empty()
            || language::same_language(target_language, &self.default_language)
        {
            return text.to_string();
        }

        let key = CacheKey::new(text, target_language);
        if let Some(cached) = self.entries.get(&key) {
            self.stats.hits += 1;
            debug!("Translation cache hit");
            return cached.clone();
        }

        if detect {
            if let Some(detected) = self.detect_language(text).await {
                if language::same_language(&detected, target_language) {
                    debug!("Text already in {}, skipping translation", target_language);
                    return text.to_string();
                }
            }
        }

        self.stats.misses += 1;
        let translator = Arc::clone(&self.translator);
        let result = retry_with_backoff(&self.retry, "Translation", |_| {
            translator.translate(text, target_language)
        })
        .await;

        match result {
            Ok(translated) => {
                self.entries.insert(key, translated.clone());
                translated
            }
            Err(e) => {
                self.stats.failures += 1;
                let err = RecapError::TranslationFailed(e.to_string());
                warn!("{}; using original text", err);
                text.to_string()
            }
        }
    }

    /// Detect the language of a sample of `text`. Returns `None` on failure.
    pub async fn detect_language(&self, text: &str) -> Option<String> {
        let sample: String = text.chars().take(self.detect_sample_chars).collect();
        if sample.trim().is_empty() {
            return None;
        }

        match self.translator.detect_language(&sample).await {
            Ok(code) => Some(code),
            Err(e) => {
                debug!("Language detection failed: {}", e);
                None
            }
        }
    }

    /// Drop every cached translation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Translator double that uppercases text and counts calls.
    pub(crate) struct FakeTranslator {
        pub calls: AtomicUsize,
        pub detect_calls: AtomicUsize,
        failures_left: AtomicUsize,
        detected: String,
    }

    impl FakeTranslator {
        pub fn new() -> Self {
            Self::failing(0)
        }

        pub fn failing(times: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                detect_calls: AtomicUsize::new(0),
                failures_left: AtomicUsize::new(times),
                detected: "en".to_string(),
            }
        }

        pub fn detecting(mut self, code: &str) -> Self {
            self.detected = code.to_string();
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let left = self.failures_left.load(Ordering::SeqCst);
            if left > 0 {
                self.failures_left.store(left - 1, Ordering::SeqCst);
                return Err(RecapError::OpenAI("service unavailable".into()));
            }
            Ok(format!("[{}] {}", target_language, text.to_uppercase()))
        }

        async fn detect_language(&self, _text: &str) -> Result<String> {
            self.detect_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.detected.clone())
        }
    }

    fn cache(translator: &Arc<FakeTranslator>) -> TranslationCache {
        TranslationCache::new(translator.clone() as Arc<dyn Translator>, "en")
            .with_retry(RetryPolicy::new(3, Duration::ZERO))
    }

    #[tokio::test]
    async fn test_second_call_is_cached() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        let first = cache.translate("hello", "es").await;
        let second = cache.translate("hello", "es").await;

        assert_eq!(first, "[es] HELLO");
        assert_eq!(second, first);
        assert_eq!(translator.calls(), 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1, failures: 0 });
    }

    #[tokio::test]
    async fn test_default_language_never_calls_translator() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        assert_eq!(cache.translate("hello", "en").await, "hello");
        assert_eq!(cache.translate("hello", "EN-us").await, "hello");
        assert_eq!(translator.calls(), 0);
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 0);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_blank_text_passes_through() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        assert_eq!(cache.translate("  ", "fr").await, "  ");
        assert_eq!(translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_succeeds_on_third_attempt() {
        let translator = Arc::new(FakeTranslator::failing(2));
        let mut cache = cache(&translator);

        assert_eq!(cache.translate("hello", "es").await, "[es] HELLO");
        assert_eq!(translator.calls(), 3);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_three_failures_return_original() {
        let translator = Arc::new(FakeTranslator::failing(3));
        let mut cache = cache(&translator);

        assert_eq!(cache.translate("hello", "es").await, "hello");
        assert_eq!(translator.calls(), 3);
        assert!(cache.is_empty());
        assert_eq!(cache.stats().failures, 1);

        // Failures are not cached; the next call reaches the translator again.
        assert_eq!(cache.translate("hello", "es").await, "[es] HELLO");
        assert_eq!(translator.calls(), 4);
    }

    #[tokio::test]
    async fn test_shared_prefix_does_not_collide() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);
        let prefix = "a".repeat(500);

        let one = cache.translate(&format!("{}one", prefix), "de").await;
        let two = cache.translate(&format!("{}two", prefix), "de").await;

        assert_ne!(one, two);
        assert_eq!(translator.calls(), 2);
    }

    #[tokio::test]
    async fn test_language_is_part_of_key() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        assert_eq!(cache.translate("hello", "es").await, "[es] HELLO");
        assert_eq!(cache.translate("hello", "fr").await, "[fr] HELLO");
        assert_eq!(cache.translate("hello", "ES").await, "[es] HELLO");
        assert_eq!(translator.calls(), 2);
    }

    #[tokio::test]
    async fn test_clear_forces_refetch() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator);

        cache.translate("hello", "es").await;
        cache.clear();
        assert!(cache.is_empty());
        cache.translate("hello", "es").await;

        assert_eq!(translator.calls(), 2);
    }

    #[tokio::test]
    async fn test_detection_skips_text_already_in_target() {
        let translator = Arc::new(FakeTranslator::new().detecting("es"));
        let mut cache = cache(&translator).with_detection(true, 50);

        assert_eq!(cache.translate("hola", "es").await, "hola");
        assert_eq!(translator.calls(), 0);
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_translate_detected_skips_second_detection() {
        let translator = Arc::new(FakeTranslator::new().detecting("en"));
        let mut cache = cache(&translator).with_detection(true, 200);

        assert_eq!(cache.translate_detected("hello", "fr").await, "[fr] HELLO");
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 0);

        assert_eq!(cache.translate("goodbye", "fr").await, "[fr] GOODBYE");
        assert_eq!(translator.detect_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_passes_through() {
        let translator = Arc::new(FakeTranslator::new());
        let mut cache = cache(&translator).with_enabled(false);

        assert_eq!(cache.translate("hello", "es").await, "hello");
        assert_eq!(translator.calls(), 0);
    }
}
