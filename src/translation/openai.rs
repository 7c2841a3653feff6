//! OpenAI chat-completions backed translator.

use super::Translator;
use crate::config::{Prompts, TranslationPrompts, TranslationSettings};
use crate::error::{RecapError, Result};
use crate::language;
use crate::openai::{complete, create_client};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Translator that asks a chat model for translations and language detection.
pub struct OpenAITranslator {
    client: Client<OpenAIConfig>,
    model: String,
    prompts: TranslationPrompts,
}

impl OpenAITranslator {
    /// Create a translator with default prompts.
    pub fn new(model: &str) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: model.to_string(),
            prompts: TranslationPrompts::default(),
        })
    }

    /// Create a translator from settings and loaded prompts.
    pub fn with_config(settings: &TranslationSettings, prompts: &Prompts) -> Result<Self> {
        Ok(Self {
            client: create_client()?,
            model: settings.model.clone(),
            prompts: prompts.translation.clone(),
        })
    }
}

#[async_trait]
impl Translator for OpenAITranslator {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("language".to_string(), language::display_name(target_language));
        vars.insert("text".to_string(), text.to_string());

        let prompt = Prompts::render(&self.prompts.translate, &vars);
        complete(&self.client, &self.model, 0.0, Some(&self.prompts.system), &prompt)
            .await
            .map_err(|e| RecapError::TranslationFailed(e.to_string()))
    }

    #[instrument(skip(self, text))]
    async fn detect_language(&self, text: &str) -> Result<String> {
        let mut vars = HashMap::new();
        vars.insert("text".to_string(), text.to_string());

        let prompt = Prompts::render(&self.prompts.detect, &vars);
        let reply = complete(&self.client, &self.model, 0.0, None, &prompt).await?;

        let code = parse_language_reply(&reply).ok_or_else(|| {
            RecapError::TranslationFailed(format!("Unrecognized detection reply: {:?}", reply))
        })?;
        debug!("Detected language: {}", code);
        Ok(code)
    }
}

/// Pull a language code out of a model reply such as `"es"` or `"Language: fr."`.
fn parse_language_reply(reply: &str) -> Option<String> {
    let token = reply
        .split(|c: char| c.is_whitespace() || c == ':')
        .map(|t| t.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-'))
        .rfind(|t| !t.is_empty())?;

    let code = language::normalize(token);
    let primary = language::primary_subtag(&code);
    if (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_reply() {
        assert_eq!(parse_language_reply("es").as_deref(), Some("es"));
        assert_eq!(parse_language_reply(" FR\n").as_deref(), Some("fr"));
        assert_eq!(parse_language_reply("Language: de.").as_deref(), Some("de"));
        assert_eq!(parse_language_reply("`pt-BR`").as_deref(), Some("pt-br"));
        assert_eq!(parse_language_reply("").as_deref(), None);
        assert_eq!(parse_language_reply("unknown").as_deref(), None);
    }

    #[test]
    fn test_translator_creation() {
        let translator = OpenAITranslator::new("gpt-4o-mini").unwrap();
        assert_eq!(translator.model, "gpt-4o-mini");
        assert!(translator.prompts.translate.contains("{{text}}"));
    }
}
