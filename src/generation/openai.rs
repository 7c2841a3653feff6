//! OpenAI chat-completions backed generator.

use super::Generator;
use crate::config::GenerationSettings;
use crate::error::Result;
use crate::openai::{complete, create_client_with_timeout};
use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Generator using an OpenAI chat model.
pub struct OpenAIGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    /// Create a generator with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(&GenerationSettings::default())
    }

    /// Create a generator with a custom model, temperature and timeout.
    pub fn with_config(settings: &GenerationSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(Duration::from_secs(settings.timeout_seconds))?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, chars = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String> {
        let reply = complete(&self.client, &self.model, self.temperature, None, prompt).await?;
        debug!("Generated {} characters", reply.len());
        Ok(reply)
    }
}
