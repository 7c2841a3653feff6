//! Prompt templates for Recap.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
    pub question: QuestionPrompts,
    pub translation: TranslationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompt for summarizing a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            user: r#"You are a comprehensive YouTube video summarizer.
Provide a detailed summary of the transcript, including:
1. Key main points
2. Important details
3. Context of the video
4. Potential insights or implications

Transcript text: {{transcript}}"#
                .to_string(),
        }
    }
}

/// Prompt for answering a question about a summarized video.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionPrompts {
    pub user: String,
}

impl Default for QuestionPrompts {
    fn default() -> Self {
        Self {
            user: r#"You are an advanced AI assistant designed to provide comprehensive answers about a YouTube video topic.

Context:
- Video Summary: {{summary}}
- User Question: {{question}}

Task: Generate a multi-faceted response that includes:
1. A direct answer based on the video summary
2. Additional contextual information from broader knowledge
3. Relevant insights, background, or related information
4. Potential follow-up areas of exploration

Guidelines:
- Use the video summary as a primary reference
- Expand beyond the summary with credible, relevant information
- Provide a well-rounded, informative response
- If the summary lacks sufficient information, clearly indicate this
- Ensure the response is coherent, informative, and engaging

Response Format:
A. Direct Video Summary Response
B. Expanded Context
C. Additional Insights
D. Potential Further Exploration

Respond in a structured, clear manner. Write the entire response in {{language}}."#
                .to_string(),
        }
    }
}

/// Prompts for translation and language detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationPrompts {
    pub system: String,
    pub translate: String,
    pub detect: String,
}

impl Default for TranslationPrompts {
    fn default() -> Self {
        Self {
            system: "You are a professional translator. You translate text faithfully, keeping Markdown formatting, lists and line breaks intact. You never add commentary.".to_string(),

            translate: r#"Translate the following text into {{language}}. Reply with the translation only.

{{text}}"#
                .to_string(),

            detect: r#"Identify the language of the following text. Reply with its ISO 639-1 code only (for example: en, es, fr).

{{text}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }

            let question_path = custom_path.join("question.toml");
            if question_path.exists() {
                let content = std::fs::read_to_string(&question_path)?;
                prompts.question = toml::from_str(&content)?;
            }

            let translation_path = custom_path.join("translation.toml");
            if translation_path.exists() {
                let content = std::fs::read_to_string(&translation_path)?;
                prompts.translation = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Placeholders are filled in one pass over the template; inserted values
    /// are never scanned again. Unknown placeholders are left as written.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            result.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let Some(end) = after.find("}}") else {
                rest = &rest[start..];
                break;
            };

            match vars.get(&after[..end]) {
                Some(value) => {
                    result.push_str(value);
                    rest = &after[end + 2..];
                }
                None => {
                    result.push_str("{{");
                    rest = after;
                }
            }
        }

        result.push_str(rest);
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
